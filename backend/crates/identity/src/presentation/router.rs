//! Identity Router

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::repository::AccountRepository;
use crate::domain::token::TokenIssuer;
use crate::presentation::handlers::{self, IdentityAppState};
use crate::presentation::middleware::{require_admin, require_bearer};

/// Create the identity router for any repository implementation
///
/// Mount it under `/api`:
/// - `/auth/*` is public
/// - `/accounts/*` requires a bearer token; listing, lookups by id and role
///   changes additionally require `ROLE_ADMIN`
pub fn identity_router<R>(repo: R, issuer: Arc<dyn TokenIssuer>, config: IdentityConfig) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let state = IdentityAppState {
        repo: Arc::new(repo),
        issuer: issuer.clone(),
        config: Arc::new(config),
    };

    let auth = Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/social-login", post(handlers::social_login::<R>))
        .route("/change-password", post(handlers::change_password::<R>));

    let admin = Router::new()
        .route("/", get(handlers::list_accounts::<R>))
        .route("/{id}", get(handlers::get_account::<R>))
        .route("/{id}/role", put(handlers::assign_role::<R>))
        .route_layer(from_fn(require_admin));

    let accounts = Router::new()
        .route("/me", get(handlers::me::<R>))
        .route("/{id}/profile", put(handlers::update_profile::<R>))
        .merge(admin)
        .route_layer(from_fn_with_state(issuer, require_bearer));

    Router::new()
        .nest("/auth", auth)
        .nest("/accounts", accounts)
        .with_state(state)
}
