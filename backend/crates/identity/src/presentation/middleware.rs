//! Identity Middleware
//!
//! Bearer-token authentication and authority checks for protected routes.

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::domain::token::{TokenClaims, TokenIssuer};
use crate::domain::value_object::role::Role;
use crate::error::IdentityError;

/// Validates `Authorization: Bearer <token>` and stores the [`TokenClaims`]
/// in request extensions
pub async fn require_bearer(
    State(issuer): State<Arc<dyn TokenIssuer>>,
    mut req: Request,
    next: Next,
) -> Result<Response, IdentityError> {
    let token = bearer_token(req.headers()).ok_or(IdentityError::Unauthorized)?;
    let claims = issuer.validate(token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Requires `ROLE_ADMIN`; must run inside [`require_bearer`]
pub async fn require_admin(req: Request, next: Next) -> Result<Response, IdentityError> {
    let claims = req
        .extensions()
        .get::<TokenClaims>()
        .ok_or(IdentityError::Unauthorized)?;

    if claims.authority != Role::Admin.authority() {
        tracing::warn!(
            principal = %claims.principal,
            authority = %claims.authority,
            path = %req.uri().path(),
            "Admin route denied"
        );
        return Err(IdentityError::Forbidden);
    }

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
