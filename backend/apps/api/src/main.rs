//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use anyhow::Context;
use axum::{
    Router, http,
    http::{Method, header},
};
use identity::application::{ProvisionAdminInput, ProvisionAdminUseCase};
use identity::domain::TokenIssuer;
use identity::{IdentityConfig, JwtTokenIssuer, PgAccountRepository, identity_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,identity=info,audit=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Release builds refuse to start without a persistent token secret
    let identity_config = IdentityConfig::from_env(!cfg!(debug_assertions))
        .context("invalid identity configuration")?;

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let repo = PgAccountRepository::new(pool.clone());

    provision_admin(&repo, &identity_config).await?;

    let issuer: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::from_config(&identity_config));

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api", identity_router(repo, issuer, identity_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .context("LISTEN_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Provision the bootstrap administrator when both variables are set
async fn provision_admin(
    repo: &PgAccountRepository,
    config: &IdentityConfig,
) -> anyhow::Result<()> {
    let email = env::var("BOOTSTRAP_ADMIN_EMAIL").ok();
    let password = env::var("BOOTSTRAP_ADMIN_PASSWORD").ok();

    let (email, password) = match (email, password) {
        (Some(email), Some(password)) => (email, password),
        (None, None) => return Ok(()),
        _ => {
            tracing::warn!(
                "Only one of BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD is set, skipping admin provisioning"
            );
            return Ok(());
        }
    };

    let use_case = ProvisionAdminUseCase::new(Arc::new(repo.clone()), Arc::new(config.clone()));
    let output = use_case
        .execute(ProvisionAdminInput { email, password })
        .await
        .context("admin provisioning failed")?;

    tracing::info!(
        account_id = %output.account.id,
        outcome = %output.outcome,
        "Bootstrap administrator provisioned"
    );

    Ok(())
}
