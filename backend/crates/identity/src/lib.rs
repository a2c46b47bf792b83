//! Identity & Access Core
//!
//! Clean Architecture structure:
//! - `domain/` - Account entity, value objects, repository trait, identity
//!   resolver, token issuer seam
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL and in-memory stores, JWT issuer
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Registration, login by username or email, social login, password change
//! - Two roles (`ADMIN`, `CUSTOMER`), one authority string each
//! - Stateless HS256 bearer tokens
//! - Opt-in administrator provisioning with an audit trail
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, random salt per hash, optional pepper
//! - Unknown principal and wrong password are the same error
//! - Federated accounts hold the hash of a random secret nobody knows
//! - Email uniqueness enforced by the store, not by pre-checks

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use infra::{InMemoryAccountRepository, JwtTokenIssuer, PgAccountRepository};
pub use presentation::router::identity_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
