//! Domain Layer
//!
//! Contains entities, value objects, repository traits, the identity
//! resolver and the token issuer seam.

pub mod entity;
pub mod repository;
pub mod resolver;
pub mod token;
pub mod value_object;

// Re-exports
pub use entity::account::{Account, ProfileChanges};
pub use repository::{AccountRepository, LocalAccountRepository};
pub use resolver::{IdentityResolver, PrincipalResolution, Resolution};
pub use token::{IssuedToken, TokenClaims, TokenIssuer};
