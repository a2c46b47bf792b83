//! Infrastructure Layer
//!
//! Store implementations and the JWT token issuer.

pub mod jwt;
pub mod memory;
pub mod postgres;

pub use jwt::JwtTokenIssuer;
pub use memory::InMemoryAccountRepository;
pub use postgres::PgAccountRepository;
