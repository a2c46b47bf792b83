//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Randomness and Base64 helpers
//! - Password hashing (Argon2id) and a configurable password policy
//!   (NIST SP 800-63B style when strict)

pub mod crypto;
pub mod password;
