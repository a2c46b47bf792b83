//! Token Issuer
//!
//! Signed, time-bounded bearer credentials carrying a principal (username),
//! the account id and one authority string. Stateless: there is no revocation.
//!
//! Usernames need not be unique, so anything that acts on "the caller's own
//! account" must go by `account_id`, never by re-resolving `principal`.

use chrono::{DateTime, Utc};

use crate::error::IdentityResult;

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// What a valid token asserts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub principal: String,
    pub account_id: String,
    pub authority: String,
    pub expires_at: DateTime<Utc>,
}

pub trait TokenIssuer: Send + Sync {
    /// Sign a token; failures are `IdentityError::Token`
    fn issue(
        &self,
        principal: &str,
        account_id: &str,
        authority: &str,
    ) -> IdentityResult<IssuedToken>;

    /// Check signature, issuer and expiry; any failure is
    /// `IdentityError::Unauthorized`
    fn validate(&self, token: &str) -> IdentityResult<TokenClaims>;
}
