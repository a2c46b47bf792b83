//! JWT Token Issuer
//!
//! HS256 tokens with `sub` (username), `uid` (account id), `authority`,
//! `iss`, `iat` and `exp`.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::config::IdentityConfig;
use crate::domain::token::{IssuedToken, TokenClaims, TokenIssuer};
use crate::error::{IdentityError, IdentityResult};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    uid: String,
    authority: String,
    iss: String,
    iat: i64,
    exp: i64,
}

pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: TimeDelta,
}

impl JwtTokenIssuer {
    pub fn new(secret: &[u8], issuer: impl Into<String>, ttl: Duration) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    pub fn from_config(config: &IdentityConfig) -> Self {
        Self::new(&config.token_secret, &config.token_issuer, config.token_ttl)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(
        &self,
        principal: &str,
        account_id: &str,
        authority: &str,
    ) -> IdentityResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| IdentityError::Token("token lifetime out of range".to_string()))?;

        let claims = Claims {
            sub: principal.to_string(),
            uid: account_id.to_string(),
            authority: authority.to_string(),
            iss: self.issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| IdentityError::Token(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at: DateTime::from_timestamp(claims.exp, 0).unwrap_or(expires_at),
        })
    }

    fn validate(&self, token: &str) -> IdentityResult<TokenClaims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            IdentityError::Unauthorized
        })?;

        let claims = data.claims;
        let expires_at =
            DateTime::from_timestamp(claims.exp, 0).ok_or(IdentityError::Unauthorized)?;

        Ok(TokenClaims {
            principal: claims.sub,
            account_id: claims.uid,
            authority: claims.authority,
            expires_at,
        })
    }
}
