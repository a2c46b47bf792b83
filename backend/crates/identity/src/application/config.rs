//! Application Configuration
//!
//! Configuration for the identity application layer.

use std::time::Duration;

use platform::crypto::from_base64;
pub use platform::password::PasswordPolicy;

pub use crate::domain::resolver::PrincipalResolution;

/// Minimum accepted token secret length in bytes (HS256 key size)
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// May two accounts share a username?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UsernamePolicy {
    #[default]
    AllowDuplicates,
    /// Registration fails with `UsernameTaken`
    RequireUnique,
}

/// What a repeat social login does to an existing account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SocialProfilePolicy {
    /// Reuse the account as stored
    #[default]
    KeepExisting,
    /// Copy provider and picture from the new claim
    RefreshOnLogin,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not valid base64")]
    InvalidBase64 { name: &'static str },

    #[error("{name} must be at least {min} bytes (got {actual})")]
    SecretTooShort {
        name: &'static str,
        min: usize,
        actual: usize,
    },

    #[error("{name} must be a positive number of seconds")]
    InvalidDuration { name: &'static str },

    #[error("{name} must be true or false")]
    InvalidFlag { name: &'static str },

    #[error("{name} must be set")]
    Missing { name: &'static str },
}

/// Identity application configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// HMAC key for signing tokens
    pub token_secret: Vec<u8>,
    /// Token lifetime (24 hours)
    pub token_ttl: Duration,
    /// `iss` claim written and required on tokens
    pub token_issuer: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    pub password_policy: PasswordPolicy,
    pub principal_resolution: PrincipalResolution,
    pub username_policy: UsernamePolicy,
    pub social_profile_policy: SocialProfilePolicy,
}

/// Defaults sign with a fresh random secret, so tokens die with the process
impl Default for IdentityConfig {
    fn default() -> Self {
        use rand::RngCore;
        let mut token_secret = vec![0u8; MIN_TOKEN_SECRET_LEN];
        rand::rng().fill_bytes(&mut token_secret);

        Self {
            token_secret,
            token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            token_issuer: "identity".to_string(),
            password_pepper: None,
            password_policy: PasswordPolicy::default(),
            principal_resolution: PrincipalResolution::default(),
            username_policy: UsernamePolicy::default(),
            social_profile_policy: SocialProfilePolicy::default(),
        }
    }
}

impl IdentityConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self::default()
    }

    /// Create config for development (tokens die with the process)
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Load from process environment
    ///
    /// `require_secret` is true in release builds: without
    /// `IDENTITY_TOKEN_SECRET` every restart would invalidate all tokens.
    pub fn from_env(require_secret: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), require_secret)
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F, require_secret: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup("IDENTITY_TOKEN_SECRET") {
            Some(encoded) => {
                let name = "IDENTITY_TOKEN_SECRET";
                let secret =
                    from_base64(&encoded).map_err(|_| ConfigError::InvalidBase64 { name })?;
                if secret.len() < MIN_TOKEN_SECRET_LEN {
                    return Err(ConfigError::SecretTooShort {
                        name,
                        min: MIN_TOKEN_SECRET_LEN,
                        actual: secret.len(),
                    });
                }
                Self {
                    token_secret: secret,
                    ..Default::default()
                }
            }
            None if require_secret => {
                return Err(ConfigError::Missing {
                    name: "IDENTITY_TOKEN_SECRET",
                });
            }
            None => Self::development(),
        };

        if let Some(raw) = lookup("IDENTITY_TOKEN_TTL_SECS") {
            let name = "IDENTITY_TOKEN_TTL_SECS";
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDuration { name })?;
            if secs == 0 {
                return Err(ConfigError::InvalidDuration { name });
            }
            config.token_ttl = Duration::from_secs(secs);
        }

        if let Some(issuer) = lookup("IDENTITY_TOKEN_ISSUER") {
            config.token_issuer = issuer.trim().to_string();
        }

        if let Some(pepper) = lookup("IDENTITY_PASSWORD_PEPPER") {
            config.password_pepper = Some(pepper.into_bytes());
        }

        if flag(&lookup, "IDENTITY_STRICT_PASSWORDS")? {
            config.password_policy = PasswordPolicy::strict();
        }

        if flag(&lookup, "IDENTITY_STRICT_PRINCIPALS")? {
            config.principal_resolution = PrincipalResolution::RejectAmbiguous;
        }

        if flag(&lookup, "IDENTITY_UNIQUE_USERNAMES")? {
            config.username_policy = UsernamePolicy::RequireUnique;
        }

        if flag(&lookup, "IDENTITY_REFRESH_SOCIAL_PROFILE")? {
            config.social_profile_policy = SocialProfilePolicy::RefreshOnLogin;
        }

        Ok(config)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

fn flag<F>(lookup: &F, name: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(_) => Err(ConfigError::InvalidFlag { name }),
    }
}
