//! Provider Value Object
//!
//! Where an account's identity comes from: `"local"` for password accounts,
//! otherwise the tag of the federated provider that vouched for it.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const LOCAL: &str = "local";
const TAG_MAX_LENGTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provider(String);

impl Provider {
    pub fn local() -> Self {
        Self(LOCAL.to_string())
    }

    /// A federated provider tag such as `google`; trimmed and lower-cased
    pub fn federated(tag: impl AsRef<str>) -> AppResult<Self> {
        let tag = tag.as_ref().trim().to_lowercase();

        if tag.is_empty() {
            return Err(AppError::bad_request("Provider cannot be empty"));
        }

        if tag == LOCAL {
            return Err(AppError::bad_request(
                "\"local\" is reserved for password accounts",
            ));
        }

        if tag.len() > TAG_MAX_LENGTH
            || !tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        {
            return Err(AppError::bad_request("Invalid provider tag"));
        }

        Ok(Self(tag))
    }

    pub fn from_db(provider: impl Into<String>) -> Self {
        Self(provider.into())
    }

    pub fn is_local(&self) -> bool {
        self.0 == LOCAL
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local() {
        assert!(Provider::local().is_local());
        assert_eq!(Provider::local().as_str(), "local");
    }

    #[test]
    fn test_federated() {
        let google = Provider::federated(" Google ").unwrap();
        assert_eq!(google.as_str(), "google");
        assert!(!google.is_local());
    }

    #[test]
    fn test_federated_rejects() {
        assert!(Provider::federated("").is_err());
        assert!(Provider::federated("LOCAL").is_err());
        assert!(Provider::federated("evil provider").is_err());
    }
}
