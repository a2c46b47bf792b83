//! Account Password Value Objects
//!
//! Domain wrappers over `platform::password`:
//! - [`RawPassword`]: what the caller typed, zeroized on drop
//! - [`AccountPassword`]: the Argon2id PHC string that gets stored
//!
//! Policy is checked explicitly with [`RawPassword::check`] when a password
//! is *chosen*; verification never applies policy.

use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicy};
use std::fmt;

use crate::error::{IdentityError, IdentityResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Wrap caller input (NFKC-normalized, never rejected here)
    pub fn new(raw: impl Into<String>) -> Self {
        Self(ClearTextPassword::new(raw))
    }

    /// A random secret nobody knows; used for federated accounts
    pub fn unusable() -> Self {
        Self(ClearTextPassword::unusable())
    }

    /// Validate against the configured policy
    pub fn check(&self, policy: &PasswordPolicy) -> IdentityResult<()> {
        policy.check(&self.0)?;
        Ok(())
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Account Password (Hashed, for storage)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct AccountPassword(HashedPassword);

impl AccountPassword {
    /// Hash with a fresh salt (and the application pepper, if any)
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> IdentityResult<Self> {
        Ok(Self(raw.inner().hash(pepper)?))
    }

    /// Load a stored PHC string; a malformed one is a consistency failure
    pub fn from_phc_string(phc_string: impl Into<String>) -> IdentityResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| {
                IdentityError::InternalConsistency("invalid password hash in store".to_string())
            })
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time verification
    ///
    /// `Ok(false)` on mismatch; `Err(InternalConsistency)` if the stored
    /// digest cannot be used at all.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> IdentityResult<bool> {
        Ok(self.0.verify(raw.inner(), pepper)?)
    }
}

impl fmt::Debug for AccountPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
