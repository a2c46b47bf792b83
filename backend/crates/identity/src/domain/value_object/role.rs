//! Role and Authority
//!
//! Two roles, no inheritance. Each maps to exactly one authority string,
//! `"ROLE_" + code`, which is what tokens carry and what route guards check.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    #[default]
    Customer,
}

impl Role {
    const AUTHORITY_PREFIX: &'static str = "ROLE_";

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Customer => "CUSTOMER",
        }
    }

    /// Authority string carried in tokens
    #[inline]
    pub const fn authority(&self) -> &'static str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::Customer => "ROLE_CUSTOMER",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Parse a role code, ignoring ASCII case and surrounding whitespace
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        [Role::Admin, Role::Customer]
            .into_iter()
            .find(|role| role.code().eq_ignore_ascii_case(code))
    }

    /// Inverse of [`Role::authority`]
    pub fn from_authority(authority: &str) -> Option<Self> {
        authority
            .strip_prefix(Self::AUTHORITY_PREFIX)
            .and_then(|code| [Role::Admin, Role::Customer].into_iter().find(|r| r.code() == code))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
