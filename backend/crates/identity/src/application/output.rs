//! Use Case Outputs
//!
//! What the orchestrator hands back: a public view of the account and,
//! for the sign-in style operations, a freshly issued token.

use chrono::{DateTime, Utc};

use crate::domain::entity::account::Account;
use crate::domain::token::TokenIssuer;
use crate::error::IdentityResult;

/// Public projection of an account; never includes the password hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub provider: String,
    pub image_url: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id.to_string(),
            username: account.username.to_string(),
            email: account.email.to_string(),
            role: account.role.code().to_string(),
            provider: account.provider.to_string(),
            image_url: account.image_url.clone(),
            phone_number: account.phone_number.clone(),
            address: account.address.clone(),
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Token plus the account it was issued for
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub account: AccountView,
}

impl AuthOutput {
    /// Issue a token for `account`'s username, id and authority
    pub fn issue_for(issuer: &dyn TokenIssuer, account: &Account) -> IdentityResult<Self> {
        let issued = issuer.issue(
            account.username.as_str(),
            &account.account_id.to_string(),
            account.authority(),
        )?;

        Ok(Self {
            token: issued.token,
            expires_at: issued.expires_at,
            account: AccountView::from(account),
        })
    }
}
