//! Identity Resolver
//!
//! Turns a free-form login principal into at most one account. Lookups run
//! in a fixed order and the first hit wins:
//! 1. exact username
//! 2. exact email
//! 3. case-insensitive email
//!
//! Usernames are not unique, so a principal can name one account by username
//! and a different one by email. [`PrincipalResolution::RejectAmbiguous`]
//! refuses such principals instead of silently preferring the username.

use std::sync::Arc;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::username::Username;
use crate::error::IdentityResult;

/// How to treat a principal that matches different accounts by username and
/// by email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrincipalResolution {
    /// Take the username match
    #[default]
    FirstMatch,
    /// Report the principal as ambiguous
    RejectAmbiguous,
}

#[derive(Debug)]
pub enum Resolution {
    Unique(Account),
    /// Only produced under [`PrincipalResolution::RejectAmbiguous`]
    Ambiguous {
        by_username: Box<Account>,
        by_email: Box<Account>,
    },
    NotFound,
}

impl Resolution {
    pub fn into_account(self) -> Option<Account> {
        match self {
            Resolution::Unique(account) => Some(account),
            _ => None,
        }
    }
}

pub struct IdentityResolver<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    mode: PrincipalResolution,
}

impl<R> IdentityResolver<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, mode: PrincipalResolution) -> Self {
        Self { repo, mode }
    }

    pub async fn resolve(&self, principal: &str) -> IdentityResult<Resolution> {
        let principal = principal.trim();
        if principal.is_empty() {
            return Ok(Resolution::NotFound);
        }

        // A principal that cannot be a username simply skips step 1
        let by_username = match Username::new(principal) {
            Ok(username) => self.repo.find_by_username(&username).await?,
            Err(_) => None,
        };

        if let Some(by_username) = by_username {
            if self.mode == PrincipalResolution::RejectAmbiguous {
                if let Some(by_email) = self.repo.find_by_email_ci(principal).await? {
                    if by_email.account_id != by_username.account_id {
                        tracing::warn!(
                            username_match = %by_username.account_id,
                            email_match = %by_email.account_id,
                            "Ambiguous login principal"
                        );
                        return Ok(Resolution::Ambiguous {
                            by_username: Box::new(by_username),
                            by_email: Box::new(by_email),
                        });
                    }
                }
            }
            return Ok(Resolution::Unique(by_username));
        }

        if let Some(account) = self.repo.find_by_email(principal).await? {
            return Ok(Resolution::Unique(account));
        }

        if let Some(account) = self.repo.find_by_email_ci(principal).await? {
            return Ok(Resolution::Unique(account));
        }

        Ok(Resolution::NotFound)
    }
}
