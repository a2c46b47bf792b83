//! Provision Admin Use Case
//!
//! Makes sure a known administrator account exists with a known password.
//! Never runs implicitly: the binary calls it only when both bootstrap
//! variables are set, and every run leaves an audit record.

use std::fmt;
use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::output::AccountView;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    email::Email,
    role::Role,
    username::Username,
};
use crate::error::IdentityResult;

pub struct ProvisionAdminInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    /// An existing account was promoted (if needed) and its password reset
    Updated,
}

impl fmt::Display for ProvisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionOutcome::Created => f.write_str("created"),
            ProvisionOutcome::Updated => f.write_str("updated"),
        }
    }
}

pub struct ProvisionAdminOutput {
    pub outcome: ProvisionOutcome,
    pub account: AccountView,
}

pub struct ProvisionAdminUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> ProvisionAdminUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ProvisionAdminInput) -> IdentityResult<ProvisionAdminOutput> {
        let email = Email::new(input.email)?;

        let raw_password = RawPassword::new(input.password);
        raw_password.check(&self.config.password_policy)?;
        let password_hash = AccountPassword::from_raw(&raw_password, self.config.pepper())?;

        let existing = match self.repo.find_by_email_ci(email.as_str()).await? {
            Some(account) => Some(account),
            None => {
                let username = Username::new(email.as_str())?;
                self.repo.find_by_username(&username).await?
            }
        };

        let (outcome, account) = match existing {
            Some(mut account) => {
                let previous_role = account.role;
                account.set_role(Role::Admin);
                account.set_password(password_hash);
                self.repo.update(&account).await?;

                tracing::warn!(
                    target: "audit",
                    account_id = %account.account_id,
                    previous_role = %previous_role,
                    "Administrator provisioned: existing account promoted and password reset"
                );
                (ProvisionOutcome::Updated, account)
            }
            None => {
                let account = Account::new_admin(email, password_hash);
                self.repo.create(&account).await?;

                tracing::warn!(
                    target: "audit",
                    account_id = %account.account_id,
                    "Administrator provisioned: account created"
                );
                (ProvisionOutcome::Created, account)
            }
        };

        Ok(ProvisionAdminOutput {
            outcome,
            account: AccountView::from(&account),
        })
    }
}
