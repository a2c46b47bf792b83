//! Change Password Use Case
//!
//! Rotates an account's password after checking the current one. Tokens
//! already issued stay valid until they expire.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId,
    account_password::{AccountPassword, RawPassword},
};
use crate::error::{IdentityError, IdentityResult};

pub struct ChangePasswordInput {
    pub account_id: String,
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ChangePasswordInput) -> IdentityResult<()> {
        let account_id =
            AccountId::parse(input.account_id.trim()).ok_or(IdentityError::AccountNotFound)?;

        let mut account = self
            .repo
            .find_by_id(&account_id)
            .await?
            .ok_or(IdentityError::AccountNotFound)?;

        let current = RawPassword::new(input.current_password);
        if !account.password_hash.verify(&current, self.config.pepper())? {
            tracing::info!(account_id = %account.account_id, "Password change with wrong current password");
            return Err(IdentityError::IncorrectPassword);
        }

        let new_password = RawPassword::new(input.new_password);
        new_password.check(&self.config.password_policy)?;

        account.set_password(AccountPassword::from_raw(&new_password, self.config.pepper())?);
        self.repo.update(&account).await?;

        tracing::info!(
            target: "audit",
            account_id = %account.account_id,
            "Password changed"
        );

        Ok(())
    }
}
