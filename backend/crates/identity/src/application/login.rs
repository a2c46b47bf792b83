//! Login Use Case
//!
//! Authenticates a principal (username or email) with a password.

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::application::output::AuthOutput;
use crate::domain::repository::AccountRepository;
use crate::domain::resolver::{IdentityResolver, Resolution};
use crate::domain::token::TokenIssuer;
use crate::domain::value_object::account_password::{AccountPassword, RawPassword};
use crate::error::{IdentityError, IdentityResult};

pub struct LoginInput {
    /// Username or email
    pub principal: String,
    pub password: String,
}

pub struct LoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    issuer: Arc<dyn TokenIssuer>,
    config: Arc<IdentityConfig>,
}

impl<R> LoginUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, issuer: Arc<dyn TokenIssuer>, config: Arc<IdentityConfig>) -> Self {
        Self {
            repo,
            issuer,
            config,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> IdentityResult<AuthOutput> {
        let resolver = IdentityResolver::new(self.repo.clone(), self.config.principal_resolution);
        let raw_password = RawPassword::new(input.password);

        let account = match resolver.resolve(&input.principal).await? {
            Resolution::Unique(account) => account,
            Resolution::Ambiguous { .. } | Resolution::NotFound => {
                // Spend roughly the same time as a real verification
                AccountPassword::from_raw(&raw_password, self.config.pepper())?;
                return Err(IdentityError::InvalidCredentials);
            }
        };

        if !account
            .password_hash
            .verify(&raw_password, self.config.pepper())?
        {
            tracing::warn!(account_id = %account.account_id, "Password mismatch on login");
            return Err(IdentityError::InvalidCredentials);
        }

        tracing::info!(account_id = %account.account_id, "Account signed in");

        AuthOutput::issue_for(self.issuer.as_ref(), &account)
    }
}
