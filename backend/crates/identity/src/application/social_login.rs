//! Social Login Use Case
//!
//! Signs in an identity vouched for by a federated provider, creating the
//! account on first sight. Idempotent per email: repeated calls, including
//! concurrent first calls, end up on the same account.
//!
//! Under `UsernamePolicy::RequireUnique` a taken display name gets a numeric
//! suffix (`carol`, `carol2`, `carol3`, ...).

use std::sync::Arc;

use crate::application::config::{IdentityConfig, SocialProfilePolicy, UsernamePolicy};
use crate::application::output::AuthOutput;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::token::TokenIssuer;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    email::Email,
    provider::Provider,
    username::Username,
};
use crate::error::{IdentityError, IdentityResult};

/// Leaves room for the numeric suffix within the username length limit
const USERNAME_STEM_LEN: usize = 90;
const MAX_USERNAME_SUFFIX: u32 = 99;

/// Identity claim from a federated provider
pub struct SocialLoginInput {
    pub email: String,
    /// Display name; falls back to the email's local part
    pub username: Option<String>,
    pub provider: String,
    pub image_url: Option<String>,
}

pub struct SocialLoginUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    issuer: Arc<dyn TokenIssuer>,
    config: Arc<IdentityConfig>,
}

impl<R> SocialLoginUseCase<R>
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

    pub async fn execute(&self, input: SocialLoginInput) -> IdentityResult<AuthOutput> {
        let email = Email::new(input.email)?;
        let provider = Provider::federated(&input.provider)?;
        let image_url = input
            .image_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let account = match self.repo.find_by_email_ci(email.as_str()).await? {
            Some(existing) => self.reuse(existing, provider, image_url).await?,
            None => {
                let username = display_name(input.username.as_deref(), &email)?;
                self.create(username, email, provider, image_url).await?
            }
        };

        AuthOutput::issue_for(self.issuer.as_ref(), &account)
    }

    async fn reuse(
        &self,
        mut account: Account,
        provider: Provider,
        image_url: Option<String>,
    ) -> IdentityResult<Account> {
        if self.config.social_profile_policy == SocialProfilePolicy::RefreshOnLogin {
            account.refresh_federated_profile(provider, image_url);
            self.repo.update(&account).await?;
        }

        tracing::info!(
            account_id = %account.account_id,
            provider = %account.provider,
            "Social sign-in"
        );

        Ok(account)
    }

    async fn create(
        &self,
        username: Username,
        email: Email,
        provider: Provider,
        image_url: Option<String>,
    ) -> IdentityResult<Account> {
        let username = self.available_username(username).await?;
        let password_hash = AccountPassword::from_raw(&RawPassword::unusable(), self.config.pepper())?;
        let account = Account::new_federated(username, email, password_hash, provider, image_url);

        match self.repo.create(&account).await {
            Ok(()) => {
                tracing::info!(
                    account_id = %account.account_id,
                    provider = %account.provider,
                    "Social account created"
                );
                Ok(account)
            }
            Err(IdentityError::EmailInUse) => {
                // Lost a race against a concurrent first sign-in
                let winner = self
                    .repo
                    .find_by_email_ci(account.email.as_str())
                    .await?
                    .ok_or_else(|| {
                        IdentityError::InternalConsistency(
                            "email reported in use but no account holds it".to_string(),
                        )
                    })?;
                tracing::debug!(account_id = %winner.account_id, "Reusing concurrently created account");
                Ok(winner)
            }
            Err(e) => Err(e),
        }
    }

    async fn available_username(&self, wanted: Username) -> IdentityResult<Username> {
        if self.config.username_policy == UsernamePolicy::AllowDuplicates
            || !self.repo.exists_by_username(&wanted).await?
        {
            return Ok(wanted);
        }

        let stem: String = wanted.as_str().chars().take(USERNAME_STEM_LEN).collect();
        for suffix in 2..=MAX_USERNAME_SUFFIX {
            let candidate = Username::new(format!("{stem}{suffix}"))?;
            if !self.repo.exists_by_username(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(IdentityError::UsernameTaken)
    }
}

fn display_name(claimed: Option<&str>, email: &Email) -> IdentityResult<Username> {
    match claimed.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => Ok(Username::new(name)?),
        None => {
            let local_part = email.as_str().split('@').next().unwrap_or(email.as_str());
            Ok(Username::new(local_part)?)
        }
    }
}
