//! Register Use Case
//!
//! Creates a local password account and signs it in.

use std::sync::Arc;

use crate::application::config::{IdentityConfig, UsernamePolicy};
use crate::application::output::AuthOutput;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::resolver::{IdentityResolver, Resolution};
use crate::domain::token::TokenIssuer;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    email::Email,
    username::Username,
};
use crate::error::{IdentityError, IdentityResult};

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    issuer: Arc<dyn TokenIssuer>,
    config: Arc<IdentityConfig>,
}

impl<R> RegisterUseCase<R>
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

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<AuthOutput> {
        let email = Email::new(input.email)?;
        let username = Username::new(&input.username)?;

        // Fast path only; the store's unique index has the final word
        if self.repo.exists_by_email(&email).await? {
            return Err(IdentityError::EmailInUse);
        }

        if self.config.username_policy == UsernamePolicy::RequireUnique
            && self.repo.exists_by_username(&username).await?
        {
            return Err(IdentityError::UsernameTaken);
        }

        let raw_password = RawPassword::new(input.password);
        raw_password.check(&self.config.password_policy)?;
        let password_hash = AccountPassword::from_raw(&raw_password, self.config.pepper())?;

        let account = Account::new_local(username, email, password_hash);
        self.repo.create(&account).await?;

        self.check_resolvable(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            username = %account.username,
            "Account registered"
        );

        AuthOutput::issue_for(self.issuer.as_ref(), &account)
    }

    /// The new account must be reachable by its username. It may legitimately
    /// be shadowed by an older account with the same name; the token is still
    /// built from the account just created.
    async fn check_resolvable(&self, account: &Account) -> IdentityResult<()> {
        let resolver = IdentityResolver::new(self.repo.clone(), self.config.principal_resolution);

        match resolver.resolve(account.username.as_str()).await? {
            Resolution::NotFound => Err(IdentityError::InternalConsistency(format!(
                "account {} cannot be resolved right after creation",
                account.account_id
            ))),
            Resolution::Unique(found) if found.account_id != account.account_id => {
                tracing::warn!(
                    account_id = %account.account_id,
                    shadowed_by = %found.account_id,
                    "Registered username is shadowed by an older account"
                );
                Ok(())
            }
            Resolution::Ambiguous { .. } => {
                tracing::warn!(
                    account_id = %account.account_id,
                    "Registered username is ambiguous with another account's email"
                );
                Ok(())
            }
            Resolution::Unique(_) => Ok(()),
        }
    }
}
