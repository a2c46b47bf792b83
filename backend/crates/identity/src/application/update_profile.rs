//! Update Profile Use Case
//!
//! Owners may edit their own profile; administrators may edit any.
//! Ownership is decided by the token's account id.

use std::sync::Arc;

use crate::application::config::{IdentityConfig, UsernamePolicy};
use crate::application::output::AccountView;
use crate::domain::entity::account::{Account, ProfileChanges};
use crate::domain::repository::AccountRepository;
use crate::domain::token::TokenClaims;
use crate::domain::value_object::{account_id::AccountId, role::Role, username::Username};
use crate::error::{IdentityError, IdentityResult};

/// Blank or absent fields are left unchanged
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub account_id: String,
    pub username: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
}

pub struct UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<IdentityConfig>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<IdentityConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        actor: &TokenClaims,
        input: UpdateProfileInput,
    ) -> IdentityResult<AccountView> {
        let account_id =
            AccountId::parse(input.account_id.trim()).ok_or(IdentityError::AccountNotFound)?;

        let mut account = self
            .repo
            .find_by_id(&account_id)
            .await?
            .ok_or(IdentityError::AccountNotFound)?;

        authorize(actor, &account)?;

        let username = match non_blank(input.username) {
            Some(raw) => {
                let username = Username::new(raw)?;
                if username != account.username
                    && self.config.username_policy == UsernamePolicy::RequireUnique
                    && self.repo.exists_by_username(&username).await?
                {
                    return Err(IdentityError::UsernameTaken);
                }
                Some(username)
            }
            None => None,
        };

        account.update_profile(ProfileChanges {
            username,
            phone_number: non_blank(input.phone_number),
            address: non_blank(input.address),
            image_url: non_blank(input.image_url),
        });
        self.repo.update(&account).await?;

        tracing::info!(
            account_id = %account.account_id,
            actor = %actor.principal,
            "Profile updated"
        );

        Ok(AccountView::from(&account))
    }
}

fn authorize(actor: &TokenClaims, account: &Account) -> IdentityResult<()> {
    if Role::from_authority(&actor.authority) == Some(Role::Admin) {
        return Ok(());
    }

    match AccountId::parse(&actor.account_id) {
        Some(own) if own == account.account_id => Ok(()),
        _ => Err(IdentityError::Forbidden),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
