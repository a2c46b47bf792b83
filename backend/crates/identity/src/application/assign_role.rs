//! Assign Role Use Case
//!
//! Administrative role change. Authorization (`ROLE_ADMIN`) is enforced by
//! the route guard; this use case records who did it.

use std::sync::Arc;

use crate::application::output::AccountView;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, role::Role};
use crate::error::{IdentityError, IdentityResult};

pub struct AssignRoleInput {
    pub account_id: String,
    /// `ADMIN` or `CUSTOMER`, any case
    pub role: String,
    /// Principal of the administrator performing the change
    pub actor: String,
}

pub struct AssignRoleUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> AssignRoleUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: AssignRoleInput) -> IdentityResult<AccountView> {
        let role = Role::from_code(&input.role).ok_or_else(|| {
            IdentityError::InvalidInput(format!(
                "unknown role {:?}, expected ADMIN or CUSTOMER",
                input.role
            ))
        })?;

        let account_id =
            AccountId::parse(input.account_id.trim()).ok_or(IdentityError::AccountNotFound)?;

        let mut account = self
            .repo
            .find_by_id(&account_id)
            .await?
            .ok_or(IdentityError::AccountNotFound)?;

        let previous_role = account.role;
        if previous_role != role {
            account.set_role(role);
            self.repo.update(&account).await?;
        }

        tracing::info!(
            target: "audit",
            account_id = %account.account_id,
            actor = %input.actor,
            previous_role = %previous_role,
            role = %role,
            "Role assigned"
        );

        Ok(AccountView::from(&account))
    }
}
