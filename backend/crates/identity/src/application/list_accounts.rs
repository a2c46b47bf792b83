//! List Accounts Use Case
//!
//! Administrative listing. Authorization (`ROLE_ADMIN`) is enforced by the
//! route guard.

use std::sync::Arc;

use crate::application::output::AccountView;
use crate::domain::repository::AccountRepository;
use crate::error::IdentityResult;

pub struct ListAccountsUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> ListAccountsUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Public views of all accounts, earliest-created first
    pub async fn execute(&self) -> IdentityResult<Vec<AccountView>> {
        let accounts = self.repo.list().await?;
        Ok(accounts.iter().map(AccountView::from).collect())
    }
}
