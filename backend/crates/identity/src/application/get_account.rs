//! Get Account Use Case

use std::sync::Arc;

use crate::application::output::AccountView;
use crate::domain::repository::AccountRepository;
use crate::domain::token::TokenClaims;
use crate::domain::value_object::account_id::AccountId;
use crate::error::{IdentityError, IdentityResult};

pub struct GetAccountUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
}

impl<R> GetAccountUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn by_id(&self, account_id: &str) -> IdentityResult<AccountView> {
        let account_id =
            AccountId::parse(account_id.trim()).ok_or(IdentityError::AccountNotFound)?;

        self.repo
            .find_by_id(&account_id)
            .await?
            .map(|account| AccountView::from(&account))
            .ok_or(IdentityError::AccountNotFound)
    }

    /// The account a token was issued for
    ///
    /// Goes by the id claim: the username in `principal` may be shared.
    pub async fn for_claims(&self, claims: &TokenClaims) -> IdentityResult<AccountView> {
        self.by_id(&claims.account_id).await
    }
}
