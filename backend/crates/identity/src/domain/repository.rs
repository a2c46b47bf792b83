//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{account_id::AccountId, email::Email, username::Username};
use crate::error::IdentityResult;

/// Account repository trait
///
/// `create` and `update` together form the store's "save". The store is the
/// authority on email uniqueness: `create` fails with `EmailInUse` when the
/// email (compared case-insensitively) is already held, whatever callers
/// checked beforehand.
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account
    async fn create(&self, account: &Account) -> IdentityResult<()>;

    /// Overwrite an existing account; `AccountNotFound` if it is gone
    async fn update(&self, account: &Account) -> IdentityResult<()>;

    async fn find_by_id(&self, account_id: &AccountId) -> IdentityResult<Option<Account>>;

    /// Exact match. With duplicate usernames the earliest-created account wins.
    async fn find_by_username(&self, username: &Username) -> IdentityResult<Option<Account>>;

    /// Exact, case-sensitive match on the stored email
    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<Account>>;

    /// Case-insensitive match on the stored email
    async fn find_by_email_ci(&self, email: &str) -> IdentityResult<Option<Account>>;

    /// Case-insensitive existence check
    async fn exists_by_email(&self, email: &Email) -> IdentityResult<bool>;

    async fn exists_by_username(&self, username: &Username) -> IdentityResult<bool>;

    /// Every account, earliest-created first
    async fn list(&self) -> IdentityResult<Vec<Account>>;
}
