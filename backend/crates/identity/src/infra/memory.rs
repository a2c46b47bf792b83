//! In-memory Account Repository
//!
//! Used by tests and local development. Email uniqueness is enforced under
//! the same write lock as the insert, mirroring the unique index in Postgres.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{account_id::AccountId, email::Email, username::Username};
use crate::error::{IdentityError, IdentityResult};

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

fn email_taken(accounts: &HashMap<Uuid, Account>, email: &str, except: Option<&Uuid>) -> bool {
    let email = email.to_lowercase();
    accounts
        .iter()
        .filter(|(id, _)| Some(*id) != except)
        .any(|(_, account)| account.email.as_str().to_lowercase() == email)
}

/// Earliest-created first, then by id, so lookups are deterministic
fn earliest<'a>(candidates: impl Iterator<Item = &'a Account>) -> Option<Account> {
    candidates
        .min_by_key(|account| (account.created_at, *account.account_id.as_uuid()))
        .cloned()
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &Account) -> IdentityResult<()> {
        let mut accounts = self.accounts.write().await;

        if email_taken(&accounts, account.email.as_str(), None) {
            return Err(IdentityError::EmailInUse);
        }

        let id = *account.account_id.as_uuid();
        if accounts.contains_key(&id) {
            return Err(IdentityError::InternalConsistency(format!(
                "duplicate account id {id}"
            )));
        }

        accounts.insert(id, account.clone());
        Ok(())
    }

    async fn update(&self, account: &Account) -> IdentityResult<()> {
        let mut accounts = self.accounts.write().await;
        let id = account.account_id.as_uuid();

        if !accounts.contains_key(id) {
            return Err(IdentityError::AccountNotFound);
        }

        if email_taken(&accounts, account.email.as_str(), Some(id)) {
            return Err(IdentityError::EmailInUse);
        }

        accounts.insert(*id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> IdentityResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(account_id.as_uuid()).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> IdentityResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(earliest(
            accounts.values().filter(|a| a.username == *username),
        ))
    }

    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(earliest(
            accounts.values().filter(|a| a.email.as_str() == email),
        ))
    }

    async fn find_by_email_ci(&self, email: &str) -> IdentityResult<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(earliest(
            accounts.values().filter(|a| a.email.eq_ignore_case(email)),
        ))
    }

    async fn exists_by_email(&self, email: &Email) -> IdentityResult<bool> {
        let accounts = self.accounts.read().await;
        Ok(email_taken(&accounts, email.as_str(), None))
    }

    async fn exists_by_username(&self, username: &Username) -> IdentityResult<bool> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.username == *username))
    }

    async fn list(&self) -> IdentityResult<Vec<Account>> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by_key(|account| (account.created_at, *account.account_id.as_uuid()));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::account_password::{AccountPassword, RawPassword};

    fn account(username: &str, email: &str) -> Account {
        let hash = AccountPassword::from_raw(&RawPassword::new("pw"), None).unwrap();
        Account::new_local(
            Username::new(username).unwrap(),
            Email::from_db(email),
            hash,
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryAccountRepository::new();
        let alice = account("alice", "alice@x.com");
        repo.create(&alice).await.unwrap();

        let found = repo.find_by_id(&alice.account_id).await.unwrap().unwrap();
        assert_eq!(found.username.as_str(), "alice");
        assert!(repo.find_by_id(&AccountId::new()).await.unwrap().is_none());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_email_in_any_case() {
        let repo = InMemoryAccountRepository::new();
        repo.create(&account("alice", "alice@x.com")).await.unwrap();

        let result = repo.create(&account("bob", "ALICE@X.COM")).await;
        assert!(matches!(result, Err(IdentityError::EmailInUse)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let repo = InMemoryAccountRepository::new();
        let result = repo.update(&account("ghost", "ghost@x.com")).await;
        assert!(matches!(result, Err(IdentityError::AccountNotFound)));
    }

    #[tokio::test]
    async fn test_email_lookups() {
        let repo = InMemoryAccountRepository::new();
        repo.create(&account("legacy", "Legacy@X.com")).await.unwrap();

        assert!(repo.find_by_email("legacy@x.com").await.unwrap().is_none());
        assert!(repo.find_by_email("Legacy@X.com").await.unwrap().is_some());
        assert!(repo.find_by_email_ci("LEGACY@x.COM").await.unwrap().is_some());
        assert!(
            repo.exists_by_email(&Email::new("legacy@x.com").unwrap())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_duplicate_usernames_resolve_to_earliest() {
        let repo = InMemoryAccountRepository::new();
        let first = account("sam", "sam1@x.com");
        let mut second = account("sam", "sam2@x.com");
        second.created_at = first.created_at + chrono::TimeDelta::seconds(1);

        repo.create(&second).await.unwrap();
        repo.create(&first).await.unwrap();

        let found = repo
            .find_by_username(&Username::new("sam").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.account_id, first.account_id);
        assert!(
            repo.exists_by_username(&Username::new("sam").unwrap())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_creation() {
        let repo = InMemoryAccountRepository::new();
        assert!(repo.list().await.unwrap().is_empty());

        let first = account("first", "first@x.com");
        let mut second = account("second", "second@x.com");
        second.created_at = first.created_at + chrono::TimeDelta::seconds(1);

        repo.create(&second).await.unwrap();
        repo.create(&first).await.unwrap();

        let ids: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.account_id)
            .collect();
        assert_eq!(ids, vec![first.account_id, second.account_id]);
    }

    #[tokio::test]
    async fn test_concurrent_creates_admit_one() {
        let repo = InMemoryAccountRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(&account(&format!("user{i}"), "race@x.com")).await
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(repo.len().await, 1);
    }
}
