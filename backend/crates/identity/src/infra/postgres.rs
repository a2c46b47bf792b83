//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, email::Email, provider::Provider,
    role::Role, username::Username,
};
use crate::error::{IdentityError, IdentityResult};

const SELECT_ACCOUNT: &str = r#"
    SELECT
        account_id,
        username,
        email,
        password_hash,
        role,
        provider,
        image_url,
        phone_number,
        address,
        created_at,
        updated_at
    FROM accounts
"#;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        value: &str,
    ) -> IdentityResult<Option<Account>> {
        let sql = format!(
            "{SELECT_ACCOUNT} WHERE {condition} ORDER BY created_at, account_id LIMIT 1"
        );

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> IdentityResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                username,
                email,
                password_hash,
                role,
                provider,
                image_url,
                phone_number,
                address,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.role.code())
        .bind(account.provider.as_str())
        .bind(account.image_url.as_deref())
        .bind(account.phone_number.as_deref())
        .bind(account.address.as_deref())
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, account: &Account) -> IdentityResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE accounts SET
                username = $2,
                email = $3,
                password_hash = $4,
                role = $5,
                provider = $6,
                image_url = $7,
                phone_number = $8,
                address = $9,
                updated_at = $10
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.role.code())
        .bind(account.provider.as_str())
        .bind(account.image_url.as_deref())
        .bind(account.phone_number.as_deref())
        .bind(account.address.as_deref())
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(IdentityError::AccountNotFound);
        }

        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> IdentityResult<Option<Account>> {
        let sql = format!("{SELECT_ACCOUNT} WHERE account_id = $1");

        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(account_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> IdentityResult<Option<Account>> {
        self.fetch_one_where("username = $1", username.as_str()).await
    }

    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<Account>> {
        self.fetch_one_where("email = $1", email).await
    }

    async fn find_by_email_ci(&self, email: &str) -> IdentityResult<Option<Account>> {
        self.fetch_one_where("lower(email) = lower($1)", email.trim())
            .await
    }

    async fn exists_by_email(&self, email: &Email) -> IdentityResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE lower(email) = lower($1))",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_username(&self, username: &Username) -> IdentityResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)",
        )
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self) -> IdentityResult<Vec<Account>> {
        let sql = format!("{SELECT_ACCOUNT} ORDER BY created_at, account_id");

        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    provider: String,
    image_url: Option<String>,
    phone_number: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> IdentityResult<Account> {
        let role = Role::from_code(&self.role).ok_or_else(|| {
            IdentityError::InternalConsistency(format!(
                "account {} has unknown role {:?}",
                self.account_id, self.role
            ))
        })?;

        let password_hash = AccountPassword::from_phc_string(self.password_hash).map_err(|_| {
            IdentityError::InternalConsistency(format!(
                "account {} has a malformed password hash",
                self.account_id
            ))
        })?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            username: Username::from_db(self.username),
            email: Email::from_db(self.email),
            password_hash,
            role,
            provider: Provider::from_db(self.provider),
            image_url: self.image_url,
            phone_number: self.phone_number,
            address: self.address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::account_password::RawPassword;

    fn row(role: &str, password_hash: String) -> AccountRow {
        let now = Utc::now();
        AccountRow {
            account_id: Uuid::new_v4(),
            username: "alice".into(),
            email: "Alice@X.com".into(),
            password_hash,
            role: role.into(),
            provider: "local".into(),
            image_url: None,
            phone_number: Some("555-0100".into()),
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn phc() -> String {
        AccountPassword::from_raw(&RawPassword::new("pw"), None)
            .unwrap()
            .as_phc_string()
            .to_string()
    }

    #[test]
    fn test_row_into_account() {
        let account = row("CUSTOMER", phc()).into_account().unwrap();
        assert_eq!(account.role, Role::Customer);
        // Stored case is preserved for legacy rows
        assert_eq!(account.email.as_str(), "Alice@X.com");
        assert_eq!(account.phone_number.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_row_with_unknown_role() {
        let result = row("SUPERUSER", phc()).into_account();
        assert!(matches!(result, Err(IdentityError::InternalConsistency(_))));
    }

    #[test]
    fn test_row_with_corrupt_hash() {
        let result = row("ADMIN", "plaintext".into()).into_account();
        assert!(matches!(result, Err(IdentityError::InternalConsistency(_))));
    }
}
