//! Account Entity
//!
//! The only entity of the identity core: who someone is, how they prove it,
//! and what they may do.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, email::Email, provider::Provider,
    role::Role, username::Username,
};

/// Account entity
///
/// `account_id` never changes after creation and `password_hash` is always
/// a usable PHC string; federated accounts hold the hash of a random secret.
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    /// Display name, also accepted as a login principal
    pub username: Username,
    /// Canonical identifier; unique across accounts
    pub email: Email,
    pub password_hash: AccountPassword,
    pub role: Role,
    pub provider: Provider,
    pub image_url: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields an account owner may change; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<Username>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
}

impl Account {
    fn new(
        username: Username,
        email: Email,
        password_hash: AccountPassword,
        role: Role,
        provider: Provider,
        image_url: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            account_id: AccountId::new(),
            username,
            email,
            password_hash,
            role,
            provider,
            image_url,
            phone_number: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Self-registered password account
    pub fn new_local(username: Username, email: Email, password_hash: AccountPassword) -> Self {
        Self::new(
            username,
            email,
            password_hash,
            Role::Customer,
            Provider::local(),
            None,
        )
    }

    /// First sign-in through a federated provider
    pub fn new_federated(
        username: Username,
        email: Email,
        password_hash: AccountPassword,
        provider: Provider,
        image_url: Option<String>,
    ) -> Self {
        Self::new(
            username,
            email,
            password_hash,
            Role::Customer,
            provider,
            image_url,
        )
    }

    /// Provisioned administrator; the username is the email
    pub fn new_admin(email: Email, password_hash: AccountPassword) -> Self {
        let username = Username::from_db(email.as_str());
        Self::new(
            username,
            email,
            password_hash,
            Role::Admin,
            Provider::local(),
            None,
        )
    }

    /// Authority string for tokens
    pub fn authority(&self) -> &'static str {
        self.role.authority()
    }

    pub fn set_password(&mut self, password_hash: AccountPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Copy provider and picture from a fresh federated claim
    pub fn refresh_federated_profile(&mut self, provider: Provider, image_url: Option<String>) {
        self.provider = provider;
        if image_url.is_some() {
            self.image_url = image_url;
        }
        self.updated_at = Utc::now();
    }

    pub fn update_profile(&mut self, changes: ProfileChanges) {
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(phone_number) = changes.phone_number {
            self.phone_number = Some(phone_number);
        }
        if let Some(address) = changes.address {
            self.address = Some(address);
        }
        if let Some(image_url) = changes.image_url {
            self.image_url = Some(image_url);
        }
        self.updated_at = Utc::now();
    }
}
