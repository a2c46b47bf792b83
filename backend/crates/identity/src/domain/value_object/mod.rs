//! Value Object Module

pub mod account_id;
pub mod account_password;
pub mod email;
pub mod provider;
pub mod role;
pub mod username;
