//! Application Layer
//!
//! Use cases and application services.

pub mod assign_role;
pub mod change_password;
pub mod config;
pub mod get_account;
pub mod list_accounts;
pub mod login;
pub mod output;
pub mod provision_admin;
pub mod register;
pub mod social_login;
pub mod update_profile;

// Re-exports
pub use assign_role::{AssignRoleInput, AssignRoleUseCase};
pub use change_password::{ChangePasswordInput, ChangePasswordUseCase};
pub use config::IdentityConfig;
pub use get_account::GetAccountUseCase;
pub use list_accounts::ListAccountsUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use output::{AccountView, AuthOutput};
pub use provision_admin::{
    ProvisionAdminInput, ProvisionAdminOutput, ProvisionAdminUseCase, ProvisionOutcome,
};
pub use register::{RegisterInput, RegisterUseCase};
pub use social_login::{SocialLoginInput, SocialLoginUseCase};
pub use update_profile::{UpdateProfileInput, UpdateProfileUseCase};
