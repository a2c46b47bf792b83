//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

/// Name of the unique constraint guarding `accounts.email`
pub(crate) const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Another account already holds this email
    #[error("Email is already in use")]
    EmailInUse,

    /// Another account already holds this username
    #[error("Username is already taken")]
    UsernameTaken,

    /// Unknown principal or wrong password; the two are deliberately the same
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not found")]
    AccountNotFound,

    /// Current password did not match during a password change
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// Malformed email, username, role code or a password policy violation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing, malformed, expired or forged bearer token
    #[error("Authentication required")]
    Unauthorized,

    /// Authenticated, but the token's authority is insufficient
    #[error("Insufficient authority")]
    Forbidden,

    /// Token could not be signed
    #[error("Token error: {0}")]
    Token(String),

    /// A stored record or a just-written record is not what it must be
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    /// The identity store could not be reached or failed mid-operation
    #[error("Identity store unavailable: {0}")]
    StoreUnavailable(String),
}

impl IdentityError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::EmailInUse | IdentityError::UsernameTaken => ErrorKind::Conflict,
            IdentityError::InvalidCredentials | IdentityError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            IdentityError::AccountNotFound => ErrorKind::NotFound,
            IdentityError::IncorrectPassword | IdentityError::InvalidInput(_) => {
                ErrorKind::BadRequest
            }
            IdentityError::Forbidden => ErrorKind::Forbidden,
            IdentityError::Token(_) | IdentityError::InternalConsistency(_) => {
                ErrorKind::InternalServerError
            }
            IdentityError::StoreUnavailable(_) => ErrorKind::ServiceUnavailable,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side details stay in the logs; the caller only sees a generic
    /// message for 5xx errors.
    pub fn to_app_error(&self) -> AppError {
        match self {
            IdentityError::EmailInUse => AppError::conflict(self.to_string())
                .with_action("Sign in instead, or register with another email address"),
            IdentityError::UsernameTaken => AppError::conflict(self.to_string()),
            IdentityError::InvalidCredentials => AppError::unauthorized(self.to_string())
                .with_action("Check your username or email and password"),
            IdentityError::Unauthorized => AppError::unauthorized(self.to_string())
                .with_action("Send a valid bearer token in the Authorization header"),
            IdentityError::AccountNotFound => AppError::not_found(self.to_string()),
            IdentityError::IncorrectPassword | IdentityError::InvalidInput(_) => {
                AppError::bad_request(self.to_string())
            }
            IdentityError::Token(_) | IdentityError::InternalConsistency(_) => {
                AppError::internal("Internal server error")
            }
            IdentityError::StoreUnavailable(_) => {
                AppError::new(self.kind(), "Identity store is temporarily unavailable")
                    .with_action("Retry later")
            }
            IdentityError::Forbidden => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::StoreUnavailable(msg) => {
                tracing::error!(message = %msg, "Identity store error");
            }
            IdentityError::InternalConsistency(msg) => {
                tracing::error!(message = %msg, "Identity consistency error");
            }
            IdentityError::Token(msg) => {
                tracing::error!(message = %msg, "Token signing error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            IdentityError::Forbidden => {
                tracing::warn!("Request rejected for insufficient authority");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for IdentityError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => IdentityError::InvalidInput(err.message().to_string()),
            _ => IdentityError::InternalConsistency(err.to_string()),
        }
    }
}

impl From<PasswordPolicyError> for IdentityError {
    fn from(err: PasswordPolicyError) -> Self {
        IdentityError::InvalidInput(err.to_string())
    }
}

impl From<PasswordHashError> for IdentityError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::InvalidHashFormat => {
                IdentityError::InternalConsistency("stored password digest is malformed".into())
            }
            PasswordHashError::HashingFailed(msg) => IdentityError::InternalConsistency(msg),
        }
    }
}

impl From<sqlx::Error> for IdentityError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
            {
                return IdentityError::EmailInUse;
            }
        }

        match err {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                IdentityError::InternalConsistency(err.to_string())
            }
            other => IdentityError::StoreUnavailable(other.to_string()),
        }
    }
}
