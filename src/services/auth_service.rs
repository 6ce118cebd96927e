//! Domain service for authentication and account management.
//!
//! Handles registration, credential verification, and current-user lookup.
//! Session issuance itself lives at the HTTP layer (tower-sessions).

use serde::Serialize;
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// User info DTO for responses. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: String,
}

/// New-account request, already validated at the API layer.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub email: String,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a new account and returns its info.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UsernameTaken`] when the username is in use.
    async fn register(&self, registration: Registration) -> Result<UserInfo, AuthError>;

    /// Verifies credentials and returns the matching user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] on any mismatch; the error
    /// does not distinguish an unknown username from a wrong password.
    async fn login(&self, username: &str, password: &str) -> Result<UserInfo, AuthError>;

    /// Looks up a user by id. `Ok(None)` means the account no longer exists.
    async fn get_user(&self, id: i32) -> Result<Option<UserInfo>, AuthError>;
}
