//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;

use crate::config::SecurityConfig;
use crate::db::{Store, User};
use crate::services::auth_service::{AuthError, AuthService, Registration, UserInfo};

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }
}

fn to_user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        email: user.email,
        is_admin: user.is_admin,
        created_at: user.created_at,
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, registration: Registration) -> Result<UserInfo, AuthError> {
        let existing = self
            .store
            .get_user_by_username(&registration.username)
            .await?;

        if existing.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        // Every registrant is an admin for now; see the open question in
        // DESIGN.md before adding a public sign-up flow.
        let created = self
            .store
            .create_user(
                &registration.username,
                &registration.password,
                &registration.email,
                true,
                &self.security,
            )
            .await;

        match created {
            Ok(user) => Ok(to_user_info(user)),
            // The check above races with concurrent registrations; the
            // unique constraint on username is the final arbiter.
            Err(e) if e.to_string().contains("UNIQUE constraint failed") => {
                Err(AuthError::UsernameTaken)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<UserInfo, AuthError> {
        let is_valid = self.store.verify_user_password(username, password).await?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(to_user_info(user))
    }

    async fn get_user(&self, id: i32) -> Result<Option<UserInfo>, AuthError> {
        let user = self.store.get_user(id).await?;
        Ok(user.map(to_user_info))
    }
}
