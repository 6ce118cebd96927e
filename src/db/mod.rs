use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;

pub mod migrator;
pub mod repositories;

pub use repositories::case_study::{CaseStudy, CaseStudyInput, CaseStudyPatch};
pub use repositories::message::ContactMessage;
pub use repositories::setting::{SettingInput, SiteSetting};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn case_study_repo(&self) -> repositories::case_study::CaseStudyRepository {
        repositories::case_study::CaseStudyRepository::new(self.conn.clone())
    }

    fn message_repo(&self) -> repositories::message::MessageRepository {
        repositories::message::MessageRepository::new(self.conn.clone())
    }

    fn setting_repo(&self) -> repositories::setting::SettingRepository {
        repositories::setting::SettingRepository::new(self.conn.clone())
    }

    // ========== Users ==========

    pub async fn get_user(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
        is_admin: bool,
        security: &SecurityConfig,
    ) -> Result<User> {
        self.user_repo()
            .create(username, password, email, is_admin, security)
            .await
    }

    pub async fn verify_user_password(&self, username: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(username, password).await
    }

    // ========== Case studies ==========

    pub async fn list_case_studies(
        &self,
        limit: Option<u64>,
        featured: Option<bool>,
    ) -> Result<Vec<CaseStudy>> {
        self.case_study_repo().list(limit, featured).await
    }

    pub async fn get_case_study(&self, id: i32) -> Result<Option<CaseStudy>> {
        self.case_study_repo().get(id).await
    }

    pub async fn get_case_study_by_slug(&self, slug: &str) -> Result<Option<CaseStudy>> {
        self.case_study_repo().get_by_slug(slug).await
    }

    pub async fn create_case_study(&self, input: CaseStudyInput) -> Result<CaseStudy> {
        self.case_study_repo().create(input).await
    }

    pub async fn update_case_study(
        &self,
        id: i32,
        patch: CaseStudyPatch,
    ) -> Result<Option<CaseStudy>> {
        self.case_study_repo().update(id, patch).await
    }

    pub async fn delete_case_study(&self, id: i32) -> Result<bool> {
        self.case_study_repo().delete(id).await
    }

    // ========== Contact messages ==========

    pub async fn list_contact_messages(
        &self,
        limit: Option<u64>,
        unread_only: bool,
    ) -> Result<Vec<ContactMessage>> {
        self.message_repo().list(limit, unread_only).await
    }

    pub async fn get_contact_message(&self, id: i32) -> Result<Option<ContactMessage>> {
        self.message_repo().get(id).await
    }

    pub async fn create_contact_message(
        &self,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<ContactMessage> {
        self.message_repo()
            .create(name, email, subject, message)
            .await
    }

    pub async fn mark_message_read(&self, id: i32) -> Result<bool> {
        self.message_repo().mark_read(id).await
    }

    pub async fn delete_contact_message(&self, id: i32) -> Result<bool> {
        self.message_repo().delete(id).await
    }

    // ========== Site settings ==========

    pub async fn get_setting(&self, key: &str) -> Result<Option<SiteSetting>> {
        self.setting_repo().get(key).await
    }

    pub async fn get_settings_by_category(&self, category: &str) -> Result<Vec<SiteSetting>> {
        self.setting_repo().get_by_category(category).await
    }

    pub async fn list_settings(&self) -> Result<Vec<SiteSetting>> {
        self.setting_repo().list_all().await
    }

    pub async fn save_setting(&self, input: SettingInput) -> Result<SiteSetting> {
        self.setting_repo().save(input).await
    }
}
