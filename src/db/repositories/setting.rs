use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::site_settings;

pub use crate::entities::site_settings::Model as SiteSetting;

/// Upsert payload for a site setting.
#[derive(Debug, Clone)]
pub struct SettingInput {
    pub key: String,
    pub value: Option<String>,
    pub description: Option<String>,
    pub category: String,
    pub setting_type: String,
}

pub struct SettingRepository {
    conn: DatabaseConnection,
}

impl SettingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, key: &str) -> Result<Option<SiteSetting>> {
        site_settings::Entity::find()
            .filter(site_settings::Column::Key.eq(key))
            .one(&self.conn)
            .await
            .context("Failed to query site setting")
    }

    pub async fn get_by_category(&self, category: &str) -> Result<Vec<SiteSetting>> {
        site_settings::Entity::find()
            .filter(site_settings::Column::Category.eq(category))
            .order_by_asc(site_settings::Column::Key)
            .all(&self.conn)
            .await
            .context("Failed to query settings by category")
    }

    pub async fn list_all(&self) -> Result<Vec<SiteSetting>> {
        site_settings::Entity::find()
            .order_by_asc(site_settings::Column::Category)
            .order_by_asc(site_settings::Column::Key)
            .all(&self.conn)
            .await
            .context("Failed to list site settings")
    }

    /// Create the setting if its key is new, otherwise update it in place.
    pub async fn save(&self, input: SettingInput) -> Result<SiteSetting> {
        let now = chrono::Utc::now().to_rfc3339();

        if let Some(existing) = self.get(&input.key).await? {
            let mut active: site_settings::ActiveModel = existing.into();
            active.value = Set(input.value);
            active.description = Set(input.description);
            active.category = Set(input.category);
            active.setting_type = Set(input.setting_type);
            active.updated_at = Set(now);

            active
                .update(&self.conn)
                .await
                .context("Failed to update site setting")
        } else {
            let active = site_settings::ActiveModel {
                key: Set(input.key),
                value: Set(input.value),
                description: Set(input.description),
                category: Set(input.category),
                setting_type: Set(input.setting_type),
                updated_at: Set(now),
                ..Default::default()
            };

            active
                .insert(&self.conn)
                .await
                .context("Failed to insert site setting")
        }
    }
}
