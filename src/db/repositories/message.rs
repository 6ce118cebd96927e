use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

use crate::entities::contact_messages;

pub use crate::entities::contact_messages::Model as ContactMessage;

pub struct MessageRepository {
    conn: DatabaseConnection,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// List messages, newest first.
    pub async fn list(
        &self,
        limit: Option<u64>,
        unread_only: bool,
    ) -> Result<Vec<ContactMessage>> {
        let mut query = contact_messages::Entity::find()
            .order_by_desc(contact_messages::Column::CreatedAt);

        if unread_only {
            query = query.filter(contact_messages::Column::Read.eq(false));
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }

        query
            .all(&self.conn)
            .await
            .context("Failed to list contact messages")
    }

    pub async fn get(&self, id: i32) -> Result<Option<ContactMessage>> {
        contact_messages::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query contact message")
    }

    pub async fn create(
        &self,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<ContactMessage> {
        let active = contact_messages::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            subject: Set(subject.to_string()),
            message: Set(message.to_string()),
            read: Set(false),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert contact message")
    }

    /// Returns false when the message does not exist.
    pub async fn mark_read(&self, id: i32) -> Result<bool> {
        let Some(existing) = contact_messages::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query message for read update")?
        else {
            return Ok(false);
        };

        let mut active: contact_messages::ActiveModel = existing.into();
        active.read = Set(true);
        active
            .update(&self.conn)
            .await
            .context("Failed to mark message as read")?;

        Ok(true)
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = contact_messages::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete contact message")?;

        Ok(result.rows_affected > 0)
    }
}
