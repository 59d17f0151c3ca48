// db/notificationdb.rs
use async_trait::async_trait;
use sqlx::Error;

use super::db::DBClient;
use crate::models::notificationmodel::Notification;

#[async_trait]
pub trait NotificationExt {
    async fn insert_notification(
        &self,
        user_id: i64,
        kind: &str,
        body: &str,
    ) -> Result<Notification, Error>;

    async fn user_notifications(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<Notification>, Error>;
}

#[async_trait]
impl NotificationExt for DBClient {
    async fn insert_notification(
        &self,
        user_id: i64,
        kind: &str,
        body: &str,
    ) -> Result<Notification, Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, kind, body)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, kind, body, created_at
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(body)
        .fetch_one(&self.pool)
        .await
    }

    async fn user_notifications(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<Notification>, Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, kind, body, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }
}
