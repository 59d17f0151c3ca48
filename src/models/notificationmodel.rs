// models/notificationmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outbound message queued for the presentation collaborator to deliver.
/// Rows here are best-effort; financial state never depends on them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub kind: String,
    pub body: String,
    pub created_at: Option<DateTime<Utc>>,
}
