// models/usermodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered participant. `user_id` is the external chat identity
/// and never changes; `referred_by` is set once at creation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    pub display_name: String,
    pub balance: f64,
    pub referred_by: Option<i64>,
    pub counted_for_referrer: bool,
    pub counted_referrals: i64,
    pub total_referrals: i64,
    pub has_deposited: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
