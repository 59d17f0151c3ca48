// db/metadb.rs
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::Error;

use super::db::DBClient;

const LAUNCH_KEY: &str = "launch_ts";

#[async_trait]
pub trait MetaExt {
    /// Set the launch timestamp, the epoch of the payout decay curve,
    /// if it was never set; returns the value actually persisted (the
    /// existing one wins on conflict).
    async fn init_launch_time(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, Error>;
}

fn parse_launch(value: String) -> Option<DateTime<Utc>> {
    value
        .parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

#[async_trait]
impl MetaExt for DBClient {
    async fn init_launch_time(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, Error> {
        // Immutable once set: on conflict the stored value is kept.
        let (value,): (String,) = sqlx::query_as(
            r#"
            INSERT INTO meta (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = meta.value
            RETURNING value
            "#,
        )
        .bind(LAUNCH_KEY)
        .bind(now.timestamp().to_string())
        .fetch_one(&self.pool)
        .await?;

        parse_launch(value).ok_or_else(|| Error::Decode("corrupt launch_ts in meta".into()))
    }
}
