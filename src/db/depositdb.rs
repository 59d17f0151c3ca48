// db/depositdb.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Error, Postgres, Transaction};

use super::db::DBClient;
use crate::models::depositmodel::{Chain, Deposit, DepositStatus};

const DEPOSIT_COLUMNS: &str =
    "id, user_id, amount, chain, txid, status, payout_multiplier, created_at, paid_at";

/// Lock a deposit row for the remainder of the transaction.
pub async fn fetch_deposit_for_update(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
) -> Result<Option<Deposit>, Error> {
    sqlx::query_as::<_, Deposit>(&format!(
        "SELECT {DEPOSIT_COLUMNS} FROM deposits WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await
}

#[async_trait]
pub trait DepositExt {
    async fn insert_deposit(
        &self,
        user_id: i64,
        amount: f64,
        chain: Chain,
        txid: &str,
    ) -> Result<Deposit, Error>;

    async fn pending_deposits(&self) -> Result<Vec<Deposit>, Error>;

    async fn user_deposits(&self, user_id: i64, limit: i64) -> Result<Vec<Deposit>, Error>;

    /// APPROVED deposits whose maturation window has elapsed and whose
    /// payout has not been credited yet.
    async fn matured_deposits(&self, cutoff: DateTime<Utc>) -> Result<Vec<Deposit>, Error>;
}

#[async_trait]
impl DepositExt for DBClient {
    async fn insert_deposit(
        &self,
        user_id: i64,
        amount: f64,
        chain: Chain,
        txid: &str,
    ) -> Result<Deposit, Error> {
        sqlx::query_as::<_, Deposit>(&format!(
            r#"
            INSERT INTO deposits (user_id, amount, chain, txid)
            VALUES ($1, $2, $3, $4)
            RETURNING {DEPOSIT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(amount)
        .bind(chain)
        .bind(txid)
        .fetch_one(&self.pool)
        .await
    }

    async fn pending_deposits(&self) -> Result<Vec<Deposit>, Error> {
        sqlx::query_as::<_, Deposit>(&format!(
            "SELECT {DEPOSIT_COLUMNS} FROM deposits WHERE status = $1 ORDER BY created_at"
        ))
        .bind(DepositStatus::Pending)
        .fetch_all(&self.pool)
        .await
    }

    async fn user_deposits(&self, user_id: i64, limit: i64) -> Result<Vec<Deposit>, Error> {
        sqlx::query_as::<_, Deposit>(&format!(
            r#"
            SELECT {DEPOSIT_COLUMNS} FROM deposits
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn matured_deposits(&self, cutoff: DateTime<Utc>) -> Result<Vec<Deposit>, Error> {
        sqlx::query_as::<_, Deposit>(&format!(
            r#"
            SELECT {DEPOSIT_COLUMNS} FROM deposits
            WHERE status = $1 AND paid_at IS NULL AND created_at <= $2
            ORDER BY created_at
            "#
        ))
        .bind(DepositStatus::Approved)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
    }
}
