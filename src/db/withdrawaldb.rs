// db/withdrawaldb.rs
use async_trait::async_trait;
use sqlx::{Error, Postgres, Transaction};

use super::db::DBClient;
use crate::models::withdrawalmodel::{Network, Withdrawal, WithdrawalStatus};

const WITHDRAWAL_COLUMNS: &str = "id, user_id, amount, network, address, status, created_at";

/// Lock a withdrawal row for the remainder of the transaction.
pub async fn fetch_withdrawal_for_update(
    tx: &mut Transaction<'_, Postgres>,
    id: i64,
) -> Result<Option<Withdrawal>, Error> {
    sqlx::query_as::<_, Withdrawal>(&format!(
        "SELECT {WITHDRAWAL_COLUMNS} FROM withdrawals WHERE id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(&mut **tx)
    .await
}

#[async_trait]
pub trait WithdrawalExt {
    async fn insert_withdrawal(
        &self,
        user_id: i64,
        amount: f64,
        network: Network,
        address: &str,
    ) -> Result<Withdrawal, Error>;

    async fn pending_withdrawals(&self) -> Result<Vec<Withdrawal>, Error>;

    async fn user_withdrawals(&self, user_id: i64, limit: i64) -> Result<Vec<Withdrawal>, Error>;
}

#[async_trait]
impl WithdrawalExt for DBClient {
    async fn insert_withdrawal(
        &self,
        user_id: i64,
        amount: f64,
        network: Network,
        address: &str,
    ) -> Result<Withdrawal, Error> {
        sqlx::query_as::<_, Withdrawal>(&format!(
            r#"
            INSERT INTO withdrawals (user_id, amount, network, address)
            VALUES ($1, $2, $3, $4)
            RETURNING {WITHDRAWAL_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(amount)
        .bind(network)
        .bind(address)
        .fetch_one(&self.pool)
        .await
    }

    async fn pending_withdrawals(&self) -> Result<Vec<Withdrawal>, Error> {
        sqlx::query_as::<_, Withdrawal>(&format!(
            "SELECT {WITHDRAWAL_COLUMNS} FROM withdrawals WHERE status = $1 ORDER BY created_at"
        ))
        .bind(WithdrawalStatus::Pending)
        .fetch_all(&self.pool)
        .await
    }

    async fn user_withdrawals(&self, user_id: i64, limit: i64) -> Result<Vec<Withdrawal>, Error> {
        sqlx::query_as::<_, Withdrawal>(&format!(
            r#"
            SELECT {WITHDRAWAL_COLUMNS} FROM withdrawals
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
}
