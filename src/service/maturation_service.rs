// service/maturation_service.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::{
    config::Config,
    db::db::DBClient,
    db::depositdb::{fetch_deposit_for_update, DepositExt},
    db::userdb::credit_balance,
    models::depositmodel::DepositStatus,
    service::error::ServiceError,
    service::multiplier::{effective_multiplier, PayoutCurve},
    service::notification_service::NotificationService,
    utils::money::round_amount,
};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MaturedPayout {
    pub deposit_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub multiplier: f64,
    pub payout: f64,
}

#[derive(Debug, Clone)]
pub struct MaturationService {
    db_client: Arc<DBClient>,
    curve: PayoutCurve,
    payout_seconds: i64,
    notification_service: Arc<NotificationService>,
}

impl MaturationService {
    pub fn new(
        db_client: Arc<DBClient>,
        config: &Config,
        curve: PayoutCurve,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            db_client,
            curve,
            payout_seconds: config.payout_seconds,
            notification_service,
        }
    }

    /// Settle every approved, unpaid deposit submitted at or before
    /// `now - payout_seconds`. Each deposit settles in its own
    /// transaction; one failure is logged and does not stop the sweep.
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<Vec<MaturedPayout>, ServiceError> {
        let cutoff = now - Duration::seconds(self.payout_seconds);
        let due = self.db_client.matured_deposits(cutoff).await?;
        if due.is_empty() {
            return Ok(Vec::new());
        }
        tracing::info!("maturation sweep: {} deposit(s) due", due.len());

        let mut settled = Vec::with_capacity(due.len());
        for deposit in due {
            match self.settle(deposit.id, now).await {
                Ok(Some(payout)) => settled.push(payout),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!("maturation: deposit #{} failed: {}", deposit.id, e);
                }
            }
        }
        Ok(settled)
    }

    /// Credit one matured deposit. Re-checks state under lock so a
    /// deposit paid or rejected since the sweep's snapshot is skipped.
    async fn settle(
        &self,
        deposit_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<MaturedPayout>, ServiceError> {
        let _writer = self.db_client.acquire_writer().await;
        let mut tx = self.db_client.pool.begin().await?;

        let deposit = fetch_deposit_for_update(&mut tx, deposit_id)
            .await?
            .ok_or(ServiceError::DepositNotFound(deposit_id))?;
        if deposit.status != DepositStatus::Approved || deposit.paid_at.is_some() {
            return Ok(None);
        }

        let multiplier = effective_multiplier(deposit.payout_multiplier, self.curve.at(now));
        let payout = round_amount(deposit.amount * multiplier);

        credit_balance(&mut tx, deposit.user_id, payout).await?;
        sqlx::query("UPDATE deposits SET status = $2, paid_at = $3 WHERE id = $1")
            .bind(deposit_id)
            .bind(DepositStatus::Paid)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(
            "deposit #{} matured: user {} credited ${:.2} ({}x on ${:.2})",
            deposit_id,
            deposit.user_id,
            payout,
            multiplier,
            deposit.amount
        );

        if let Err(e) = self
            .notification_service
            .notify_deposit_matured(deposit.user_id, deposit.amount, payout, multiplier)
            .await
        {
            tracing::warn!("deposit #{}: maturity notify failed: {}", deposit_id, e);
        }

        Ok(Some(MaturedPayout {
            deposit_id,
            user_id: deposit.user_id,
            amount: deposit.amount,
            multiplier,
            payout,
        }))
    }
}
