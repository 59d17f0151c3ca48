// service/notification_service.rs
use std::sync::Arc;

use crate::{
    db::db::DBClient, db::notificationdb::NotificationExt, service::error::ServiceError,
};

/// Queues plain-text payloads for the presentation collaborator to
/// deliver. Strictly best-effort: callers log failures and move on;
/// financial state never waits on or rolls back with a notification.
#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    async fn push(&self, user_id: i64, kind: &str, body: String) -> Result<(), ServiceError> {
        tracing::info!("notify {}: [{}] {}", user_id, kind, body);
        self.db_client
            .insert_notification(user_id, kind, &body)
            .await
            .map_err(|e| ServiceError::Notification(e.to_string()))?;
        Ok(())
    }

    pub async fn notify_deposit_approved(
        &self,
        user_id: i64,
        amount: f64,
        multiplier: f64,
    ) -> Result<(), ServiceError> {
        self.push(
            user_id,
            "deposit_approved",
            format!(
                "Your deposit ${amount:.2} was approved. It will be paid after maturity at multiplier {multiplier}x."
            ),
        )
        .await
    }

    pub async fn notify_deposit_rejected(
        &self,
        user_id: i64,
        deposit_id: i64,
    ) -> Result<(), ServiceError> {
        self.push(
            user_id,
            "deposit_rejected",
            format!("Your deposit #{deposit_id} was rejected."),
        )
        .await
    }

    pub async fn notify_deposit_matured(
        &self,
        user_id: i64,
        amount: f64,
        payout: f64,
        multiplier: f64,
    ) -> Result<(), ServiceError> {
        self.push(
            user_id,
            "deposit_matured",
            format!(
                "Your deposit ${amount:.2} matured. ${payout:.2} credited (multiplier {multiplier}x)."
            ),
        )
        .await
    }

    pub async fn notify_referral_bonus(
        &self,
        referrer_id: i64,
        amount: f64,
    ) -> Result<(), ServiceError> {
        self.push(
            referrer_id,
            "referral_bonus",
            format!("You earned a ${amount:.2} referral bonus."),
        )
        .await
    }

    pub async fn notify_withdrawal_paid(
        &self,
        user_id: i64,
        withdrawal_id: i64,
    ) -> Result<(), ServiceError> {
        self.push(
            user_id,
            "withdrawal_paid",
            format!("Your withdrawal #{withdrawal_id} was approved. Please check your wallet."),
        )
        .await
    }

    pub async fn notify_withdrawal_declined(
        &self,
        user_id: i64,
        withdrawal_id: i64,
    ) -> Result<(), ServiceError> {
        self.push(
            user_id,
            "withdrawal_declined",
            format!("Your withdrawal #{withdrawal_id} was declined."),
        )
        .await
    }
}
