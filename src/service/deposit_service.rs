// service/deposit_service.rs
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use crate::{
    config::Config,
    db::db::DBClient,
    db::depositdb::{fetch_deposit_for_update, DepositExt},
    db::userdb::{fetch_user_for_update, UserExt},
    models::depositmodel::{Chain, Deposit, DepositStatus},
    service::error::ServiceError,
    service::multiplier::PayoutCurve,
    service::notification_service::NotificationService,
    service::referral_service::{ReferralBonus, ReferralService},
};

/// Result of an admin approval, shaped for rendering. The depositor's
/// own balance is untouched here; only the referrer benefits
/// immediately, the depositor is credited by the maturation sweep.
#[derive(Debug, Clone, Serialize)]
pub struct DepositApproval {
    pub deposit_id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub multiplier: f64,
    pub referral_bonus: Option<ReferralBonus>,
}

/// Admin decisions apply to PENDING deposits only; a record that was
/// already decided once stays decided.
fn ensure_pending(deposit: &Deposit) -> Result<(), ServiceError> {
    if deposit.status != DepositStatus::Pending {
        return Err(ServiceError::AlreadyProcessed {
            record: "Deposit",
            id: deposit.id,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct DepositService {
    db_client: Arc<DBClient>,
    curve: PayoutCurve,
    min_deposit: f64,
    referral_service: Arc<ReferralService>,
    notification_service: Arc<NotificationService>,
}

impl DepositService {
    pub fn new(
        db_client: Arc<DBClient>,
        config: &Config,
        curve: PayoutCurve,
        referral_service: Arc<ReferralService>,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            db_client,
            curve,
            min_deposit: config.min_deposit,
            referral_service,
            notification_service,
        }
    }

    /// Record a deposit claim as PENDING. No balance changes until an
    /// admin approves and the payout matures.
    pub async fn submit(
        &self,
        user_id: i64,
        amount: f64,
        chain: Chain,
        txid: &str,
    ) -> Result<Deposit, ServiceError> {
        if !amount.is_finite() || amount < self.min_deposit {
            return Err(ServiceError::Validation(format!(
                "Minimum deposit is {:.2}",
                self.min_deposit
            )));
        }
        self.db_client
            .get_user(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        let deposit = self
            .db_client
            .insert_deposit(user_id, amount, chain, txid)
            .await?;
        tracing::info!(
            "deposit #{} submitted: user {} ${:.2} on {}",
            deposit.id,
            user_id,
            amount,
            chain
        );
        Ok(deposit)
    }

    /// Admin approval: locks in the current multiplier, marks the user
    /// as a depositor, and settles the referrer's percent bonus, all in
    /// one transaction. A second approval attempt is rejected.
    pub async fn approve(&self, deposit_id: i64) -> Result<DepositApproval, ServiceError> {
        let _writer = self.db_client.acquire_writer().await;
        let mut tx = self.db_client.pool.begin().await?;

        let deposit = fetch_deposit_for_update(&mut tx, deposit_id)
            .await?
            .ok_or(ServiceError::DepositNotFound(deposit_id))?;
        ensure_pending(&deposit)?;

        let multiplier = self.curve.at(Utc::now());
        sqlx::query("UPDATE deposits SET status = $2, payout_multiplier = $3 WHERE id = $1")
            .bind(deposit_id)
            .bind(DepositStatus::Approved)
            .bind(multiplier)
            .execute(&mut *tx)
            .await?;

        let user = fetch_user_for_update(&mut tx, deposit.user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(deposit.user_id))?;
        sqlx::query(
            "UPDATE users SET has_deposited = TRUE, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(user.user_id)
        .execute(&mut *tx)
        .await?;

        let referral_bonus = self
            .referral_service
            .on_deposit_approved(&mut tx, &user, deposit.amount)
            .await?;

        tx.commit().await?;
        tracing::info!(
            "deposit #{} approved at {}x, referral bonus: {:?}",
            deposit_id,
            multiplier,
            referral_bonus
        );

        if let Err(e) = self
            .notification_service
            .notify_deposit_approved(deposit.user_id, deposit.amount, multiplier)
            .await
        {
            tracing::warn!("deposit #{}: depositor notify failed: {}", deposit_id, e);
        }
        if let Some(bonus) = &referral_bonus {
            if let Err(e) = self
                .notification_service
                .notify_referral_bonus(bonus.referrer_id, bonus.amount)
                .await
            {
                tracing::warn!("deposit #{}: referrer notify failed: {}", deposit_id, e);
            }
        }

        Ok(DepositApproval {
            deposit_id,
            user_id: deposit.user_id,
            amount: deposit.amount,
            multiplier,
            referral_bonus,
        })
    }

    /// Admin rejection. Terminal: no balance or referral effects, ever.
    pub async fn reject(&self, deposit_id: i64) -> Result<(), ServiceError> {
        let _writer = self.db_client.acquire_writer().await;
        let mut tx = self.db_client.pool.begin().await?;

        let deposit = fetch_deposit_for_update(&mut tx, deposit_id)
            .await?
            .ok_or(ServiceError::DepositNotFound(deposit_id))?;
        ensure_pending(&deposit)?;

        sqlx::query("UPDATE deposits SET status = $2 WHERE id = $1")
            .bind(deposit_id)
            .bind(DepositStatus::Rejected)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!("deposit #{} rejected", deposit_id);

        if let Err(e) = self
            .notification_service
            .notify_deposit_rejected(deposit.user_id, deposit_id)
            .await
        {
            tracing::warn!("deposit #{}: reject notify failed: {}", deposit_id, e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deposit(status: DepositStatus) -> Deposit {
        Deposit {
            id: 11,
            user_id: 7,
            amount: 50.0,
            chain: Chain::Trc20,
            txid: "abc".to_string(),
            status,
            payout_multiplier: 0.0,
            created_at: None,
            paid_at: None,
        }
    }

    #[test]
    fn pending_deposit_accepts_a_decision() {
        assert!(ensure_pending(&deposit(DepositStatus::Pending)).is_ok());
    }

    #[test]
    fn second_decision_on_a_deposit_is_rejected() {
        for status in [
            DepositStatus::Approved,
            DepositStatus::Rejected,
            DepositStatus::Paid,
        ] {
            let err = ensure_pending(&deposit(status)).unwrap_err();
            assert!(matches!(
                err,
                ServiceError::AlreadyProcessed { record: "Deposit", id: 11 }
            ));
        }
    }
}
