// service/withdrawal_service.rs
use std::sync::Arc;

use crate::{
    config::Config,
    db::db::DBClient,
    db::userdb::{debit_balance, fetch_user_for_update, UserExt},
    db::withdrawaldb::{fetch_withdrawal_for_update, WithdrawalExt},
    models::usermodel::User,
    models::withdrawalmodel::{Network, Withdrawal, WithdrawalStatus},
    service::error::ServiceError,
    service::notification_service::NotificationService,
};

/// Admin decisions apply to PENDING withdrawals only.
fn ensure_pending(withdrawal: &Withdrawal) -> Result<(), ServiceError> {
    if withdrawal.status != WithdrawalStatus::Pending {
        return Err(ServiceError::AlreadyProcessed {
            record: "Withdrawal",
            id: withdrawal.id,
        });
    }
    Ok(())
}

/// Approval-time re-check: the balance may have shrunk since the
/// request, and a payout must never overdraw it.
fn ensure_balance_covers(user: &User, amount: f64) -> Result<(), ServiceError> {
    if user.balance < amount {
        return Err(ServiceError::InsufficientBalance {
            requested: amount,
            available: user.balance,
        });
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct WithdrawalService {
    db_client: Arc<DBClient>,
    min_withdraw: f64,
    min_counted_referrals: i64,
    notification_service: Arc<NotificationService>,
}

impl WithdrawalService {
    pub fn new(
        db_client: Arc<DBClient>,
        config: &Config,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            db_client,
            min_withdraw: config.min_withdraw,
            min_counted_referrals: config.min_counted_referrals_for_withdraw,
            notification_service,
        }
    }

    /// Request-time gates, evaluated in order against a snapshot of the
    /// user. The same conditions are re-checked at approval time since
    /// the balance may have moved in between.
    pub fn check_request_gates(&self, user: &User, amount: f64) -> Result<(), ServiceError> {
        if !user.has_deposited {
            return Err(ServiceError::NotEligible);
        }
        if user.balance < self.min_withdraw {
            return Err(ServiceError::BelowMinimum {
                minimum: self.min_withdraw,
                balance: user.balance,
            });
        }
        if user.counted_referrals < self.min_counted_referrals {
            return Err(ServiceError::InsufficientReferrals {
                required: self.min_counted_referrals,
                counted: user.counted_referrals,
            });
        }
        if amount > user.balance {
            return Err(ServiceError::InsufficientBalance {
                requested: amount,
                available: user.balance,
            });
        }
        Ok(())
    }

    pub async fn request(
        &self,
        user_id: i64,
        amount: f64,
        network: Network,
        address: &str,
    ) -> Result<Withdrawal, ServiceError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ServiceError::Validation("Invalid amount".to_string()));
        }

        let user = self
            .db_client
            .get_user(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;
        self.check_request_gates(&user, amount)?;

        let withdrawal = self
            .db_client
            .insert_withdrawal(user_id, amount, network, address)
            .await?;
        tracing::info!(
            "withdrawal #{} requested: user {} ${:.2} over {}",
            withdrawal.id,
            user_id,
            amount,
            network
        );
        Ok(withdrawal)
    }

    /// Admin approval: re-reads the balance under lock; when it still
    /// covers the amount, debits and marks PAID in one transaction.
    /// Otherwise fails without mutating anything.
    pub async fn approve(&self, withdrawal_id: i64) -> Result<Withdrawal, ServiceError> {
        let _writer = self.db_client.acquire_writer().await;
        let mut tx = self.db_client.pool.begin().await?;

        let withdrawal = fetch_withdrawal_for_update(&mut tx, withdrawal_id)
            .await?
            .ok_or(ServiceError::WithdrawalNotFound(withdrawal_id))?;
        ensure_pending(&withdrawal)?;

        let user = fetch_user_for_update(&mut tx, withdrawal.user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(withdrawal.user_id))?;
        // Dropping the transaction on error rolls back; balance is untouched.
        ensure_balance_covers(&user, withdrawal.amount)?;

        debit_balance(&mut tx, user.user_id, withdrawal.amount).await?;
        sqlx::query("UPDATE withdrawals SET status = $2 WHERE id = $1")
            .bind(withdrawal_id)
            .bind(WithdrawalStatus::Paid)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(
            "withdrawal #{} paid: user {} debited ${:.2}",
            withdrawal_id,
            user.user_id,
            withdrawal.amount
        );

        if let Err(e) = self
            .notification_service
            .notify_withdrawal_paid(withdrawal.user_id, withdrawal_id)
            .await
        {
            tracing::warn!("withdrawal #{}: notify failed: {}", withdrawal_id, e);
        }

        Ok(Withdrawal {
            status: WithdrawalStatus::Paid,
            ..withdrawal
        })
    }

    pub async fn decline(&self, withdrawal_id: i64) -> Result<(), ServiceError> {
        let _writer = self.db_client.acquire_writer().await;
        let mut tx = self.db_client.pool.begin().await?;

        let withdrawal = fetch_withdrawal_for_update(&mut tx, withdrawal_id)
            .await?
            .ok_or(ServiceError::WithdrawalNotFound(withdrawal_id))?;
        ensure_pending(&withdrawal)?;

        sqlx::query("UPDATE withdrawals SET status = $2 WHERE id = $1")
            .bind(withdrawal_id)
            .bind(WithdrawalStatus::Rejected)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!("withdrawal #{} declined", withdrawal_id);

        if let Err(e) = self
            .notification_service
            .notify_withdrawal_declined(withdrawal.user_id, withdrawal_id)
            .await
        {
            tracing::warn!("withdrawal #{}: notify failed: {}", withdrawal_id, e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::notification_service::NotificationService;
    use sqlx::postgres::PgPool;

    fn service() -> WithdrawalService {
        // connect_lazy never touches the network; only the pure gate
        // checks run in these tests.
        let pool = PgPool::connect_lazy("postgres://localhost/refledger").unwrap();
        let db_client = Arc::new(DBClient::new(pool));
        let notification_service = Arc::new(NotificationService::new(db_client.clone()));
        WithdrawalService {
            db_client,
            min_withdraw: 45.0,
            min_counted_referrals: 5,
            notification_service,
        }
    }

    fn user(balance: f64, counted_referrals: i64, has_deposited: bool) -> User {
        User {
            user_id: 7,
            display_name: "u".to_string(),
            balance,
            referred_by: None,
            counted_for_referrer: false,
            counted_referrals,
            total_referrals: 0,
            has_deposited,
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn gate_requires_approved_deposit_first() {
        let svc = service();
        let err = svc.check_request_gates(&user(100.0, 10, false), 50.0).unwrap_err();
        assert!(matches!(err, ServiceError::NotEligible));
    }

    #[tokio::test]
    async fn gate_enforces_minimum_balance() {
        let svc = service();
        let err = svc.check_request_gates(&user(44.99, 10, true), 10.0).unwrap_err();
        assert!(matches!(err, ServiceError::BelowMinimum { .. }));
    }

    #[tokio::test]
    async fn gate_enforces_referral_quota() {
        let svc = service();
        let err = svc.check_request_gates(&user(100.0, 4, true), 50.0).unwrap_err();
        assert!(matches!(err, ServiceError::InsufficientReferrals { .. }));
    }

    #[tokio::test]
    async fn gate_rejects_amount_above_balance() {
        let svc = service();
        let err = svc.check_request_gates(&user(50.0, 5, true), 60.0).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InsufficientBalance {
                requested,
                available
            } if requested == 60.0 && available == 50.0
        ));
    }

    #[tokio::test]
    async fn gates_pass_at_exact_thresholds() {
        let svc = service();
        // balance == MIN_WITHDRAW, counted == required, amount == balance
        assert!(svc.check_request_gates(&user(45.0, 5, true), 45.0).is_ok());
        assert!(svc.check_request_gates(&user(50.0, 5, true), 50.0).is_ok());
    }

    fn withdrawal(status: WithdrawalStatus) -> Withdrawal {
        Withdrawal {
            id: 21,
            user_id: 7,
            amount: 50.0,
            network: Network::Trc20,
            address: "TAbcdefgh".to_string(),
            status,
            created_at: None,
        }
    }

    #[test]
    fn second_decision_on_a_withdrawal_is_rejected() {
        assert!(ensure_pending(&withdrawal(WithdrawalStatus::Pending)).is_ok());
        for status in [WithdrawalStatus::Paid, WithdrawalStatus::Rejected] {
            let err = ensure_pending(&withdrawal(status)).unwrap_err();
            assert!(matches!(
                err,
                ServiceError::AlreadyProcessed { record: "Withdrawal", id: 21 }
            ));
        }
    }

    #[test]
    fn approval_recheck_fails_when_balance_shrank() {
        // Requested 50 while the balance held 60, spent down to 40 since.
        let err = ensure_balance_covers(&user(40.0, 5, true), 50.0).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::InsufficientBalance {
                requested,
                available
            } if requested == 50.0 && available == 40.0
        ));
    }

    #[test]
    fn approval_recheck_passes_when_balance_still_covers() {
        assert!(ensure_balance_covers(&user(50.0, 5, true), 50.0).is_ok());
        assert!(ensure_balance_covers(&user(80.0, 5, true), 50.0).is_ok());
    }
}
