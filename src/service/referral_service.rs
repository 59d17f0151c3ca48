// service/referral_service.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::{Postgres, Transaction};

use crate::{
    config::Config,
    db::db::DBClient,
    db::userdb::{credit_balance, fetch_user_for_update},
    models::usermodel::User,
    service::error::ServiceError,
    utils::money::round_amount,
};

/// Only the first N referrals count at join time; later ones queue
/// until the referred user's first approved deposit.
pub const IMMEDIATE_COUNT_LIMIT: i64 = 3;

/// Outcome of a join carrying a referral code, shaped for rendering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum ReferralOutcome {
    Counted { amount: f64 },
    Queued,
}

/// Credit applied to a referrer when a downstream deposit is approved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferralBonus {
    pub referrer_id: i64,
    pub amount: f64,
    pub newly_counted: bool,
}

#[derive(Debug, Clone)]
pub struct ReferralService {
    db_client: Arc<DBClient>,
    bonus_join: f64,
    deposit_percent: f64,
}

impl ReferralService {
    pub fn new(db_client: Arc<DBClient>, config: &Config) -> Self {
        Self {
            db_client,
            bonus_join: config.ref_bonus_join,
            deposit_percent: config.ref_bonus_deposit_percent,
        }
    }

    /// True when a join is counted immediately: the referrer still has
    /// quota and the new user was never counted for anyone before.
    pub fn join_counts_immediately(referrer: &User, new_user: &User) -> bool {
        referrer.counted_referrals < IMMEDIATE_COUNT_LIMIT && !new_user.counted_for_referrer
    }

    /// True when an approved deposit counts the referral: a user is
    /// counted for their referrer at most once, whichever path (join
    /// or first approved deposit) gets there first.
    pub fn counts_on_deposit(depositor: &User) -> bool {
        !depositor.counted_for_referrer
    }

    /// A new user registered with `referrer_id`'s code. Counts the
    /// referral and credits the join bonus when within quota; queues it
    /// otherwise. Returns `None` when either side does not exist.
    pub async fn on_join(
        &self,
        referrer_id: i64,
        new_user_id: i64,
    ) -> Result<Option<ReferralOutcome>, ServiceError> {
        let _writer = self.db_client.acquire_writer().await;
        let mut tx = self.db_client.pool.begin().await?;

        let referrer = fetch_user_for_update(&mut tx, referrer_id).await?;
        let new_user = fetch_user_for_update(&mut tx, new_user_id).await?;
        let (Some(referrer), Some(new_user)) = (referrer, new_user) else {
            return Ok(None);
        };

        if !Self::join_counts_immediately(&referrer, &new_user) {
            tx.commit().await?;
            return Ok(Some(ReferralOutcome::Queued));
        }

        mark_counted(&mut tx, new_user.user_id, referrer.user_id).await?;
        credit_balance(&mut tx, referrer.user_id, self.bonus_join).await?;
        tx.commit().await?;

        tracing::info!(
            "referral: join of {} counted for {} (+{})",
            new_user_id,
            referrer_id,
            self.bonus_join
        );
        Ok(Some(ReferralOutcome::Counted {
            amount: self.bonus_join,
        }))
    }

    /// One of `depositor`'s deposits was just approved; runs inside the
    /// approval transaction. Counts the referral if it never was (this
    /// is how referrals beyond the immediate quota become counted), and
    /// always credits the referrer the deposit percentage. The counted
    /// flag is read once, before its own side effect, and never gates
    /// the percent bonus.
    pub async fn on_deposit_approved(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        depositor: &User,
        deposit_amount: f64,
    ) -> Result<Option<ReferralBonus>, ServiceError> {
        let Some(referrer_id) = depositor.referred_by else {
            return Ok(None);
        };
        if fetch_user_for_update(tx, referrer_id).await?.is_none() {
            return Ok(None);
        }

        let newly_counted = Self::counts_on_deposit(depositor);
        if newly_counted {
            mark_counted(tx, depositor.user_id, referrer_id).await?;
        }

        let amount = round_amount(deposit_amount * self.deposit_percent);
        credit_balance(tx, referrer_id, amount).await?;

        Ok(Some(ReferralBonus {
            referrer_id,
            amount,
            newly_counted,
        }))
    }
}

/// Flip the at-most-once counted flag and take one unit of the
/// referrer's quota.
async fn mark_counted(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    referrer_id: i64,
) -> Result<(), ServiceError> {
    sqlx::query(
        "UPDATE users SET counted_for_referrer = TRUE, updated_at = NOW() WHERE user_id = $1",
    )
    .bind(user_id)
    .execute(&mut **tx)
    .await?;

    sqlx::query(
        "UPDATE users SET counted_referrals = counted_referrals + 1, updated_at = NOW() WHERE user_id = $1",
    )
    .bind(referrer_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(user_id: i64, counted_referrals: i64, counted_for_referrer: bool) -> User {
        User {
            user_id,
            display_name: format!("user{user_id}"),
            balance: 0.0,
            referred_by: None,
            counted_for_referrer,
            counted_referrals,
            total_referrals: 0,
            has_deposited: false,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn first_three_joins_count_immediately() {
        let new_user = user(2, 0, false);
        for quota_used in 0..IMMEDIATE_COUNT_LIMIT {
            let referrer = user(1, quota_used, false);
            assert!(ReferralService::join_counts_immediately(&referrer, &new_user));
        }
    }

    #[test]
    fn fourth_join_queues() {
        let referrer = user(1, 3, false);
        let new_user = user(2, 0, false);
        assert!(!ReferralService::join_counts_immediately(&referrer, &new_user));
    }

    #[test]
    fn already_counted_user_never_counts_again() {
        let referrer = user(1, 0, false);
        let repeat = user(2, 0, true);
        assert!(!ReferralService::join_counts_immediately(&referrer, &repeat));
    }

    #[test]
    fn first_approved_deposit_counts_a_queued_referral() {
        // Queued at join time (no quota), still uncounted at deposit time.
        let depositor = user(2, 0, false);
        assert!(ReferralService::counts_on_deposit(&depositor));
    }

    #[test]
    fn counted_flag_flips_at_most_once_across_paths() {
        // Counted at join or by an earlier deposit; a later approved
        // deposit still pays the percent bonus but never re-counts.
        let depositor = user(2, 0, true);
        assert!(!ReferralService::counts_on_deposit(&depositor));
    }

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let counted = serde_json::to_value(ReferralOutcome::Counted { amount: 1.0 }).unwrap();
        assert_eq!(counted["kind"], "COUNTED");
        assert_eq!(counted["amount"], 1.0);

        let queued = serde_json::to_value(ReferralOutcome::Queued).unwrap();
        assert_eq!(queued["kind"], "QUEUED");
    }
}
