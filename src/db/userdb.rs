// db/userdb.rs
use async_trait::async_trait;
use sqlx::{Error, Postgres, Transaction};

use super::db::DBClient;
use crate::models::usermodel::User;

/// Lock a user row for the remainder of the transaction.
pub async fn fetch_user_for_update(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
) -> Result<Option<User>, Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, display_name, balance, referred_by, counted_for_referrer,
               counted_referrals, total_referrals, has_deposited, created_at, updated_at
        FROM users
        WHERE user_id = $1
        FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut **tx)
    .await
}

pub async fn credit_balance(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    amount: f64,
) -> Result<(), Error> {
    sqlx::query("UPDATE users SET balance = balance + $2, updated_at = NOW() WHERE user_id = $1")
        .bind(user_id)
        .bind(amount)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub async fn debit_balance(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    amount: f64,
) -> Result<(), Error> {
    sqlx::query("UPDATE users SET balance = balance - $2, updated_at = NOW() WHERE user_id = $1")
        .bind(user_id)
        .bind(amount)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

#[async_trait]
pub trait UserExt {
    async fn get_user(&self, user_id: i64) -> Result<Option<User>, Error>;

    /// Create the user if unseen, otherwise refresh the display name.
    /// `referred_by` only sticks on first registration; a fresh insert
    /// also bumps the referrer's `total_referrals`.
    async fn register_user(
        &self,
        user_id: i64,
        display_name: &str,
        referred_by: Option<i64>,
    ) -> Result<(User, bool), Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn get_user(&self, user_id: i64) -> Result<Option<User>, Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, display_name, balance, referred_by, counted_for_referrer,
                   counted_referrals, total_referrals, has_deposited, created_at, updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn register_user(
        &self,
        user_id: i64,
        display_name: &str,
        referred_by: Option<i64>,
    ) -> Result<(User, bool), Error> {
        let mut tx = self.pool.begin().await?;

        let inserted: Option<User> = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id, display_name, referred_by)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO NOTHING
            RETURNING user_id, display_name, balance, referred_by, counted_for_referrer,
                      counted_referrals, total_referrals, has_deposited, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(display_name)
        .bind(referred_by)
        .fetch_optional(&mut *tx)
        .await?;

        let (user, created) = match inserted {
            Some(user) => {
                if let Some(referrer_id) = referred_by {
                    sqlx::query(
                        r#"
                        UPDATE users
                        SET total_referrals = total_referrals + 1, updated_at = NOW()
                        WHERE user_id = $1
                        "#,
                    )
                    .bind(referrer_id)
                    .execute(&mut *tx)
                    .await?;
                }
                (user, true)
            }
            None => {
                let user = sqlx::query_as::<_, User>(
                    r#"
                    UPDATE users
                    SET display_name = $2, updated_at = NOW()
                    WHERE user_id = $1
                    RETURNING user_id, display_name, balance, referred_by, counted_for_referrer,
                              counted_referrals, total_referrals, has_deposited, created_at, updated_at
                    "#,
                )
                .bind(user_id)
                .bind(display_name)
                .fetch_one(&mut *tx)
                .await?;
                (user, false)
            }
        };

        tx.commit().await?;
        Ok((user, created))
    }
}
