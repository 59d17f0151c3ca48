// handler/users.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    db::{
        depositdb::DepositExt, notificationdb::NotificationExt, userdb::UserExt,
        withdrawaldb::WithdrawalExt,
    },
    dtos::userdtos::*,
    error::HttpError,
    AppState,
};

const HISTORY_LIMIT: i64 = 10;
const NOTIFICATIONS_LIMIT: i64 = 50;

pub fn users_handler() -> Router {
    Router::new()
        .route("/register", post(register_user))
        .route("/:id/balance", get(get_balance))
        .route("/:id/history", get(get_history))
        .route("/:id/notifications", get(get_notifications))
}

/// Idempotent: re-registering refreshes the display name and never
/// re-runs the referral flow. The referrer recorded at first
/// registration is the one that sticks.
pub async fn register_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if body.referred_by == Some(body.user_id) {
        return Err(HttpError::bad_request("You cannot refer yourself"));
    }

    let (user, created) = app_state
        .db_client
        .register_user(body.user_id, &body.display_name, body.referred_by)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let referral = match (created, user.referred_by) {
        (true, Some(referrer_id)) => app_state
            .referral_service
            .on_join(referrer_id, user.user_id)
            .await
            .map_err(HttpError::from)?,
        _ => None,
    };

    // Re-read so the counted flag set by the referral unit is reflected.
    let user = app_state
        .db_client
        .get_user(user.user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    Ok(Json(RegisterResponseDto {
        status: "success",
        user,
        created,
        referral,
        current_multiplier: app_state.payout_curve.at(Utc::now()),
    }))
}

pub async fn get_balance(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    Ok(Json(BalanceResponseDto {
        status: "success",
        user_id: user.user_id,
        balance: user.balance,
        counted_referrals: user.counted_referrals,
        total_referrals: user.total_referrals,
        has_deposited: user.has_deposited,
        current_multiplier: app_state.payout_curve.at(Utc::now()),
    }))
}

pub async fn get_history(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .get_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found"))?;

    let deposits = app_state
        .db_client
        .user_deposits(user_id, HISTORY_LIMIT)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let withdrawals = app_state
        .db_client
        .user_withdrawals(user_id, HISTORY_LIMIT)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(HistoryResponseDto {
        status: "success",
        deposits,
        withdrawals,
    }))
}

/// Polled by the presentation layer to deliver queued messages.
pub async fn get_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let notifications = app_state
        .db_client
        .user_notifications(user_id, NOTIFICATIONS_LIMIT)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(NotificationsResponseDto {
        status: "success",
        notifications,
    }))
}
