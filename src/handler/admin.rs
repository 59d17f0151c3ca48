// handler/admin.rs
use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::{
    db::{depositdb::DepositExt, withdrawaldb::WithdrawalExt},
    dtos::admindtos::*,
    error::HttpError,
    AppState,
};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/requests", get(get_pending_requests))
        .route("/commands", post(run_command))
}

pub async fn get_pending_requests(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let deposits = app_state
        .db_client
        .pending_deposits()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;
    let withdrawals = app_state
        .db_client
        .pending_withdrawals()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(PendingRequestsDto {
        status: "success",
        deposits,
        withdrawals,
    }))
}

/// Single dispatch point for admin actions. Each variant is handled
/// explicitly; there is no generic "set status" path.
pub async fn run_command(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(command): Json<AdminCommand>,
) -> Result<impl IntoResponse, HttpError> {
    let outcome = match command {
        AdminCommand::ApproveDeposit { id } => {
            let approval = app_state.deposit_service.approve(id).await?;
            AdminCommandOutcome::DepositApproved(approval)
        }
        AdminCommand::RejectDeposit { id } => {
            app_state.deposit_service.reject(id).await?;
            AdminCommandOutcome::DepositRejected { id }
        }
        AdminCommand::ApproveWithdrawal { id } => {
            let withdrawal = app_state.withdrawal_service.approve(id).await?;
            AdminCommandOutcome::WithdrawalApproved { id: withdrawal.id }
        }
        AdminCommand::DeclineWithdrawal { id } => {
            app_state.withdrawal_service.decline(id).await?;
            AdminCommandOutcome::WithdrawalDeclined { id }
        }
    };

    Ok(Json(AdminCommandResponseDto {
        status: "success",
        outcome,
    }))
}
