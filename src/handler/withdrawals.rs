// handler/withdrawals.rs
use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::{
    dtos::withdrawaldtos::*,
    error::HttpError,
    models::withdrawalmodel::Network,
    AppState,
};

pub fn withdrawals_handler() -> Router {
    Router::new().route("/", post(request_withdrawal))
}

pub async fn request_withdrawal(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RequestWithdrawalDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let network = Network::parse(&body.network)
        .ok_or_else(|| HttpError::bad_request(format!("Unsupported network: {}", body.network)))?;

    let withdrawal = app_state
        .withdrawal_service
        .request(body.user_id, body.amount, network, &body.address)
        .await?;

    Ok(Json(WithdrawalResponseDto {
        status: "success",
        withdrawal,
    }))
}
