// handler/deposits.rs
use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    dtos::depositdtos::*,
    error::HttpError,
    models::depositmodel::Chain,
    AppState,
};

pub fn deposits_handler() -> Router {
    Router::new()
        .route("/", post(submit_deposit))
        .route("/addresses", get(get_addresses))
}

pub async fn submit_deposit(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SubmitDepositDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    let chain = Chain::parse(&body.chain)
        .ok_or_else(|| HttpError::bad_request(format!("Unsupported chain: {}", body.chain)))?;

    let deposit = app_state
        .deposit_service
        .submit(body.user_id, body.amount, chain, &body.txid)
        .await?;

    Ok(Json(DepositResponseDto {
        status: "success",
        deposit,
    }))
}

pub async fn get_addresses(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let addresses = Chain::ALL
        .into_iter()
        .map(|chain| ChainAddressDto {
            chain: chain.as_str(),
            address: app_state.env.deposit_addresses.address_for(chain).to_string(),
        })
        .collect();

    Ok(Json(DepositAddressesDto {
        status: "success",
        min_deposit: app_state.env.min_deposit,
        addresses,
    }))
}
