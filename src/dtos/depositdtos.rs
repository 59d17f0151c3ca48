// dtos/depositdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::depositmodel::Deposit;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SubmitDepositDto {
    #[validate(range(min = 1, message = "User id is required"))]
    pub user_id: i64,

    #[validate(range(min = 0.000001, message = "Amount must be positive"))]
    pub amount: f64,

    // Validated against the supported chains in the handler.
    #[validate(length(min = 1, message = "Chain is required"))]
    pub chain: String,

    #[validate(length(min = 1, max = 128, message = "Transaction id must be between 1-128 characters"))]
    pub txid: String,
}

#[derive(Debug, Serialize)]
pub struct DepositResponseDto {
    pub status: &'static str,
    pub deposit: Deposit,
}

#[derive(Debug, Serialize)]
pub struct ChainAddressDto {
    pub chain: &'static str,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct DepositAddressesDto {
    pub status: &'static str,
    pub min_deposit: f64,
    pub addresses: Vec<ChainAddressDto>,
}
