// dtos/withdrawaldtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::withdrawalmodel::Withdrawal;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RequestWithdrawalDto {
    #[validate(range(min = 1, message = "User id is required"))]
    pub user_id: i64,

    #[validate(range(min = 0.000001, message = "Amount must be positive"))]
    pub amount: f64,

    // Validated against the supported networks in the handler.
    #[validate(length(min = 1, message = "Network is required"))]
    pub network: String,

    #[validate(length(min = 8, max = 128, message = "Address must be between 8-128 characters"))]
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct WithdrawalResponseDto {
    pub status: &'static str,
    pub withdrawal: Withdrawal,
}
