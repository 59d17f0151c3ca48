// dtos/userdtos.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    models::{
        depositmodel::Deposit, notificationmodel::Notification, usermodel::User,
        withdrawalmodel::Withdrawal,
    },
    service::referral_service::ReferralOutcome,
};

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    #[validate(range(min = 1, message = "User id is required"))]
    pub user_id: i64,

    #[validate(length(min = 1, max = 64, message = "Display name must be between 1-64 characters"))]
    pub display_name: String,

    // The referrer's user id, taken from their referral link.
    pub referred_by: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponseDto {
    pub status: &'static str,
    pub user: User,
    pub created: bool,
    pub referral: Option<ReferralOutcome>,
    pub current_multiplier: f64,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponseDto {
    pub status: &'static str,
    pub user_id: i64,
    pub balance: f64,
    pub counted_referrals: i64,
    pub total_referrals: i64,
    pub has_deposited: bool,
    pub current_multiplier: f64,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponseDto {
    pub status: &'static str,
    pub deposits: Vec<Deposit>,
    pub withdrawals: Vec<Withdrawal>,
}

#[derive(Debug, Serialize)]
pub struct NotificationsResponseDto {
    pub status: &'static str,
    pub notifications: Vec<Notification>,
}
