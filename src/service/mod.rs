pub mod background_jobs;
pub mod deposit_service;
pub mod error;
pub mod maturation_service;
pub mod multiplier;
pub mod notification_service;
pub mod referral_service;
pub mod withdrawal_service;
