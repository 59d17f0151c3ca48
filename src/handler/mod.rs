pub mod admin;
pub mod deposits;
pub mod users;
pub mod withdrawals;
