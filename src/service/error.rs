// service/error.rs
use thiserror::Error;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User {0} not found")]
    UserNotFound(i64),

    #[error("Deposit {0} not found")]
    DepositNotFound(i64),

    #[error("Withdrawal {0} not found")]
    WithdrawalNotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Withdrawals unlock after your first approved deposit")]
    NotEligible,

    #[error("Minimum withdrawal balance is {minimum}, current balance is {balance}")]
    BelowMinimum { minimum: f64, balance: f64 },

    #[error("Withdrawals require {required} counted referrals, you have {counted}")]
    InsufficientReferrals { required: i64, counted: i64 },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: f64, available: f64 },

    #[error("{record} {id} is no longer pending")]
    AlreadyProcessed { record: &'static str, id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match &error {
            ServiceError::UserNotFound(_)
            | ServiceError::DepositNotFound(_)
            | ServiceError::WithdrawalNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::Validation(_)
            | ServiceError::NotEligible
            | ServiceError::BelowMinimum { .. }
            | ServiceError::InsufficientReferrals { .. }
            | ServiceError::InsufficientBalance { .. } => HttpError::bad_request(error.to_string()),

            ServiceError::AlreadyProcessed { .. } => HttpError::conflict(error.to_string()),

            ServiceError::Database(_) | ServiceError::Notification(_) => {
                HttpError::server_error(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn http_mapping_per_error_class() {
        let not_found = HttpError::from(ServiceError::UserNotFound(9));
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);

        let gate = HttpError::from(ServiceError::NotEligible);
        assert_eq!(gate.status, StatusCode::BAD_REQUEST);

        let db = HttpError::from(ServiceError::Notification("queue down".to_string()));
        assert_eq!(db.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn already_processed_maps_to_conflict() {
        let err = HttpError::from(ServiceError::AlreadyProcessed {
            record: "Deposit",
            id: 4,
        });
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert!(err.message.contains("no longer pending"));
    }
}
