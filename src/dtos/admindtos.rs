// dtos/admindtos.rs
use serde::{Deserialize, Serialize};

use crate::{
    models::{depositmodel::Deposit, withdrawalmodel::Withdrawal},
    service::deposit_service::DepositApproval,
};

/// Every admin action is one explicit variant; the dispatcher matches
/// exhaustively so an unknown action fails at deserialization instead
/// of falling through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AdminCommand {
    ApproveDeposit { id: i64 },
    RejectDeposit { id: i64 },
    ApproveWithdrawal { id: i64 },
    DeclineWithdrawal { id: i64 },
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum AdminCommandOutcome {
    DepositApproved(DepositApproval),
    DepositRejected { id: i64 },
    WithdrawalApproved { id: i64 },
    WithdrawalDeclined { id: i64 },
}

#[derive(Debug, Serialize)]
pub struct AdminCommandResponseDto {
    pub status: &'static str,
    pub outcome: AdminCommandOutcome,
}

#[derive(Debug, Serialize)]
pub struct PendingRequestsDto {
    pub status: &'static str,
    pub deposits: Vec<Deposit>,
    pub withdrawals: Vec<Withdrawal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_parses_from_tagged_action() {
        let cmd: AdminCommand =
            serde_json::from_str(r#"{"action":"approve_deposit","id":12}"#).unwrap();
        assert_eq!(cmd, AdminCommand::ApproveDeposit { id: 12 });

        let cmd: AdminCommand =
            serde_json::from_str(r#"{"action":"decline_withdrawal","id":3}"#).unwrap();
        assert_eq!(cmd, AdminCommand::DeclineWithdrawal { id: 3 });
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = serde_json::from_str::<AdminCommand>(r#"{"action":"mint_money","id":1}"#);
        assert!(err.is_err());
    }
}
