// models/withdrawalmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Networks a payout can be sent over. Deposits additionally accept SOL;
/// withdrawals do not.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Network {
    Trc20,
    Erc20,
    Bep20,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Trc20 => "TRC20",
            Network::Erc20 => "ERC20",
            Network::Bep20 => "BEP20",
        }
    }

    pub fn parse(s: &str) -> Option<Network> {
        match s.to_uppercase().as_str() {
            "TRC20" => Some(Network::Trc20),
            "ERC20" => Some(Network::Erc20),
            "BEP20" => Some(Network::Bep20),
            _ => None,
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum WithdrawalStatus {
    Pending,
    /// Terminal. Balance debited.
    Paid,
    /// Terminal. No balance change.
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Withdrawal {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub network: Network,
    pub address: String,
    pub status: WithdrawalStatus,
    pub created_at: Option<DateTime<Utc>>,
}
