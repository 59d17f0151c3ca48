// models/depositmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Chain {
    Sol,
    Erc20,
    Bep20,
    Trc20,
}

impl Chain {
    pub const ALL: [Chain; 4] = [Chain::Sol, Chain::Erc20, Chain::Bep20, Chain::Trc20];

    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Sol => "SOL",
            Chain::Erc20 => "ERC20",
            Chain::Bep20 => "BEP20",
            Chain::Trc20 => "TRC20",
        }
    }

    pub fn parse(s: &str) -> Option<Chain> {
        match s.to_uppercase().as_str() {
            "SOL" => Some(Chain::Sol),
            "ERC20" => Some(Chain::Erc20),
            "BEP20" => Some(Chain::Bep20),
            "TRC20" => Some(Chain::Trc20),
            _ => None,
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DepositStatus {
    /// Claimed by the user, awaiting an admin decision.
    Pending,
    /// Accepted by an admin; multiplier locked in, payout not yet credited.
    Approved,
    /// Terminal. Never earns anything, even if reconsidered later.
    Rejected,
    /// Terminal. Matured payout credited to the depositor.
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Deposit {
    pub id: i64,
    pub user_id: i64,
    pub amount: f64,
    pub chain: Chain,
    pub txid: String,
    pub status: DepositStatus,
    /// 0 while PENDING; stamped with the live curve value at approval.
    pub payout_multiplier: f64,
    pub created_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_parse_accepts_known_chains_case_insensitively() {
        assert_eq!(Chain::parse("SOL"), Some(Chain::Sol));
        assert_eq!(Chain::parse("erc20"), Some(Chain::Erc20));
        assert_eq!(Chain::parse("Bep20"), Some(Chain::Bep20));
        assert_eq!(Chain::parse("TRC20"), Some(Chain::Trc20));
    }

    #[test]
    fn chain_parse_rejects_unknown_chains() {
        assert_eq!(Chain::parse("BTC"), None);
        assert_eq!(Chain::parse(""), None);
    }

    #[test]
    fn chain_display_round_trips() {
        for chain in Chain::ALL {
            assert_eq!(Chain::parse(chain.as_str()), Some(chain));
        }
    }
}
