// config.rs
use std::str::FromStr;

use crate::models::depositmodel::Chain;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    // Deposit rules
    pub min_deposit: f64,
    pub deposit_addresses: DepositAddresses,
    // Payout curve
    pub payout_seconds: i64,
    pub payout_mult_start: f64,
    pub payout_mult_min: f64,
    pub payout_decay_per_day: f64,
    // Referral bonuses
    pub ref_bonus_join: f64,
    pub ref_bonus_deposit_percent: f64,
    // Withdrawal gates
    pub min_withdraw: f64,
    pub min_counted_referrals_for_withdraw: i64,
    // Maturation sweep cadence, seconds
    pub worker_interval: u64,
}

#[derive(Debug, Clone)]
pub struct DepositAddresses {
    pub sol: String,
    pub erc20: String,
    pub bep20: String,
    pub trc20: String,
}

impl DepositAddresses {
    pub fn address_for(&self, chain: Chain) -> &str {
        match chain {
            Chain::Sol => &self.sol,
            Chain::Erc20 => &self.erc20,
            Chain::Bep20 => &self.bep20,
            Chain::Trc20 => &self.trc20,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        Config {
            database_url,
            port: env_or("PORT", 8000),
            min_deposit: env_or("MIN_DEPOSIT", 5.0),
            deposit_addresses: DepositAddresses {
                sol: std::env::var("SOL_ADDR").unwrap_or_default(),
                erc20: std::env::var("ERC20_ADDR").unwrap_or_default(),
                bep20: std::env::var("BEP20_ADDR").unwrap_or_default(),
                trc20: std::env::var("TRC20_ADDR").unwrap_or_default(),
            },
            payout_seconds: env_or("PAYOUT_SECONDS", 24 * 3600),
            payout_mult_start: env_or("PAYOUT_MULT_START", 5.0),
            payout_mult_min: env_or("PAYOUT_MULT_MIN", 2.0),
            payout_decay_per_day: env_or("PAYOUT_DECAY_PER_DAY", 0.05),
            ref_bonus_join: env_or("REF_BONUS_JOIN", 1.0),
            ref_bonus_deposit_percent: env_or("REF_BONUS_DEPOSIT_PERCENT", 0.20),
            min_withdraw: env_or("MIN_WITHDRAW", 45.0),
            min_counted_referrals_for_withdraw: env_or("MIN_COUNTED_REFERRALS_FOR_WITHDRAW", 5),
            worker_interval: env_or("WORKER_INTERVAL", 6 * 3600),
        }
    }
}
