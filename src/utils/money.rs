/// Monetary rounding helpers.
///
/// Amounts are carried as f64 dollars end to end; every figure that
/// lands in a balance is first pushed through one of these so repeated
/// arithmetic stays stable.

/// Round to `dp` decimal places, half away from zero.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

/// Multiplier precision: 4 decimal places.
pub fn round_mult(value: f64) -> f64 {
    round_dp(value, 4)
}

/// Payout/bonus precision: 6 decimal places.
pub fn round_amount(value: f64) -> f64 {
    round_dp(value, 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(1.23456789, 4), 1.2346);
        assert_eq!(round_dp(1.23454999, 4), 1.2345);
        assert_eq!(round_dp(100.0, 6), 100.0);
    }

    #[test]
    fn test_round_mult() {
        assert_eq!(round_mult(4.99995), 5.0);
        assert_eq!(round_mult(2.0), 2.0);
    }

    #[test]
    fn test_round_amount() {
        // 20% of a typical deposit
        assert_eq!(round_amount(100.0 * 0.20), 20.0);
        assert_eq!(round_amount(33.3333333333), 33.333333);
    }
}
