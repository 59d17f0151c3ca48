// service/multiplier.rs
use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::utils::money::round_mult;

/// Time-decayed payout multiplier. Starts at `start` on launch day,
/// loses `decay_per_day` per whole elapsed day, never drops below
/// `min`. Pure function of the clock; both the approval path and the
/// maturation fallback read it.
#[derive(Debug, Clone, Copy)]
pub struct PayoutCurve {
    pub start: f64,
    pub min: f64,
    pub decay_per_day: f64,
    pub launch: DateTime<Utc>,
}

impl PayoutCurve {
    pub fn new(config: &Config, launch: DateTime<Utc>) -> Self {
        PayoutCurve {
            start: config.payout_mult_start,
            min: config.payout_mult_min,
            decay_per_day: config.payout_decay_per_day,
            launch,
        }
    }

    pub fn days_since_launch(&self, now: DateTime<Utc>) -> i64 {
        ((now - self.launch).num_seconds() / 86_400).max(0)
    }

    /// Multiplier at `now`, rounded to 4 decimal places.
    pub fn at(&self, now: DateTime<Utc>) -> f64 {
        let mult = self.start - self.decay_per_day * self.days_since_launch(now) as f64;
        round_mult(mult.max(self.min))
    }
}

/// A deposit pays out at the multiplier stamped at approval time; the
/// live curve value is only a fallback for rows that never got one.
pub fn effective_multiplier(stored: f64, live: f64) -> f64 {
    if stored > 0.0 {
        stored
    } else {
        live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn curve() -> PayoutCurve {
        PayoutCurve {
            start: 5.0,
            min: 2.0,
            decay_per_day: 0.05,
            launch: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn equals_start_at_launch() {
        let c = curve();
        assert_eq!(c.at(c.launch), 5.0);
    }

    #[test]
    fn decays_by_whole_days_only() {
        let c = curve();
        // 23h59m elapsed is still day zero
        assert_eq!(c.at(c.launch + Duration::seconds(86_399)), 5.0);
        assert_eq!(c.at(c.launch + Duration::days(1)), 4.95);
        assert_eq!(c.at(c.launch + Duration::days(10)), 4.5);
    }

    #[test]
    fn floors_at_min_after_long_decay() {
        let c = curve();
        // 5.0 - 0.05 * 100 = 0 decayed away, clamped to 2.0
        assert_eq!(c.at(c.launch + Duration::days(100)), 2.0);
        assert_eq!(c.at(c.launch + Duration::days(10_000)), 2.0);
    }

    #[test]
    fn non_increasing_over_time() {
        let c = curve();
        let mut last = f64::INFINITY;
        for day in 0..200 {
            let m = c.at(c.launch + Duration::days(day));
            assert!(m <= last, "multiplier rose on day {day}");
            assert!(m >= c.min);
            last = m;
        }
    }

    #[test]
    fn clock_before_launch_clamps_to_day_zero() {
        let c = curve();
        assert_eq!(c.at(c.launch - Duration::days(3)), 5.0);
    }

    #[test]
    fn stored_multiplier_wins_over_live() {
        assert_eq!(effective_multiplier(4.0, 2.5), 4.0);
        assert_eq!(effective_multiplier(0.0, 2.5), 2.5);
        assert_eq!(effective_multiplier(-1.0, 2.5), 2.5);
    }
}
