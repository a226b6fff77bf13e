//! Fee schedule for the fund ledger
//!
//! Management fee accrues linearly over epochs against NAV.
//! Performance fee is stored and capped but contributes nothing yet:
//! there is no profit baseline defined to compute it against.

use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Basis-point denominator (10000 = 100%)
pub const BPS_DENOMINATOR: u64 = 10_000;

/// One epoch per day
pub const EPOCHS_PER_YEAR: u64 = 365;

/// Policy ceiling for the management rate: 10%
pub const MAX_MANAGEMENT_FEE_BPS: u64 = 1_000;

/// Policy ceiling for the performance rate: 30%
pub const MAX_PERFORMANCE_FEE_BPS: u64 = 3_000;

/// Default rates at fund creation: 2-and-20
pub const DEFAULT_MANAGEMENT_FEE_BPS: u64 = 200;
pub const DEFAULT_PERFORMANCE_FEE_BPS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub management_fee_bps: u64,
    pub performance_fee_bps: u64,
    pub last_fee_collection: u64,
}

impl FeeSchedule {
    pub fn new(created_at_epoch: u64) -> Self {
        Self {
            management_fee_bps: DEFAULT_MANAGEMENT_FEE_BPS,
            performance_fee_bps: DEFAULT_PERFORMANCE_FEE_BPS,
            last_fee_collection: created_at_epoch,
        }
    }

    /// Replace both rates atomically. Does not reset `last_fee_collection`.
    pub fn update_rates(
        &mut self,
        management_fee_bps: u64,
        performance_fee_bps: u64,
    ) -> Result<(), LedgerError> {
        if management_fee_bps > MAX_MANAGEMENT_FEE_BPS
            || performance_fee_bps > MAX_PERFORMANCE_FEE_BPS
        {
            return Err(LedgerError::InvalidFeeParameter);
        }
        self.management_fee_bps = management_fee_bps;
        self.performance_fee_bps = performance_fee_bps;
        Ok(())
    }

    /// Epochs elapsed since the last collection.
    /// A regressed clock reads as zero elapsed epochs.
    pub fn epochs_since_collection(&self, now_epoch: u64) -> u64 {
        now_epoch.saturating_sub(self.last_fee_collection)
    }

    /// Management fee owed on `total_nav` as of `now_epoch`.
    ///
    /// floor(nav * rate_bps * epochs / (10000 * EPOCHS_PER_YEAR)),
    /// computed in u128 so nav * bps * epochs cannot wrap.
    pub fn management_fee_due(&self, total_nav: u64, now_epoch: u64) -> u64 {
        let epochs = self.epochs_since_collection(now_epoch);
        let numerator =
            total_nav as u128 * self.management_fee_bps as u128 * epochs as u128;
        let denominator = BPS_DENOMINATOR as u128 * EPOCHS_PER_YEAR as u128;
        // quotient <= nav * (rate/10000) * (epochs/365), always within u64 when nav is
        (numerator / denominator) as u64
    }

    /// Performance fee owed. Always zero: the profit baseline
    /// (high-water mark) is not tracked yet.
    pub fn performance_fee_due(&self, _total_nav: u64) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_rates() {
        let sched = FeeSchedule::new(0);
        assert_eq!(sched.management_fee_bps, 200);
        assert_eq!(sched.performance_fee_bps, 2_000);
        assert_eq!(sched.last_fee_collection, 0);
    }

    #[test]
    fn test_update_rates_within_caps() {
        let mut sched = FeeSchedule::new(10);
        sched.update_rates(1_000, 3_000).unwrap();
        assert_eq!(sched.management_fee_bps, 1_000);
        assert_eq!(sched.performance_fee_bps, 3_000);
        // collection clock untouched
        assert_eq!(sched.last_fee_collection, 10);
    }

    #[test]
    fn test_update_rates_management_over_cap() {
        let mut sched = FeeSchedule::new(0);
        let result = sched.update_rates(1_001, 0);
        assert_eq!(result, Err(LedgerError::InvalidFeeParameter));
        // rejected update leaves both rates unchanged
        assert_eq!(sched.management_fee_bps, DEFAULT_MANAGEMENT_FEE_BPS);
        assert_eq!(sched.performance_fee_bps, DEFAULT_PERFORMANCE_FEE_BPS);
    }

    #[test]
    fn test_update_rates_performance_over_cap() {
        let mut sched = FeeSchedule::new(0);
        assert_eq!(sched.update_rates(0, 3_001), Err(LedgerError::InvalidFeeParameter));
    }

    #[test]
    fn test_management_fee_one_year_at_one_percent() {
        let mut sched = FeeSchedule::new(0);
        sched.update_rates(100, 0).unwrap();
        // 36500 * 100 * 365 / (10000 * 365) = 365
        assert_eq!(sched.management_fee_due(36_500, 365), 365);
    }

    #[test]
    fn test_management_fee_truncates() {
        let mut sched = FeeSchedule::new(0);
        sched.update_rates(100, 0).unwrap();
        // one epoch on 36500 at 1%/yr: 36500*100/(10000*365) = 1.0 -> 1
        assert_eq!(sched.management_fee_due(36_500, 1), 1);
        // one epoch on 36499: 0.99997 -> 0
        assert_eq!(sched.management_fee_due(36_499, 1), 0);
    }

    #[test]
    fn test_management_fee_zero_epochs() {
        let sched = FeeSchedule::new(100);
        assert_eq!(sched.management_fee_due(1_000_000, 100), 0);
    }

    #[test]
    fn test_clock_regression_reads_zero() {
        let sched = FeeSchedule::new(100);
        assert_eq!(sched.epochs_since_collection(99), 0);
        assert_eq!(sched.management_fee_due(1_000_000, 99), 0);
    }

    #[test]
    fn test_management_fee_large_nav_no_overflow() {
        let mut sched = FeeSchedule::new(0);
        sched.update_rates(1_000, 0).unwrap();
        // u64::MAX nav over ten years at the cap stays exact in u128
        let fee = sched.management_fee_due(u64::MAX, 3_650);
        assert_eq!(fee, u64::MAX);
    }

    #[test]
    fn test_performance_fee_is_stubbed_to_zero() {
        let mut sched = FeeSchedule::new(0);
        sched.update_rates(0, 3_000).unwrap();
        assert_eq!(sched.performance_fee_due(1_000_000), 0);
    }
}
