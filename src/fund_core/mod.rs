//! Fund ledger core - pooled-investment share accounting
//!
//! Depositors contribute a base asset for proportional ownership units;
//! withdrawals redeem units for a slice of the pool; the manager accrues a
//! time-based management fee. Every operation is an atomic state transition:
//! it validates, mutates in full, or changes nothing.

pub mod core;
pub mod error;
pub mod events;
pub mod fee;
pub mod shares;
pub mod unit_ledger;

// Re-exports
pub use self::core::{EpochClock, FundLedger, ManualClock, SystemClock};
pub use error::LedgerError;
pub use events::{FundEvent, MemorySink, NotificationSink};
pub use fee::{
    FeeSchedule, BPS_DENOMINATOR, DEFAULT_MANAGEMENT_FEE_BPS, DEFAULT_PERFORMANCE_FEE_BPS,
    EPOCHS_PER_YEAR, MAX_MANAGEMENT_FEE_BPS, MAX_PERFORMANCE_FEE_BPS,
};
pub use unit_ledger::{MemoryUnitLedger, UnitCommand, UnitLedger};
