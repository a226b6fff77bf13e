//! Error types for the fund ledger core

use std::fmt;

/// Reasons for rejecting a ledger operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// Zero, negative-equivalent, or overflowing quantity
    InvalidAmount,
    /// Vault or NAV cannot cover a debit
    InsufficientBalance,
    /// Caller is not the fund manager
    Unauthorized,
    /// Fee rate exceeds the policy ceiling
    InvalidFeeParameter,
    /// Internal invariant violated (division guards).
    /// Should never trigger under correct use; signals a bug if it does.
    CorruptedLedgerState,
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::InvalidAmount => write!(f, "invalid amount"),
            LedgerError::InsufficientBalance => write!(f, "insufficient balance"),
            LedgerError::Unauthorized => write!(f, "caller is not the fund manager"),
            LedgerError::InvalidFeeParameter => write!(f, "fee rate exceeds policy ceiling"),
            LedgerError::CorruptedLedgerState => write!(f, "ledger state corrupted"),
        }
    }
}

impl std::error::Error for LedgerError {}
