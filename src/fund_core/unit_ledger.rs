//! Fungible-unit ledger seam
//!
//! The fund core does not move tokens itself. Share mint/burn and base-asset
//! payouts are commands applied to an external ledger behind this trait.
//! `burn` must enforce that the holder actually owns the units; `mint` and
//! `transfer` never fail on valid input.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::asset_vault::AccountId;

use super::error::LedgerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UnitCommand {
    /// Create shares and credit them to an account
    MintShares { to: AccountId, amount: u64 },
    /// Destroy shares held by an account
    BurnShares { from: AccountId, amount: u64 },
    /// Pay base asset out of the pool to an account
    TransferBase { to: AccountId, amount: u64 },
}

pub trait UnitLedger {
    fn apply(&mut self, cmd: &UnitCommand) -> Result<(), LedgerError>;

    /// Total outstanding share units
    fn share_supply(&self) -> u64;

    fn share_balance(&self, who: AccountId) -> u64;
}

/// In-memory unit ledger. Backs the demo binary and tests; a production
/// embedding substitutes the host chain's token primitives here.
#[derive(Debug, Default)]
pub struct MemoryUnitLedger {
    shares: FxHashMap<AccountId, u64>,
    supply: u64,
    base_payouts: FxHashMap<AccountId, u64>,
}

impl MemoryUnitLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative base asset paid out to `who`
    pub fn base_received(&self, who: AccountId) -> u64 {
        self.base_payouts.get(&who).copied().unwrap_or(0)
    }
}

impl UnitLedger for MemoryUnitLedger {
    fn apply(&mut self, cmd: &UnitCommand) -> Result<(), LedgerError> {
        match *cmd {
            UnitCommand::MintShares { to, amount } => {
                let balance = self.shares.entry(to).or_insert(0);
                *balance = balance.checked_add(amount).ok_or(LedgerError::InvalidAmount)?;
                self.supply =
                    self.supply.checked_add(amount).ok_or(LedgerError::InvalidAmount)?;
                Ok(())
            }
            UnitCommand::BurnShares { from, amount } => {
                let balance = self.shares.entry(from).or_insert(0);
                if *balance < amount {
                    return Err(LedgerError::InsufficientBalance);
                }
                *balance -= amount;
                // supply >= any single balance, so this cannot underflow
                self.supply -= amount;
                Ok(())
            }
            UnitCommand::TransferBase { to, amount } => {
                let received = self.base_payouts.entry(to).or_insert(0);
                *received =
                    received.checked_add(amount).ok_or(LedgerError::InvalidAmount)?;
                Ok(())
            }
        }
    }

    fn share_supply(&self) -> u64 {
        self.supply
    }

    fn share_balance(&self, who: AccountId) -> u64 {
        self.shares.get(&who).copied().unwrap_or(0)
    }
}
