use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::fund_core::LedgerError;

pub type AccountId = u64;

/// Per-asset balance map backing the fund's NAV figure.
///
/// Only one asset identifier (the base asset) is in play today, but the
/// mapping is general so a multi-asset pool needs no redesign.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetVault {
    balances: FxHashMap<String, u64>,
}

impl AssetVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, asset_id: &str) -> u64 {
        self.balances.get(asset_id).copied().unwrap_or(0)
    }

    /// Increase an asset balance, creating the entry if absent.
    /// Callers validate the amount; overflow is a caller contract breach.
    pub fn credit(&mut self, asset_id: &str, amount: u64) -> Result<(), LedgerError> {
        let balance = self.balances.entry(asset_id.to_string()).or_insert(0);
        *balance = balance.checked_add(amount).ok_or(LedgerError::InvalidAmount)?;
        Ok(())
    }

    /// Decrease an asset balance. Never leaves a negative balance.
    pub fn debit(&mut self, asset_id: &str, amount: u64) -> Result<(), LedgerError> {
        match self.balances.get_mut(asset_id) {
            Some(balance) if *balance >= amount => {
                *balance -= amount;
                Ok(())
            }
            _ => Err(LedgerError::InsufficientBalance),
        }
    }

    /// Sum of every asset balance held
    pub fn total_held(&self) -> u64 {
        self.balances.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.balances.iter().map(|(id, bal)| (id.as_str(), *bal))
    }
}
