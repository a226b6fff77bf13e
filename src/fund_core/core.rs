//! FundLedger - the pooled-fund balance authority
//!
//! Deterministic state machine: one operation per call, validated up front,
//! committed in full or not at all. The host is expected to serialize calls
//! per fund; nothing here blocks on I/O.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::asset_vault::{AccountId, AssetVault};

use super::error::LedgerError;
use super::events::{FundEvent, NotificationSink};
use super::fee::FeeSchedule;
use super::shares;
use super::unit_ledger::{UnitCommand, UnitLedger};

/// Logical time source. Epochs are discrete and non-decreasing.
pub trait EpochClock {
    fn now_epoch(&self) -> u64;
}

const SECONDS_PER_EPOCH: u64 = 86_400;

/// Wall-clock epochs: days since the unix epoch
pub struct SystemClock;

impl EpochClock for SystemClock {
    fn now_epoch(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() / SECONDS_PER_EPOCH)
            .unwrap_or(0)
    }
}

/// Hand-advanced clock for tests and replay
#[derive(Clone, Default)]
pub struct ManualClock {
    epoch: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(epoch: u64) -> Self {
        Self { epoch: Arc::new(AtomicU64::new(epoch)) }
    }

    pub fn set(&self, epoch: u64) {
        self.epoch.store(epoch, Ordering::Relaxed);
    }

    pub fn advance(&self, epochs: u64) {
        self.epoch.fetch_add(epochs, Ordering::Relaxed);
    }
}

impl EpochClock for ManualClock {
    fn now_epoch(&self) -> u64 {
        self.epoch.load(Ordering::Relaxed)
    }
}

/// The pooled-investment fund aggregate.
///
/// Owns the asset vault and NAV bookkeeping; share supply lives in the
/// external unit ledger and is only queried here. Share price is
/// `total_nav / share_supply` and is constant across a single call.
pub struct FundLedger<U: UnitLedger, C: EpochClock> {
    vault: AssetVault,
    total_nav: u64,
    fee_schedule: FeeSchedule,
    manager: AccountId,
    base_asset: String,
    unit_ledger: U,
    clock: C,
    // Best-effort record delivery; never part of the commit boundary
    sink: Option<Box<dyn NotificationSink>>,
}

impl<U: UnitLedger, C: EpochClock> FundLedger<U, C> {
    /// Create a fund with zero NAV, zero shares, and the default fee
    /// schedule. The creator becomes the manager.
    pub fn create(creator: AccountId, base_asset: &str, unit_ledger: U, clock: C) -> Self {
        let created_at = clock.now_epoch();
        Self {
            vault: AssetVault::new(),
            total_nav: 0,
            fee_schedule: FeeSchedule::new(created_at),
            manager: creator,
            base_asset: base_asset.to_string(),
            unit_ledger,
            clock,
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn NotificationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Contribute `amount` of the base asset; mints shares at the current
    /// share price (1:1 when no shares are outstanding). Returns the number
    /// of shares minted.
    pub fn deposit(&mut self, depositor: AccountId, amount: u64) -> Result<u64, LedgerError> {
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let new_nav = self.total_nav.checked_add(amount).ok_or(LedgerError::InvalidAmount)?;
        if self.vault.balance(&self.base_asset).checked_add(amount).is_none() {
            return Err(LedgerError::InvalidAmount);
        }

        // Price the deposit against pre-deposit totals: no slippage within a call
        let shares_to_mint =
            shares::shares_for_deposit(amount, self.unit_ledger.share_supply(), self.total_nav)?;

        // External mint first: if it fails, the aggregate is untouched
        self.unit_ledger
            .apply(&UnitCommand::MintShares { to: depositor, amount: shares_to_mint })?;

        self.vault.credit(&self.base_asset, amount)?;
        self.total_nav = new_nav;

        self.publish(FundEvent::Deposited { depositor, amount, shares_minted: shares_to_mint });
        Ok(shares_to_mint)
    }

    /// Redeem `shares_amount` for a proportional slice of the pool,
    /// truncated in the pool's favor. Returns the base-asset amount paid out.
    pub fn withdraw(
        &mut self,
        withdrawer: AccountId,
        shares_amount: u64,
    ) -> Result<u64, LedgerError> {
        if shares_amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        let supply = self.unit_ledger.share_supply();
        let withdraw_amount = shares::assets_for_shares(shares_amount, supply, self.total_nav)?;

        // Every debit is validated before the first mutation, so a failing
        // withdrawal observably changes nothing.
        if withdraw_amount > self.total_nav {
            return Err(LedgerError::InsufficientBalance);
        }
        if self.vault.balance(&self.base_asset) < withdraw_amount {
            return Err(LedgerError::InsufficientBalance);
        }

        // Burn enforces the withdrawer actually holds the shares
        self.unit_ledger
            .apply(&UnitCommand::BurnShares { from: withdrawer, amount: shares_amount })?;

        self.total_nav -= withdraw_amount;
        self.vault.debit(&self.base_asset, withdraw_amount)?;
        self.unit_ledger
            .apply(&UnitCommand::TransferBase { to: withdrawer, amount: withdraw_amount })?;

        self.publish(FundEvent::Withdrawn {
            withdrawer,
            shares_burned: shares_amount,
            amount: withdraw_amount,
        });
        Ok(withdraw_amount)
    }

    /// Collect the management fee accrued since the last collection and pay
    /// it to the manager. Manager-only. Returns the amount collected.
    pub fn accrue_fees(&mut self, caller: AccountId) -> Result<u64, LedgerError> {
        if caller != self.manager {
            return Err(LedgerError::Unauthorized);
        }
        let now = self.clock.now_epoch();
        let epochs = self.fee_schedule.epochs_since_collection(now);
        let management_fee = self.fee_schedule.management_fee_due(self.total_nav, now);
        let performance_fee = self.fee_schedule.performance_fee_due(self.total_nav);
        let total_fee = management_fee
            .checked_add(performance_fee)
            .ok_or(LedgerError::InvalidAmount)?;

        if total_fee > self.total_nav {
            return Err(LedgerError::InsufficientBalance);
        }
        if self.vault.balance(&self.base_asset) < total_fee {
            return Err(LedgerError::InsufficientBalance);
        }

        if total_fee > 0 {
            self.vault.debit(&self.base_asset, total_fee)?;
            self.total_nav -= total_fee;
            self.unit_ledger
                .apply(&UnitCommand::TransferBase { to: self.manager, amount: total_fee })?;

            self.publish(FundEvent::FeesAccrued {
                manager: self.manager,
                management_fee,
                performance_fee,
                epochs,
            });
        }

        // Advance the accrual clock only after the transfer, and never
        // backwards if the clock source regressed
        if now > self.fee_schedule.last_fee_collection {
            self.fee_schedule.last_fee_collection = now;
        }
        Ok(total_fee)
    }

    /// Replace both fee rates. Manager-only; rates stay within policy caps.
    /// The accrual clock is not reset.
    pub fn update_fee_schedule(
        &mut self,
        caller: AccountId,
        management_fee_bps: u64,
        performance_fee_bps: u64,
    ) -> Result<(), LedgerError> {
        if caller != self.manager {
            return Err(LedgerError::Unauthorized);
        }
        self.fee_schedule.update_rates(management_fee_bps, performance_fee_bps)?;
        self.publish(FundEvent::FeeScheduleUpdated { management_fee_bps, performance_fee_bps });
        Ok(())
    }

    /// Management fee that `accrue_fees` would collect right now
    pub fn pending_management_fee(&self) -> u64 {
        self.fee_schedule.management_fee_due(self.total_nav, self.clock.now_epoch())
    }

    pub fn total_nav(&self) -> u64 {
        self.total_nav
    }

    pub fn share_supply(&self) -> u64 {
        self.unit_ledger.share_supply()
    }

    pub fn share_balance(&self, who: AccountId) -> u64 {
        self.unit_ledger.share_balance(who)
    }

    pub fn vault_balance(&self, asset_id: &str) -> u64 {
        self.vault.balance(asset_id)
    }

    pub fn base_asset(&self) -> &str {
        &self.base_asset
    }

    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.fee_schedule
    }

    pub fn manager(&self) -> AccountId {
        self.manager
    }

    pub fn unit_ledger(&self) -> &U {
        &self.unit_ledger
    }

    fn publish(&self, event: FundEvent) {
        if let Some(sink) = &self.sink {
            sink.publish(&event);
        }
    }
}
