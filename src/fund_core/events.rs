use serde::{Deserialize, Serialize};

use crate::asset_vault::AccountId;

/// Records published after a committed state transition.
/// Delivery is best-effort and outside the commit boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FundEvent {
    /// Depositor contributed base asset and received shares
    Deposited {
        depositor: AccountId,
        amount: u64,
        shares_minted: u64,
    },

    /// Withdrawer burned shares and received base asset
    Withdrawn {
        withdrawer: AccountId,
        shares_burned: u64,
        amount: u64,
    },

    /// Manager collected accrued fees
    FeesAccrued {
        manager: AccountId,
        management_fee: u64,
        performance_fee: u64,
        epochs: u64,
    },

    /// Manager replaced the fee rates
    FeeScheduleUpdated {
        management_fee_bps: u64,
        performance_fee_bps: u64,
    },
}

/// Sink for fund event records.
///
/// Implementations must not block the state transition and must swallow
/// their own delivery failures; the ledger never inspects an outcome.
pub trait NotificationSink {
    fn publish(&self, event: &FundEvent);
}

/// Collects events in memory. Test and demo sink.
#[derive(Default)]
pub struct MemorySink {
    events: std::sync::Mutex<Vec<FundEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<FundEvent> {
        std::mem::take(&mut self.events.lock().unwrap())
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for MemorySink {
    fn publish(&self, event: &FundEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

// Lets callers keep a handle on a sink they hand to the ledger
impl<S: NotificationSink> NotificationSink for std::sync::Arc<S> {
    fn publish(&self, event: &FundEvent) {
        (**self).publish(event);
    }
}
