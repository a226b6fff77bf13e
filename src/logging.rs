/// Structured logging utilities
///
/// Ledger operations log one JSON event per committed transition so a log
/// pipeline can reconstruct the fund's history without parsing free text.

use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Get current timestamp in milliseconds
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Structured log event builder
///
/// Usage:
/// ```
/// use fundledger::logging::LogEvent;
///
/// let log_value = LogEvent::new("DEPOSIT_ACCEPTED")
///     .field("depositor", 1001)
///     .field("amount", 1000000)
///     .service("fund_ledger")
///     .build();
///
/// log::info!("{}", log_value);
/// ```
pub struct LogEvent {
    fields: serde_json::Map<String, Value>,
}

impl LogEvent {
    /// Create a new log event with the given event name
    pub fn new(event: &str) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert("event".to_string(), json!(event));
        fields.insert("timestamp_ms".to_string(), json!(now_ms()));

        Self { fields }
    }

    /// Add a field to the log event
    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    /// Add service name
    pub fn service(mut self, service: &str) -> Self {
        self.fields.insert("service".to_string(), json!(service));
        self
    }

    /// Build the final JSON value
    pub fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// Helper macros for the hot ledger events
#[macro_export]
macro_rules! log_deposit_accepted {
    ($depositor:expr, $amount:expr, $shares_minted:expr, $nav_after:expr) => {
        log::info!(
            "{}",
            $crate::logging::LogEvent::new("DEPOSIT_ACCEPTED")
                .field("depositor", $depositor)
                .field("amount", $amount)
                .field("shares_minted", $shares_minted)
                .field("nav_after", $nav_after)
                .service("fund_ledger")
                .build()
        );
    };
}

#[macro_export]
macro_rules! log_withdrawal_settled {
    ($withdrawer:expr, $shares_burned:expr, $amount:expr, $nav_after:expr) => {
        log::info!(
            "{}",
            $crate::logging::LogEvent::new("WITHDRAWAL_SETTLED")
                .field("withdrawer", $withdrawer)
                .field("shares_burned", $shares_burned)
                .field("amount", $amount)
                .field("nav_after", $nav_after)
                .service("fund_ledger")
                .build()
        );
    };
}

#[macro_export]
macro_rules! log_fees_accrued {
    ($manager:expr, $total_fee:expr, $epochs:expr, $nav_after:expr) => {
        log::info!(
            "{}",
            $crate::logging::LogEvent::new("FEES_ACCRUED")
                .field("manager", $manager)
                .field("total_fee", $total_fee)
                .field("epochs", $epochs)
                .field("nav_after", $nav_after)
                .service("fund_ledger")
                .build()
        );
    };
}
