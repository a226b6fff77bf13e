use std::sync::Arc;

use fundledger::fund_core::{
    FundEvent, FundLedger, LedgerError, ManualClock, MemorySink, MemoryUnitLedger,
    DEFAULT_MANAGEMENT_FEE_BPS, DEFAULT_PERFORMANCE_FEE_BPS,
};

const MANAGER: u64 = 1;
const ALICE: u64 = 100;
const OUTSIDER: u64 = 999;

fn fund_with_clock(clock: ManualClock) -> FundLedger<MemoryUnitLedger, ManualClock> {
    FundLedger::create(MANAGER, "SUI", MemoryUnitLedger::new(), clock)
}

#[test]
fn test_new_fund_uses_default_schedule() {
    let fund = fund_with_clock(ManualClock::new(7));
    assert_eq!(fund.fee_schedule().management_fee_bps, DEFAULT_MANAGEMENT_FEE_BPS);
    assert_eq!(fund.fee_schedule().performance_fee_bps, DEFAULT_PERFORMANCE_FEE_BPS);
    assert_eq!(fund.fee_schedule().last_fee_collection, 7);
}

#[test]
fn test_one_year_management_fee_arithmetic() {
    let clock = ManualClock::new(0);
    let mut fund = fund_with_clock(clock.clone());
    fund.update_fee_schedule(MANAGER, 100, 0).unwrap();
    fund.deposit(ALICE, 36_500).unwrap();

    clock.advance(365);
    // 36500 * 100 * 365 / (10000 * 365) = 365
    assert_eq!(fund.pending_management_fee(), 365);
    let collected = fund.accrue_fees(MANAGER).unwrap();
    assert_eq!(collected, 365);

    assert_eq!(fund.total_nav(), 36_135);
    assert_eq!(fund.vault_balance("SUI"), 36_135);
    assert_eq!(fund.unit_ledger().base_received(MANAGER), 365);
    // share supply untouched by fee collection
    assert_eq!(fund.share_supply(), 36_500);
    assert_eq!(fund.fee_schedule().last_fee_collection, 365);
}

#[test]
fn test_accrual_by_non_manager_unauthorized() {
    let clock = ManualClock::new(0);
    let mut fund = fund_with_clock(clock.clone());
    fund.deposit(ALICE, 10_000).unwrap();
    clock.advance(365);

    let result = fund.accrue_fees(OUTSIDER);
    assert_eq!(result, Err(LedgerError::Unauthorized));
    // state untouched, accrual clock not advanced
    assert_eq!(fund.total_nav(), 10_000);
    assert_eq!(fund.vault_balance("SUI"), 10_000);
    assert_eq!(fund.fee_schedule().last_fee_collection, 0);
    assert_eq!(fund.unit_ledger().base_received(OUTSIDER), 0);
}

#[test]
fn test_accrual_within_same_epoch_collects_nothing() {
    let mut fund = fund_with_clock(ManualClock::new(0));
    fund.deposit(ALICE, 1_000_000).unwrap();

    assert_eq!(fund.accrue_fees(MANAGER).unwrap(), 0);
    assert_eq!(fund.total_nav(), 1_000_000);
}

#[test]
fn test_double_accrual_does_not_double_charge() {
    let clock = ManualClock::new(0);
    let mut fund = fund_with_clock(clock.clone());
    fund.update_fee_schedule(MANAGER, 100, 0).unwrap();
    fund.deposit(ALICE, 36_500).unwrap();

    clock.advance(365);
    assert_eq!(fund.accrue_fees(MANAGER).unwrap(), 365);
    // second call in the same epoch: zero epochs elapsed since collection
    assert_eq!(fund.accrue_fees(MANAGER).unwrap(), 0);
    assert_eq!(fund.total_nav(), 36_135);
}

#[test]
fn test_performance_rate_contributes_nothing() {
    let clock = ManualClock::new(0);
    let mut fund = fund_with_clock(clock.clone());
    // management zeroed, performance at its cap
    fund.update_fee_schedule(MANAGER, 0, 3_000).unwrap();
    fund.deposit(ALICE, 1_000_000).unwrap();

    clock.advance(365);
    assert_eq!(fund.accrue_fees(MANAGER).unwrap(), 0);
    assert_eq!(fund.total_nav(), 1_000_000);
}

#[test]
fn test_update_schedule_at_and_over_ceilings() {
    let mut fund = fund_with_clock(ManualClock::new(0));

    assert_eq!(
        fund.update_fee_schedule(MANAGER, 1_001, 0),
        Err(LedgerError::InvalidFeeParameter)
    );
    assert_eq!(
        fund.update_fee_schedule(MANAGER, 0, 3_001),
        Err(LedgerError::InvalidFeeParameter)
    );
    // rejected updates leave the schedule alone
    assert_eq!(fund.fee_schedule().management_fee_bps, DEFAULT_MANAGEMENT_FEE_BPS);

    fund.update_fee_schedule(MANAGER, 1_000, 3_000).unwrap();
    assert_eq!(fund.fee_schedule().management_fee_bps, 1_000);
    assert_eq!(fund.fee_schedule().performance_fee_bps, 3_000);
}

#[test]
fn test_update_schedule_by_non_manager_unauthorized() {
    let mut fund = fund_with_clock(ManualClock::new(0));
    assert_eq!(
        fund.update_fee_schedule(OUTSIDER, 100, 100),
        Err(LedgerError::Unauthorized)
    );
    assert_eq!(fund.fee_schedule().management_fee_bps, DEFAULT_MANAGEMENT_FEE_BPS);
}

#[test]
fn test_update_schedule_keeps_accrual_clock() {
    let clock = ManualClock::new(0);
    let mut fund = fund_with_clock(clock.clone());
    fund.update_fee_schedule(MANAGER, 100, 0).unwrap();
    fund.deposit(ALICE, 36_500).unwrap();

    // rate change halfway through the year does not reset the clock;
    // the new rate applies to the whole elapsed window
    clock.advance(180);
    fund.update_fee_schedule(MANAGER, 200, 0).unwrap();
    assert_eq!(fund.fee_schedule().last_fee_collection, 0);

    clock.advance(185);
    // 36500 * 200 * 365 / (10000 * 365) = 730
    assert_eq!(fund.accrue_fees(MANAGER).unwrap(), 730);
}

#[test]
fn test_accrual_publishes_record() {
    let clock = ManualClock::new(0);
    let sink = Arc::new(MemorySink::new());
    let mut fund = FundLedger::create(MANAGER, "SUI", MemoryUnitLedger::new(), clock.clone())
        .with_sink(Box::new(sink.clone()));
    fund.update_fee_schedule(MANAGER, 100, 0).unwrap();
    fund.deposit(ALICE, 36_500).unwrap();

    clock.advance(365);
    fund.accrue_fees(MANAGER).unwrap();

    let events = sink.drain();
    let accrued = events
        .iter()
        .find_map(|e| match e {
            FundEvent::FeesAccrued { management_fee, performance_fee, epochs, .. } => {
                Some((*management_fee, *performance_fee, *epochs))
            }
            _ => None,
        })
        .expect("no FeesAccrued record");
    assert_eq!(accrued, (365, 0, 365));
}

#[test]
fn test_zero_fee_accrual_publishes_nothing() {
    let sink = Arc::new(MemorySink::new());
    let mut fund = FundLedger::create(MANAGER, "SUI", MemoryUnitLedger::new(), ManualClock::new(0))
        .with_sink(Box::new(sink.clone()));
    fund.deposit(ALICE, 1_000).unwrap();

    assert_eq!(fund.accrue_fees(MANAGER).unwrap(), 0);
    let events = sink.drain();
    assert!(events.iter().all(|e| !matches!(e, FundEvent::FeesAccrued { .. })));
}
