//! Scripted fund session against the in-memory unit ledger.
//!
//! Deposits from several accounts, a simulated fee accrual, then full
//! redemption, with the ledger invariant checked at the end.

use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;

use fundledger::configure::load_config;
use fundledger::fund_core::{FundLedger, ManualClock, MemoryUnitLedger, MemorySink};
use fundledger::logger::setup_logger;
use fundledger::{log_deposit_accepted, log_fees_accrued, log_withdrawal_settled};

#[derive(Parser, Debug)]
#[command(name = "fund_demo", about = "Run a scripted pooled-fund session")]
struct Args {
    /// Number of depositor accounts
    #[arg(long, default_value_t = 3)]
    depositors: u64,

    /// Deposit amount per account, in the smallest base-asset denomination
    #[arg(long, default_value_t = 1_000_000_000)]
    amount: u64,

    /// Epochs to advance before the fee accrual
    #[arg(long, default_value_t = 365)]
    epochs: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config()?;
    if let Err(e) = setup_logger(&config) {
        eprintln!("logger setup failed: {}", e);
    }

    const MANAGER: u64 = 1;
    let clock = ManualClock::new(0);
    let sink = Arc::new(MemorySink::new());
    let mut fund = FundLedger::create(
        MANAGER,
        &config.base_asset,
        MemoryUnitLedger::new(),
        clock.clone(),
    )
    .with_sink(Box::new(sink.clone()));

    fund.update_fee_schedule(MANAGER, config.management_fee_bps, config.performance_fee_bps)?;

    log::info!(
        "fund created: base_asset={} management_fee_bps={}",
        config.base_asset,
        config.management_fee_bps
    );

    // Deposits
    let first_depositor = 100;
    for depositor in first_depositor..first_depositor + args.depositors {
        let shares = fund.deposit(depositor, args.amount)?;
        log_deposit_accepted!(depositor, args.amount, shares, fund.total_nav());
    }

    // Fee accrual after the simulated holding period
    clock.advance(args.epochs);
    let pending = fund.pending_management_fee();
    log::info!("pending management fee after {} epochs: {}", args.epochs, pending);
    let collected = fund.accrue_fees(MANAGER)?;
    log_fees_accrued!(MANAGER, collected, args.epochs, fund.total_nav());

    // Full redemption
    for withdrawer in first_depositor..first_depositor + args.depositors {
        let shares = fund.share_balance(withdrawer);
        let amount = fund.withdraw(withdrawer, shares)?;
        log_withdrawal_settled!(withdrawer, shares, amount, fund.total_nav());
    }

    let vault_balance = fund.vault_balance(fund.base_asset());
    println!(
        "session done: nav={} vault={} supply={} fee_collected={} records={}",
        fund.total_nav(),
        vault_balance,
        fund.share_supply(),
        collected,
        sink.len()
    );

    if fund.total_nav() != vault_balance {
        bail!("ledger invariant violated: nav {} != vault {}", fund.total_nav(), vault_balance);
    }
    Ok(())
}
