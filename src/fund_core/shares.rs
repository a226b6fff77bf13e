//! Share-accounting arithmetic
//!
//! Converts between base-asset amounts and ownership units at the current
//! share price (total_nav / share_supply). All divisions truncate toward
//! zero so rounding always favors the pool, never the counterparty.

use super::error::LedgerError;

/// Shares minted for a deposit of `amount` against the pre-deposit
/// `share_supply` and `total_nav`.
///
/// First deposit (supply == 0) bootstraps at 1:1. Otherwise
/// floor(amount * supply / nav), computed in u128 so the product
/// cannot wrap.
pub fn shares_for_deposit(
    amount: u64,
    share_supply: u64,
    total_nav: u64,
) -> Result<u64, LedgerError> {
    if share_supply == 0 {
        return Ok(amount);
    }
    if total_nav == 0 {
        // outstanding shares with nothing backing them
        return Err(LedgerError::CorruptedLedgerState);
    }
    let minted = amount as u128 * share_supply as u128 / total_nav as u128;
    // minted <= amount * (supply/nav); only exceeds u64 if the pool already
    // holds more shares per unit than u64 can express after this deposit
    u64::try_from(minted).map_err(|_| LedgerError::InvalidAmount)
}

/// Base-asset amount redeemed for burning `shares_amount` against the
/// pre-withdrawal `share_supply` and `total_nav`.
///
/// floor(shares * nav / supply). Since shares <= supply, the result
/// never exceeds nav.
pub fn assets_for_shares(
    shares_amount: u64,
    share_supply: u64,
    total_nav: u64,
) -> Result<u64, LedgerError> {
    if share_supply == 0 {
        return Err(LedgerError::CorruptedLedgerState);
    }
    let amount = shares_amount as u128 * total_nav as u128 / share_supply as u128;
    u64::try_from(amount).map_err(|_| LedgerError::InvalidAmount)
}
