//! Unrealized PnL.

use futura_core::{Contracts, Price};
use rust_decimal::Decimal;

/// Mark-to-market PnL: `contracts × (current − entry)`.
///
/// Signed contracts make one formula cover both sides. Saturates at the
/// `Decimal` range.
#[inline]
pub fn pnl(contracts: Contracts, entry_price: Price, current_price: Price) -> Decimal {
    contracts
        .inner()
        .saturating_mul(current_price.inner().saturating_sub(entry_price.inner()))
}

/// PnL as a percentage of posted margin. `None` when no margin is posted.
pub fn pnl_pct_of_margin(pnl: Decimal, margin: Decimal) -> Option<Decimal> {
    if margin.is_zero() {
        return None;
    }
    pnl.checked_div(margin)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
}
