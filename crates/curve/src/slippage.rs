//! Slippage bounds
//!
//! A buy gets a maximum acceptable cost, a sell a minimum acceptable output.

use crate::constants::BPS_SCALE;
use crate::error::CurveError;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

/// Apply a basis-point tolerance to `amount`
///
/// - Buy: amount × (10000 + bps) / 10000
/// - Sell: amount × (10000 − bps) / 10000
///
/// Tolerances of 10000 bps or more are rejected on both sides.
pub fn apply_tolerance(amount: u64, tolerance_bps: u16, side: Side) -> Result<u64, CurveError> {
    if u64::from(tolerance_bps) >= BPS_SCALE {
        return Err(CurveError::InvalidTolerance(tolerance_bps));
    }

    let multiplier = match side {
        Side::Buy => BPS_SCALE + u64::from(tolerance_bps),
        Side::Sell => BPS_SCALE - u64::from(tolerance_bps),
    };

    let bound = amount as u128 * multiplier as u128 / BPS_SCALE as u128;
    // Only a buy bound on an amount near u64::MAX can leave the range
    u64::try_from(bound).map_err(|_| CurveError::ArithmeticOverflow)
}
