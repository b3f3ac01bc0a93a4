//! Constant product curve math (x·y=k)
//!
//! All products are taken in u128, so no u64 input can overflow an
//! intermediate. Division truncates toward zero, matching the program.

use crate::constants::{BPS_SCALE, TOKEN_UNIT};
use crate::error::CurveError;
use crate::slippage::Side;
use crate::state::ReserveState;

/// Exact non-negative rational
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio {
    pub numerator: u128,
    pub denominator: u128,
}

impl Ratio {
    pub const ZERO: Ratio = Ratio {
        numerator: 0,
        denominator: 1,
    };

    /// Zero denominator collapses to `ZERO`
    pub fn new(numerator: u128, denominator: u128) -> Self {
        if denominator == 0 {
            return Self::ZERO;
        }
        Self {
            numerator,
            denominator,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// floor(self × scale)
    pub fn scaled(&self, scale: u128) -> Result<u128, CurveError> {
        self.numerator
            .checked_mul(scale)
            .map(|n| n / self.denominator)
            .ok_or(CurveError::ArithmeticOverflow)
    }
}

/// Graduation progress in basis points, 0..=10000
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Progress(u16);

impl Progress {
    pub const COMPLETE: Progress = Progress(BPS_SCALE as u16);

    pub fn bps(&self) -> u16 {
        self.0
    }

    /// Percentage for display
    pub fn percent(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

/// Quote for a single swap against a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeQuote {
    pub side: Side,
    /// SOL in for a buy, tokens in for a sell
    pub amount_in: u64,
    /// Tokens out for a buy, SOL out for a sell
    pub amount_out: u64,
}

/// Spot price in lamports per token base unit
///
/// Zero when there are no virtual token reserves.
pub fn spot_price(state: &ReserveState) -> Ratio {
    Ratio::new(
        state.virtual_sol_reserves as u128,
        state.virtual_token_reserves as u128,
    )
}

/// Market capitalization in lamports
///
/// spot × supply. With the supply expressed in whole tokens the price is per
/// whole token, so the decimal scaling cancels either way.
pub fn market_cap(state: &ReserveState) -> Ratio {
    let price = spot_price(state);
    if price.is_zero() {
        return Ratio::ZERO;
    }
    // u64 × u64 always fits in u128
    Ratio::new(
        price.numerator * state.token_total_supply as u128,
        price.denominator,
    )
}

/// Market cap with the supply scaled to display units (whole tokens)
pub fn market_cap_per_unit(state: &ReserveState) -> Ratio {
    let cap = market_cap(state);
    Ratio::new(cap.numerator, cap.denominator * TOKEN_UNIT as u128)
}

/// Progress toward graduation: min(real_sol / threshold, 1)
///
/// A zero threshold counts as already graduated.
pub fn progress(state: &ReserveState, graduation_threshold: u64) -> Progress {
    if graduation_threshold == 0 {
        return Progress::COMPLETE;
    }
    let bps = state.real_sol_reserves as u128 * BPS_SCALE as u128 / graduation_threshold as u128;
    Progress(bps.min(BPS_SCALE as u128) as u16)
}

/// Tokens out for `sol_in` lamports
///
/// token_out = vt · sol_in / (vs + sol_in)
pub fn quote_buy(state: &ReserveState, sol_in: u64) -> Result<u64, CurveError> {
    swap_out(
        state.virtual_token_reserves,
        state.virtual_sol_reserves,
        sol_in,
    )
}

/// Lamports out for `token_in` base units
///
/// sol_out = vs · token_in / (vt + token_in)
pub fn quote_sell(state: &ReserveState, token_in: u64) -> Result<u64, CurveError> {
    swap_out(
        state.virtual_sol_reserves,
        state.virtual_token_reserves,
        token_in,
    )
}

/// Quote either side
pub fn quote(state: &ReserveState, side: Side, amount_in: u64) -> Result<TradeQuote, CurveError> {
    let amount_out = match side {
        Side::Buy => quote_buy(state, amount_in)?,
        Side::Sell => quote_sell(state, amount_in)?,
    };
    Ok(TradeQuote {
        side,
        amount_in,
        amount_out,
    })
}

/// out_reserve · amount_in / (in_reserve + amount_in), truncated
fn swap_out(out_reserve: u64, in_reserve: u64, amount_in: u64) -> Result<u64, CurveError> {
    if amount_in == 0 {
        return Ok(0);
    }

    let numerator = (out_reserve as u128)
        .checked_mul(amount_in as u128)
        .ok_or(CurveError::ArithmeticOverflow)?;
    let denominator = (in_reserve as u128)
        .checked_add(amount_in as u128)
        .ok_or(CurveError::ArithmeticOverflow)?;

    // amount_in > 0 so denominator > 0, and the result is at most out_reserve
    u64::try_from(numerator / denominator).map_err(|_| CurveError::ArithmeticOverflow)
}
