//! Human-readable amounts
//!
//! Integer formatting only; values are truncated, never rounded up.

use anyhow::{bail, Context, Result};
use launchpad_curve::constants::{LAMPORTS_PER_SOL, TOKEN_DECIMALS, TOKEN_UNIT};
use launchpad_curve::Ratio;

/// `value / 10^decimals` with exactly `decimals` fractional digits
fn fixed(value: u128, decimals: u32) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let scale = 10u128.pow(decimals);
    format!(
        "{}.{:0width$}",
        value / scale,
        value % scale,
        width = decimals as usize
    )
}

/// `amount / unit` shown with `decimals` digits
fn fixed_ratio(amount: u128, unit: u128, decimals: u32) -> String {
    let scaled = amount.saturating_mul(10u128.pow(decimals)) / unit;
    fixed(scaled, decimals)
}

/// Lamports as SOL, with precision shrinking as the amount grows
pub fn format_sol(lamports: u128) -> String {
    let unit = LAMPORTS_PER_SOL as u128;
    let decimals = if lamports >= 1_000 * unit {
        0
    } else if lamports >= unit {
        2
    } else if lamports >= unit / 100 {
        4
    } else {
        6
    };
    fixed_ratio(lamports, unit, decimals)
}

/// Token base units as whole tokens with a K/M/B suffix
pub fn format_tokens(base_units: u64) -> String {
    let unit = TOKEN_UNIT as u128;
    let value = base_units as u128;
    for (threshold, suffix) in [(1_000_000_000u128, "B"), (1_000_000, "M"), (1_000, "K")] {
        if value >= threshold * unit {
            return format!("{}{}", fixed_ratio(value, threshold * unit, 2), suffix);
        }
    }
    fixed_ratio(value, unit, 2)
}

/// Spot price (lamports per base unit) as SOL per whole token
pub fn format_price(price: &Ratio) -> String {
    // lamports/base × 10^6 base/token ÷ 10^9 lamports/SOL, kept to 12 places
    const PLACES: u32 = 12;
    let scale = TOKEN_UNIT as u128 * 10u128.pow(PLACES) / LAMPORTS_PER_SOL as u128;
    match price.scaled(scale) {
        Ok(v) => fixed(v, PLACES),
        Err(_) => "overflow".to_string(),
    }
}

/// Parse a decimal string ("1.5") into base units with `decimals` places
pub fn parse_units(input: &str, decimals: u8) -> Result<u64> {
    let input = input.trim();
    let (whole, frac) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        bail!("Empty amount");
    }
    if frac.len() > decimals as usize {
        bail!("Amount {} has more than {} decimal places", input, decimals);
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        bail!("Amount {} is not a plain decimal number", input);
    }

    let scale = 10u64.pow(decimals as u32);
    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole.parse().context(format!("Invalid amount {}", input))?
    };
    let frac: u64 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = decimals as usize);
        padded.parse().context(format!("Invalid amount {}", input))?
    };

    whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac))
        .context(format!("Amount {} out of range", input))
}

pub fn parse_sol(input: &str) -> Result<u64> {
    parse_units(input, 9)
}

pub fn parse_tokens(input: &str) -> Result<u64> {
    parse_units(input, TOKEN_DECIMALS)
}
