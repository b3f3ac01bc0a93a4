//! Raw account bytes through to a ready-to-sign instruction

use launchpad_curve::constants::{discriminators, FEE_RECIPIENT, GRADUATION_THRESHOLD_LAMPORTS};
use launchpad_curve::*;
use solana_program::pubkey::Pubkey;

const SLIPPAGE_BPS: u16 = 1000;

fn account_bytes(complete: bool) -> Vec<u8> {
    let mut data = vec![0x17, 0xb7, 0xf8, 0x37, 0x60, 0xd8, 0xac, 0x60];
    for v in [
        1_073_000_000_000_000u64,
        30_000_000_000,
        793_100_000_000_000,
        42_500_000_000,
        1_000_000_000_000_000,
    ] {
        data.extend_from_slice(&v.to_le_bytes());
    }
    data.push(complete as u8);
    data
}

#[test]
fn test_buy_pipeline() {
    let mint = Pubkey::new_unique();
    let user = Pubkey::new_unique();
    let sol_in = 1_000_000_000;

    let state = ReserveState::decode(&account_bytes(false)).unwrap();
    state.ensure_tradable().unwrap();
    assert_eq!(progress(&state, GRADUATION_THRESHOLD_LAMPORTS).percent(), 50.0);

    let trade = quote(&state, Side::Buy, sol_in).unwrap();
    let max_cost = apply_tolerance(sol_in, SLIPPAGE_BPS, Side::Buy).unwrap();
    assert_eq!(max_cost, 1_100_000_000);

    let ix = buy_instruction(&mint, &user, trade.amount_out, max_cost);
    assert_eq!(ix.accounts[1].pubkey, FEE_RECIPIENT);
    assert_eq!(ix.accounts[3].pubkey, bonding_curve_address(&mint).0);
    assert_eq!(
        CurveInstruction::decode(&ix.data).unwrap(),
        CurveInstruction::Buy {
            amount: 34_612_903_225_806,
            max_sol_cost: 1_100_000_000,
        }
    );
}

#[test]
fn test_sell_pipeline() {
    let mint = Pubkey::new_unique();
    let user = Pubkey::new_unique();
    let tokens = 34_612_903_225_806;

    let state = ReserveState::decode(&account_bytes(false)).unwrap();
    let sol_out = quote_sell(&state, tokens).unwrap();
    let min_out = apply_tolerance(sol_out, SLIPPAGE_BPS, Side::Sell).unwrap();
    assert!(min_out < sol_out);

    let ix = sell_instruction(&mint, &user, tokens, min_out);
    assert_eq!(&ix.data[..8], &discriminators::SELL);
    assert_eq!(ix.data.len(), 24);
}

#[test]
fn test_completed_curve_is_rejected_before_building() {
    let state = ReserveState::decode(&account_bytes(true)).unwrap();

    // Still quotable, but not tradable
    assert!(quote_buy(&state, 1_000_000_000).unwrap() > 0);
    assert_eq!(state.ensure_tradable(), Err(CurveError::CurveComplete));
}

#[test]
fn test_short_account_never_yields_state() {
    let data = account_bytes(false);
    assert!(matches!(
        ReserveState::decode(&data[..40]),
        Err(CurveError::Decode(DecodeError::TooShort { len: 40, .. }))
    ));
}

#[test]
fn test_concurrent_quotes_are_independent() {
    let state = ReserveState::decode(&account_bytes(false)).unwrap();
    let expected = quote_buy(&state, 1_000_000_000).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(move || quote_buy(&state, 1_000_000_000).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
