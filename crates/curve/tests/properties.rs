use launchpad_curve::*;
use proptest::prelude::*;
use sha2::{Digest, Sha256};

fn reserves() -> impl Strategy<Value = ReserveState> {
    (
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        any::<bool>(),
    )
        .prop_map(|(vt, vs, rt, rs, supply, complete)| ReserveState {
            virtual_token_reserves: vt,
            virtual_sol_reserves: vs,
            real_token_reserves: rt,
            real_sol_reserves: rs,
            token_total_supply: supply,
            complete,
        })
}

proptest! {
    #[test]
    fn decode_recovers_encoded_fields(state in reserves(), tag in any::<[u8; 8]>()) {
        let data = state.encode(tag);
        prop_assert_eq!(data.len(), ReserveState::LEN);
        prop_assert_eq!(ReserveState::decode(&data).unwrap(), state);
    }

    #[test]
    fn decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..128)) {
        let result = ReserveState::decode(&data);
        prop_assert_eq!(result.is_ok(), data.len() >= ReserveState::LEN);
        let _ = GlobalConfig::decode(&data);
        let _ = CurveInstruction::decode(&data);
    }

    #[test]
    fn quotes_never_overflow(state in reserves(), amount in any::<u64>()) {
        let buy = quote_buy(&state, amount).unwrap();
        let sell = quote_sell(&state, amount).unwrap();
        prop_assert!(buy <= state.virtual_token_reserves);
        prop_assert!(sell <= state.virtual_sol_reserves);
    }

    #[test]
    fn quote_buy_is_monotonic(state in reserves(), a in any::<u64>(), b in any::<u64>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(quote_buy(&state, lo).unwrap() <= quote_buy(&state, hi).unwrap());
    }

    #[test]
    fn quote_sell_is_monotonic(state in reserves(), a in any::<u64>(), b in any::<u64>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(quote_sell(&state, lo).unwrap() <= quote_sell(&state, hi).unwrap());
    }

    #[test]
    fn buy_never_shrinks_product(
        vt in 1u64..=u64::MAX,
        vs in 0u64..=u64::MAX / 2,
        sol_in in 0u64..=u64::MAX / 2,
    ) {
        let state = ReserveState {
            virtual_token_reserves: vt,
            virtual_sol_reserves: vs,
            ..ReserveState::default()
        };
        let out = quote_buy(&state, sol_in).unwrap();

        // vs + sol_in < 2^64, so both products fit in u128
        let before = vs as u128 * vt as u128;
        let after = (vs as u128 + sol_in as u128) * (vt - out) as u128;
        prop_assert!(after >= before);
    }

    #[test]
    fn sell_never_shrinks_product(
        vs in 1u64..=u64::MAX,
        vt in 0u64..=u64::MAX / 2,
        token_in in 0u64..=u64::MAX / 2,
    ) {
        let state = ReserveState {
            virtual_token_reserves: vt,
            virtual_sol_reserves: vs,
            ..ReserveState::default()
        };
        let out = quote_sell(&state, token_in).unwrap();

        let before = vs as u128 * vt as u128;
        let after = (vt as u128 + token_in as u128) * (vs - out) as u128;
        prop_assert!(after >= before);
    }

    #[test]
    fn tolerance_bounds_point_the_right_way(amount in 0u64..=u64::MAX / 2, bps in 0u16..10_000) {
        prop_assert!(apply_tolerance(amount, bps, Side::Buy).unwrap() >= amount);
        prop_assert!(apply_tolerance(amount, bps, Side::Sell).unwrap() <= amount);
    }

    #[test]
    fn tolerance_rejects_full_scale(amount in any::<u64>(), bps in 10_000u16..=u16::MAX) {
        prop_assert_eq!(apply_tolerance(amount, bps, Side::Sell), Err(CurveError::InvalidTolerance(bps)));
        prop_assert_eq!(apply_tolerance(amount, bps, Side::Buy), Err(CurveError::InvalidTolerance(bps)));
    }

    #[test]
    fn progress_stays_in_range(state in reserves(), threshold in any::<u64>()) {
        let p = progress(&state, threshold);
        prop_assert!(p.bps() <= 10_000);
        prop_assert!((0.0..=100.0).contains(&p.percent()));
    }

    #[test]
    fn trade_encoding_is_deterministic(amount in any::<u64>(), bound in any::<u64>()) {
        let buy = encode_buy(amount, bound);
        prop_assert_eq!(&buy, &encode_buy(amount, bound));
        prop_assert_eq!(
            CurveInstruction::decode(&buy).unwrap(),
            CurveInstruction::Buy { amount, max_sol_cost: bound }
        );

        let sell = encode_sell(amount, bound);
        prop_assert_eq!(&sell, &encode_sell(amount, bound));
        prop_assert_eq!(
            CurveInstruction::decode(&sell).unwrap(),
            CurveInstruction::Sell { amount, min_sol_output: bound }
        );
    }

    #[test]
    fn create_encoding_recovers_strings(name in ".{0,40}", symbol in ".{0,12}", uri in ".{0,200}") {
        let data = encode_create(&name, &symbol, &uri).unwrap();
        prop_assert_eq!(&data, &encode_create(&name, &symbol, &uri).unwrap());
        prop_assert_eq!(data.len(), 8 + 12 + name.len() + symbol.len() + uri.len());
        prop_assert_eq!(
            CurveInstruction::decode(&data).unwrap(),
            CurveInstruction::Create { name, symbol, uri }
        );
    }
}

#[test]
fn discriminators_follow_anchor_sighash() {
    fn sighash(name: &str) -> [u8; 8] {
        let digest = Sha256::digest(format!("global:{name}").as_bytes());
        let mut out = [0u8; 8];
        out.copy_from_slice(&digest[..8]);
        out
    }

    assert_eq!(constants::discriminators::CREATE, sighash("create"));
    assert_eq!(constants::discriminators::BUY, sighash("buy"));
    assert_eq!(constants::discriminators::SELL, sighash("sell"));
}
