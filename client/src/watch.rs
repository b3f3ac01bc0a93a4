//! Snapshot tracking for the price watcher

use launchpad_curve::constants::LAMPORTS_PER_SOL;
use launchpad_curve::{
    market_cap, progress, quote_buy, spot_price, CurveError, Progress, Ratio, ReserveState,
};
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;

/// Outcome of feeding one snapshot to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Curve still trading on the bonding curve
    Active,
    /// First snapshot seen with `complete` set
    Graduated,
    /// Curve was already known to be complete
    Complete,
    /// Snapshot claims not complete after a complete one; ignored
    Stale,
}

/// Per-mint view of the latest accepted snapshot
///
/// `complete` only ever moves false → true; an RPC node lagging behind can
/// return an older account, and such snapshots are dropped.
#[derive(Debug, Default)]
pub struct SnapshotTracker {
    latest: HashMap<Pubkey, ReserveState>,
}

impl SnapshotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, mint: Pubkey, state: ReserveState) -> Observation {
        let was_complete = self.latest.get(&mint).is_some_and(|prev| prev.complete);

        if was_complete && !state.complete {
            return Observation::Stale;
        }
        self.latest.insert(mint, state);

        match (was_complete, state.complete) {
            (true, _) => Observation::Complete,
            (false, true) => Observation::Graduated,
            (false, false) => Observation::Active,
        }
    }

    pub fn latest(&self, mint: &Pubkey) -> Option<&ReserveState> {
        self.latest.get(mint)
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }
}

/// Everything the watcher logs for one curve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveSummary {
    pub spot_price: Ratio,
    pub market_cap_lamports: u128,
    pub progress: Progress,
    /// Tokens received for 1 SOL
    pub tokens_per_sol: u64,
}

impl CurveSummary {
    pub fn from_state(state: &ReserveState, graduation_threshold: u64) -> Result<Self, CurveError> {
        Ok(Self {
            spot_price: spot_price(state),
            market_cap_lamports: market_cap(state).scaled(1)?,
            progress: progress(state, graduation_threshold),
            tokens_per_sol: quote_buy(state, LAMPORTS_PER_SOL)?,
        })
    }
}
