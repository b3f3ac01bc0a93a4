//! Protocol constants
//!
//! Fixed by the deployed program; none of these are user-editable.

use solana_program::{pubkey, pubkey::Pubkey};

/// Launch program (bonding curve) id
pub const PROGRAM_ID: Pubkey = pubkey!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");

/// Protocol fee recipient passed to buy/sell
pub const FEE_RECIPIENT: Pubkey = pubkey!("CebN5WGQ4jvEPvsVU4EoHEpgzq1VV7AbicfhtW4xC9iM");

pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");
pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
pub const RENT_SYSVAR_ID: Pubkey = pubkey!("SysvarRent111111111111111111111111111111111");
pub const METADATA_PROGRAM_ID: Pubkey = pubkey!("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

/// PDA seeds
pub const GLOBAL_SEED: &[u8] = b"global";
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint-authority";
pub const BONDING_CURVE_SEED: &[u8] = b"bonding-curve";
pub const METADATA_SEED: &[u8] = b"metadata";
pub const EVENT_AUTHORITY_SEED: &[u8] = b"__event_authority";

/// Decimals of every launched token
pub const TOKEN_DECIMALS: u8 = 6;

/// 10^TOKEN_DECIMALS
pub const TOKEN_UNIT: u64 = 1_000_000;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Default graduation threshold (85 SOL of real reserves)
pub const GRADUATION_THRESHOLD_LAMPORTS: u64 = 85 * LAMPORTS_PER_SOL;

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// Instruction discriminators
pub mod discriminators {
    pub const CREATE: [u8; 8] = [24, 30, 200, 40, 5, 28, 7, 119];
    pub const BUY: [u8; 8] = [102, 6, 61, 18, 1, 218, 235, 234];
    pub const SELL: [u8; 8] = [51, 230, 133, 164, 1, 127, 131, 173];
}
