//! Program-derived addresses
//!
//! The derivation itself (bump search from 255 downward, off-curve check) is
//! `Pubkey::find_program_address`; this module owns the seed lists.

use crate::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, BONDING_CURVE_SEED, EVENT_AUTHORITY_SEED, GLOBAL_SEED,
    METADATA_PROGRAM_ID, METADATA_SEED, MINT_AUTHORITY_SEED, PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use solana_program::pubkey::Pubkey;

/// Derive an address and its bump from ordered seeds
pub fn derive(seeds: &[&[u8]], program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(seeds, program_id)
}

/// ["global"]
pub fn global_address() -> (Pubkey, u8) {
    derive(&[GLOBAL_SEED], &PROGRAM_ID)
}

/// ["mint-authority"]
pub fn mint_authority_address() -> (Pubkey, u8) {
    derive(&[MINT_AUTHORITY_SEED], &PROGRAM_ID)
}

/// ["bonding-curve", mint]
pub fn bonding_curve_address(mint: &Pubkey) -> (Pubkey, u8) {
    derive(&[BONDING_CURVE_SEED, mint.as_ref()], &PROGRAM_ID)
}

/// ["__event_authority"]
pub fn event_authority_address() -> (Pubkey, u8) {
    derive(&[EVENT_AUTHORITY_SEED], &PROGRAM_ID)
}

/// ["metadata", metadata_program, mint] under the metadata program
pub fn metadata_address(mint: &Pubkey) -> (Pubkey, u8) {
    derive(
        &[METADATA_SEED, METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &METADATA_PROGRAM_ID,
    )
}

/// [owner, token_program, mint] under the associated token program
///
/// Owners may themselves be PDAs (the bonding curve owns its token account).
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    derive(
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
}

/// Every derived address a create/buy/sell for one mint needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveAddresses {
    pub mint: Pubkey,
    pub global: Pubkey,
    pub mint_authority: Pubkey,
    pub bonding_curve: Pubkey,
    pub associated_bonding_curve: Pubkey,
    pub metadata: Pubkey,
    pub event_authority: Pubkey,
}

impl CurveAddresses {
    pub fn for_mint(mint: &Pubkey) -> Self {
        let bonding_curve = bonding_curve_address(mint).0;
        Self {
            mint: *mint,
            global: global_address().0,
            mint_authority: mint_authority_address().0,
            bonding_curve,
            associated_bonding_curve: associated_token_address(&bonding_curve, mint).0,
            metadata: metadata_address(mint).0,
            event_authority: event_authority_address().0,
        }
    }

    /// The user's token account for this mint
    pub fn associated_user(&self, user: &Pubkey) -> Pubkey {
        associated_token_address(user, &self.mint).0
    }
}
