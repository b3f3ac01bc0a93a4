//! Account roles and full instructions for create/buy/sell
//!
//! Order and signer/writable flags match the program's account lists exactly.

use crate::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, FEE_RECIPIENT, METADATA_PROGRAM_ID, PROGRAM_ID, RENT_SYSVAR_ID,
    SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use crate::error::CurveError;
use crate::instruction::{encode_buy, encode_create_checked, encode_sell, MetadataLimits};
use crate::pda::CurveAddresses;
use solana_program::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

/// Accounts for `create`
pub fn create_accounts(addrs: &CurveAddresses, user: &Pubkey) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new(addrs.mint, true),
        AccountMeta::new_readonly(addrs.mint_authority, false),
        AccountMeta::new(addrs.bonding_curve, false),
        AccountMeta::new(addrs.associated_bonding_curve, false),
        AccountMeta::new_readonly(addrs.global, false),
        AccountMeta::new_readonly(METADATA_PROGRAM_ID, false),
        AccountMeta::new(addrs.metadata, false),
        AccountMeta::new(*user, true),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        AccountMeta::new_readonly(addrs.event_authority, false),
        AccountMeta::new_readonly(PROGRAM_ID, false),
    ]
}

/// Accounts for `buy`
pub fn buy_accounts(addrs: &CurveAddresses, user: &Pubkey) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new_readonly(addrs.global, false),
        AccountMeta::new(FEE_RECIPIENT, false),
        AccountMeta::new_readonly(addrs.mint, false),
        AccountMeta::new(addrs.bonding_curve, false),
        AccountMeta::new(addrs.associated_bonding_curve, false),
        AccountMeta::new(addrs.associated_user(user), false),
        AccountMeta::new(*user, true),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
        AccountMeta::new_readonly(addrs.event_authority, false),
        AccountMeta::new_readonly(PROGRAM_ID, false),
    ]
}

/// Accounts for `sell` (same as buy without the rent sysvar)
pub fn sell_accounts(addrs: &CurveAddresses, user: &Pubkey) -> Vec<AccountMeta> {
    vec![
        AccountMeta::new_readonly(addrs.global, false),
        AccountMeta::new(FEE_RECIPIENT, false),
        AccountMeta::new_readonly(addrs.mint, false),
        AccountMeta::new(addrs.bonding_curve, false),
        AccountMeta::new(addrs.associated_bonding_curve, false),
        AccountMeta::new(addrs.associated_user(user), false),
        AccountMeta::new(*user, true),
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
        AccountMeta::new_readonly(addrs.event_authority, false),
        AccountMeta::new_readonly(PROGRAM_ID, false),
    ]
}

/// Build the `create` instruction for a new mint
pub fn create_instruction(
    mint: &Pubkey,
    user: &Pubkey,
    name: &str,
    symbol: &str,
    uri: &str,
    limits: &MetadataLimits,
) -> Result<Instruction, CurveError> {
    let addrs = CurveAddresses::for_mint(mint);
    Ok(Instruction {
        program_id: PROGRAM_ID,
        accounts: create_accounts(&addrs, user),
        data: encode_create_checked(name, symbol, uri, limits)?,
    })
}

/// Build the `buy` instruction
pub fn buy_instruction(mint: &Pubkey, user: &Pubkey, amount: u64, max_sol_cost: u64) -> Instruction {
    let addrs = CurveAddresses::for_mint(mint);
    Instruction {
        program_id: PROGRAM_ID,
        accounts: buy_accounts(&addrs, user),
        data: encode_buy(amount, max_sol_cost),
    }
}

/// Build the `sell` instruction
pub fn sell_instruction(
    mint: &Pubkey,
    user: &Pubkey,
    amount: u64,
    min_sol_output: u64,
) -> Instruction {
    let addrs = CurveAddresses::for_mint(mint);
    Instruction {
        program_id: PROGRAM_ID,
        accounts: sell_accounts(&addrs, user),
        data: encode_sell(amount, min_sol_output),
    }
}
