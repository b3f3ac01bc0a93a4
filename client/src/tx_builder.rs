//! Transaction builder for create/buy/sell
//!
//! Turns a reserve snapshot plus user intent into signed transactions. This is
//! where trade policy lives: graduated curves are refused here, not in the
//! curve math.

use launchpad_curve::{
    apply_tolerance, buy_instruction, create_instruction, quote, sell_instruction, CurveError,
    MetadataLimits, ReserveState, Side, TradeQuote,
};
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    packet::PACKET_DATA_SIZE,
    pubkey::Pubkey,
    signature::Keypair,
    signer::{Signer, SignerError},
    transaction::Transaction,
};
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TradeError {
    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error("quote for {amount_in} in produces nothing")]
    ZeroQuote { amount_in: u64 },

    #[error("transaction is {size} bytes, limit is {limit}")]
    TransactionTooLarge { size: usize, limit: usize },

    #[error("failed to sign transaction: {0}")]
    Signing(#[from] SignerError),

    #[error("failed to serialize transaction: {0}")]
    Serialize(#[from] bincode::Error),
}

/// A quoted trade and the instructions that execute it
#[derive(Debug, Clone)]
pub struct TradePlan {
    pub quote: TradeQuote,

    /// max_sol_cost for a buy, min_sol_output for a sell
    pub bound: u64,

    pub instructions: Vec<Instruction>,
}

/// Plan a buy spending `sol_in` lamports
///
/// The instruction asks for the quoted token amount and caps the cost at
/// `sol_in` plus tolerance. The user's token account is created idempotently
/// when `create_user_ata` is set.
pub fn plan_buy(
    state: &ReserveState,
    mint: &Pubkey,
    user: &Pubkey,
    sol_in: u64,
    slippage_bps: u16,
    create_user_ata: bool,
) -> Result<TradePlan, TradeError> {
    state.ensure_tradable()?;

    let quote = quote(state, Side::Buy, sol_in)?;
    if quote.amount_out == 0 {
        return Err(TradeError::ZeroQuote { amount_in: sol_in });
    }
    let max_sol_cost = apply_tolerance(sol_in, slippage_bps, Side::Buy)?;

    let mut instructions = Vec::with_capacity(2);
    if create_user_ata {
        instructions.push(create_associated_token_account_idempotent(
            user,
            user,
            mint,
            &launchpad_curve::constants::TOKEN_PROGRAM_ID,
        ));
    }
    instructions.push(buy_instruction(mint, user, quote.amount_out, max_sol_cost));

    Ok(TradePlan {
        quote,
        bound: max_sol_cost,
        instructions,
    })
}

/// Plan a sell of `token_in` base units
pub fn plan_sell(
    state: &ReserveState,
    mint: &Pubkey,
    user: &Pubkey,
    token_in: u64,
    slippage_bps: u16,
) -> Result<TradePlan, TradeError> {
    state.ensure_tradable()?;

    let quote = quote(state, Side::Sell, token_in)?;
    if quote.amount_out == 0 {
        return Err(TradeError::ZeroQuote { amount_in: token_in });
    }
    let min_sol_output = apply_tolerance(quote.amount_out, slippage_bps, Side::Sell)?;

    Ok(TradePlan {
        quote,
        bound: min_sol_output,
        instructions: vec![sell_instruction(mint, user, token_in, min_sol_output)],
    })
}

/// Build the `create` instruction, enforcing metadata limits
pub fn plan_create(
    mint: &Pubkey,
    user: &Pubkey,
    name: &str,
    symbol: &str,
    uri: &str,
) -> Result<Instruction, TradeError> {
    Ok(create_instruction(
        mint,
        user,
        name,
        symbol,
        uri,
        &MetadataLimits::default(),
    )?)
}

/// Sign `instructions` with the payer plus any extra signers
///
/// Missing or surplus signers are an error rather than a panic. Rejects
/// transactions that would not fit in a single packet.
pub fn build_transaction(
    instructions: &[Instruction],
    payer: &Keypair,
    extra_signers: &[&Keypair],
    recent_blockhash: Hash,
) -> Result<Transaction, TradeError> {
    let mut signers: Vec<&Keypair> = Vec::with_capacity(1 + extra_signers.len());
    signers.push(payer);
    signers.extend_from_slice(extra_signers);

    let mut transaction = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
    transaction.try_sign(signers.as_slice(), recent_blockhash)?;

    let size = bincode::serialized_size(&transaction)? as usize;
    if size > PACKET_DATA_SIZE {
        return Err(TradeError::TransactionTooLarge {
            size,
            limit: PACKET_DATA_SIZE,
        });
    }

    Ok(transaction)
}
