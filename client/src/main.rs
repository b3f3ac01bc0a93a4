//! Launchpad client
//!
//! Watches bonding curves and submits create/buy/sell transactions against the
//! launch program. All pricing and encoding comes from `launchpad_curve`; this
//! binary handles configuration, keys, RPC and policy.

mod config;
mod display;
mod rpc;
mod tx_builder;
mod watch;

use anyhow::{bail, Context, Result};
use config::Config;
use display::{format_price, format_sol, format_tokens, parse_sol, parse_tokens};
use futures::future::join_all;
use launchpad_curve::constants::FEE_RECIPIENT;
use launchpad_curve::{apply_tolerance, quote, CurveAddresses, Side};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use std::str::FromStr;
use std::time::Duration;
use tokio::time;
use watch::{CurveSummary, Observation, SnapshotTracker};

const USAGE: &str = "usage: launchpad [watch | quote <mint> buy|sell <amount> | buy <mint> <sol> | \
                     sell <mint> <tokens> | create <name> <symbol> <uri> | init-config <path>]";

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Watch,
    Quote { mint: Pubkey, side: Side, amount: u64 },
    Buy { mint: Pubkey, sol_in: u64 },
    Sell { mint: Pubkey, token_in: u64 },
    Create { name: String, symbol: String, uri: String },
    InitConfig { path: String },
}

impl Command {
    fn parse(args: &[String]) -> Result<Self> {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let command = match args.as_slice() {
            [] | ["watch"] => Self::Watch,
            ["quote", mint, side, amount] => {
                let side = match *side {
                    "buy" => Side::Buy,
                    "sell" => Side::Sell,
                    other => bail!("Unknown side {}; expected buy or sell", other),
                };
                let amount = match side {
                    Side::Buy => parse_sol(amount)?,
                    Side::Sell => parse_tokens(amount)?,
                };
                Self::Quote {
                    mint: parse_mint(mint)?,
                    side,
                    amount,
                }
            }
            ["buy", mint, sol] => Self::Buy {
                mint: parse_mint(mint)?,
                sol_in: parse_sol(sol)?,
            },
            ["sell", mint, tokens] => Self::Sell {
                mint: parse_mint(mint)?,
                token_in: parse_tokens(tokens)?,
            },
            ["create", name, symbol, uri] => Self::Create {
                name: name.to_string(),
                symbol: symbol.to_string(),
                uri: uri.to_string(),
            },
            ["init-config", path] => Self::InitConfig {
                path: path.to_string(),
            },
            _ => bail!("{}", USAGE),
        };
        Ok(command)
    }
}

fn parse_mint(s: &str) -> Result<Pubkey> {
    Pubkey::from_str(s).context(format!("Invalid mint address {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    if let Command::InitConfig { path } = &command {
        return Config::write_default(path);
    }

    // Load configuration
    let config = Config::load_or_default(&Config::path())?;

    log::info!("Connected to RPC: {}", config.rpc_url);

    let client = RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());

    match command {
        Command::Watch => watch_curves(&client, &config).await,
        Command::Quote { mint, side, amount } => show_quote(&client, &config, &mint, side, amount).await,
        Command::Buy { mint, sol_in } => {
            let wallet = load_keypair(&config.keypair_path)?;
            let signature = execute_buy(&client, &config, &wallet, &mint, sol_in).await?;
            log::info!("Buy confirmed: {}", signature);
            Ok(())
        }
        Command::Sell { mint, token_in } => {
            let wallet = load_keypair(&config.keypair_path)?;
            let signature = execute_sell(&client, &config, &wallet, &mint, token_in).await?;
            log::info!("Sell confirmed: {}", signature);
            Ok(())
        }
        Command::Create { name, symbol, uri } => {
            let wallet = load_keypair(&config.keypair_path)?;
            let signature = execute_create(&client, &wallet, &name, &symbol, &uri).await?;
            log::info!("Create confirmed: {}", signature);
            Ok(())
        }
        Command::InitConfig { .. } => Ok(()),
    }
}

/// Poll every watched curve on an interval
async fn watch_curves(client: &RpcClient, config: &Config) -> Result<()> {
    let mints = config.watch_mints()?;
    if mints.is_empty() {
        bail!("No watch_mints configured");
    }

    log::info!("Watching {} bonding curves", mints.len());

    let mut tracker = SnapshotTracker::new();
    let mut interval = time::interval(Duration::from_secs(config.poll_interval_secs));

    loop {
        interval.tick().await;

        // Refreshes are independent; one failing mint does not hold up the rest
        let snapshots = join_all(mints.iter().map(|mint| rpc::fetch_reserves(client, mint))).await;

        for (mint, snapshot) in mints.iter().zip(snapshots) {
            let state = match snapshot {
                Ok(state) => state,
                Err(e) => {
                    log::error!("Error refreshing {}: {:#}", mint, e);
                    continue;
                }
            };

            match tracker.observe(*mint, state) {
                Observation::Stale => {
                    let kept = tracker.latest(mint).map(|s| s.real_sol_reserves).unwrap_or(0);
                    log::warn!(
                        "Ignoring stale snapshot for {} (already complete at {} SOL)",
                        mint,
                        format_sol(kept as u128)
                    );
                    continue;
                }
                Observation::Graduated => log::info!("{} graduated from the bonding curve", mint),
                Observation::Complete => {
                    log::debug!("{} complete", mint);
                    continue;
                }
                Observation::Active => {}
            }

            let summary = match CurveSummary::from_state(&state, config.graduation_threshold_lamports) {
                Ok(summary) => summary,
                Err(e) => {
                    log::error!("Error summarizing {}: {}", mint, e);
                    continue;
                }
            };
            log::info!(
                "{} price {} SOL | mcap {} SOL | progress {:.2}% | 1 SOL buys {}",
                mint,
                format_price(&summary.spot_price),
                format_sol(summary.market_cap_lamports),
                summary.progress.percent(),
                format_tokens(summary.tokens_per_sol)
            );
        }

        log::debug!("Tracking {} curves", tracker.len());
    }
}

/// One-shot quote with the configured slippage bound
async fn show_quote(
    client: &RpcClient,
    config: &Config,
    mint: &Pubkey,
    side: Side,
    amount: u64,
) -> Result<()> {
    let state = rpc::fetch_reserves(client, mint).await?;
    if state.complete {
        log::warn!("Curve for {} is complete; quote is informational only", mint);
    }

    let trade = quote(&state, side, amount)?;
    match side {
        Side::Buy => {
            let max_cost = apply_tolerance(amount, config.slippage_bps, Side::Buy)?;
            log::info!(
                "{} SOL buys {} tokens (max cost {} SOL at {} bps)",
                format_sol(amount as u128),
                format_tokens(trade.amount_out),
                format_sol(max_cost as u128),
                config.slippage_bps
            );
        }
        Side::Sell => {
            let min_out = apply_tolerance(trade.amount_out, config.slippage_bps, Side::Sell)?;
            log::info!(
                "{} tokens sell for {} SOL (min {} SOL at {} bps)",
                format_tokens(amount),
                format_sol(trade.amount_out as u128),
                format_sol(min_out as u128),
                config.slippage_bps
            );
        }
    }
    Ok(())
}

/// Warn when the on-chain fee recipient differs from the one we pass
async fn check_fee_recipient(client: &RpcClient) {
    match rpc::fetch_global(client).await {
        Ok(global) if global.fee_recipient != FEE_RECIPIENT => log::warn!(
            "Global fee recipient {} differs from configured {}",
            global.fee_recipient,
            FEE_RECIPIENT
        ),
        Ok(global) => log::debug!("Protocol fee: {} bps", global.fee_basis_points),
        Err(e) => log::warn!("Could not read global account: {:#}", e),
    }
}

async fn execute_buy(
    client: &RpcClient,
    config: &Config,
    wallet: &Keypair,
    mint: &Pubkey,
    sol_in: u64,
) -> Result<Signature> {
    check_fee_recipient(client).await;

    let state = rpc::fetch_reserves(client, mint).await?;
    let user = wallet.pubkey();
    let user_ata = CurveAddresses::for_mint(mint).associated_user(&user);
    let needs_ata = !rpc::account_exists(client, &user_ata).await?;

    let plan = tx_builder::plan_buy(&state, mint, &user, sol_in, config.slippage_bps, needs_ata)?;
    log::info!(
        "Buying {} tokens for {} SOL (max {} SOL)",
        format_tokens(plan.quote.amount_out),
        format_sol(sol_in as u128),
        format_sol(plan.bound as u128)
    );

    submit(client, &plan.instructions, wallet, &[]).await
}

async fn execute_sell(
    client: &RpcClient,
    config: &Config,
    wallet: &Keypair,
    mint: &Pubkey,
    token_in: u64,
) -> Result<Signature> {
    check_fee_recipient(client).await;

    let state = rpc::fetch_reserves(client, mint).await?;
    let plan = tx_builder::plan_sell(&state, mint, &wallet.pubkey(), token_in, config.slippage_bps)?;
    log::info!(
        "Selling {} tokens for {} SOL (min {} SOL)",
        format_tokens(token_in),
        format_sol(plan.quote.amount_out as u128),
        format_sol(plan.bound as u128)
    );

    submit(client, &plan.instructions, wallet, &[]).await
}

async fn execute_create(
    client: &RpcClient,
    wallet: &Keypair,
    name: &str,
    symbol: &str,
    uri: &str,
) -> Result<Signature> {
    let mint = Keypair::new();
    log::info!("Creating {} ({}) with mint {}", name, symbol, mint.pubkey());

    let ix = tx_builder::plan_create(&mint.pubkey(), &wallet.pubkey(), name, symbol, uri)?;
    submit(client, &[ix], wallet, &[&mint]).await
}

/// Sign with a fresh blockhash and wait for confirmation
async fn submit(
    client: &RpcClient,
    instructions: &[solana_sdk::instruction::Instruction],
    payer: &Keypair,
    extra_signers: &[&Keypair],
) -> Result<Signature> {
    let blockhash = client
        .get_latest_blockhash()
        .await
        .context("Failed to fetch recent blockhash")?;

    let transaction = tx_builder::build_transaction(instructions, payer, extra_signers, blockhash)?;
    log::debug!("Submitting transaction {}", transaction.signatures[0]);

    client
        .send_and_confirm_transaction(&transaction)
        .await
        .context("Transaction failed")
}

/// Load wallet keypair from file
///
/// Accepts the solana-keygen JSON array, raw 64 bytes, or a base58 string.
fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded_path = shellexpand::tilde(path);
    let bytes = std::fs::read(expanded_path.as_ref())
        .context(format!("Failed to read keypair from {}", path))?;
    parse_keypair(&bytes)
}

fn parse_keypair(bytes: &[u8]) -> Result<Keypair> {
    let trimmed = bytes.trim_ascii();

    let secret: Vec<u8> = if bytes.len() == 64 {
        // Binary format
        bytes.to_vec()
    } else if trimmed.first() == Some(&b'[') {
        // JSON format
        serde_json::from_slice(trimmed).context("Failed to parse keypair JSON")?
    } else {
        let encoded = std::str::from_utf8(trimmed).context("Keypair file is not valid UTF-8")?;
        bs58::decode(encoded)
            .into_vec()
            .context("Failed to decode base58 keypair")?
    };

    Keypair::try_from(&secret[..]).context("Failed to create keypair from bytes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(&args(&[])).unwrap(), Command::Watch);

        let mint = Pubkey::new_unique();
        let mint_str = mint.to_string();

        assert_eq!(
            Command::parse(&args(&["buy", &mint_str, "1.5"])).unwrap(),
            Command::Buy {
                mint,
                sol_in: 1_500_000_000
            }
        );
        assert_eq!(
            Command::parse(&args(&["sell", &mint_str, "1000"])).unwrap(),
            Command::Sell {
                mint,
                token_in: 1_000_000_000
            }
        );
        assert_eq!(
            Command::parse(&args(&["quote", &mint_str, "sell", "0.5"])).unwrap(),
            Command::Quote {
                mint,
                side: Side::Sell,
                amount: 500_000
            }
        );

        assert!(Command::parse(&args(&["quote", &mint_str, "hold", "1"])).is_err());
        assert!(Command::parse(&args(&["buy", "not-a-mint", "1"])).is_err());
        assert!(Command::parse(&args(&["launch"])).is_err());
    }

    #[test]
    fn test_parse_keypair_formats() {
        let keypair = Keypair::new();
        let raw = keypair.to_bytes();

        let json = serde_json::to_vec(&raw.to_vec()).unwrap();
        assert_eq!(parse_keypair(&json).unwrap().pubkey(), keypair.pubkey());

        assert_eq!(parse_keypair(&raw).unwrap().pubkey(), keypair.pubkey());

        let b58 = format!("{}\n", bs58::encode(raw).into_string());
        assert_eq!(parse_keypair(b58.as_bytes()).unwrap().pubkey(), keypair.pubkey());

        assert!(parse_keypair(b"").is_err());
    }
}
