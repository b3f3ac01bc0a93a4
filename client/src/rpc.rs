//! Account reads against the cluster

use anyhow::{bail, Context, Result};
use launchpad_curve::constants::PROGRAM_ID;
use launchpad_curve::{bonding_curve_address, global_address, GlobalConfig, ReserveState};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;

/// Fetch and decode the bonding curve for `mint`
///
/// Checks the account owner; the decoder does not look at the discriminator.
pub async fn fetch_reserves(client: &RpcClient, mint: &Pubkey) -> Result<ReserveState> {
    let (address, _) = bonding_curve_address(mint);
    let account = client
        .get_account(&address)
        .await
        .context(format!("Failed to fetch bonding curve {} for mint {}", address, mint))?;

    if account.owner != PROGRAM_ID {
        bail!(
            "Bonding curve {} is owned by {}, expected {}",
            address,
            account.owner,
            PROGRAM_ID
        );
    }

    ReserveState::decode(&account.data).context(format!("Failed to decode bonding curve {}", address))
}

/// Fetch and decode the protocol's global account
pub async fn fetch_global(client: &RpcClient) -> Result<GlobalConfig> {
    let (address, _) = global_address();
    let data = client
        .get_account_data(&address)
        .await
        .context(format!("Failed to fetch global account {}", address))?;

    GlobalConfig::decode(&data).context("Failed to decode global account")
}

/// Whether an account exists at `address`
pub async fn account_exists(client: &RpcClient, address: &Pubkey) -> Result<bool> {
    let response = client
        .get_account_with_commitment(address, client.commitment())
        .await
        .context(format!("Failed to look up account {}", address))?;
    Ok(response.value.is_some())
}
