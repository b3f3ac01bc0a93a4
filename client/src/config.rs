//! Client configuration

use anyhow::{bail, Context, Result};
use launchpad_curve::constants::{BPS_SCALE, GRADUATION_THRESHOLD_LAMPORTS};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::path::Path;
use std::str::FromStr;

/// Env var naming the config file
pub const CONFIG_ENV: &str = "LAUNCHPAD_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// RPC URL for the Solana cluster
    pub rpc_url: String,

    /// Wallet keypair path (JSON array, raw bytes, or base58)
    pub keypair_path: String,

    /// Watcher polling interval in seconds
    pub poll_interval_secs: u64,

    /// Slippage tolerance applied to trades (1000 = 10%)
    pub slippage_bps: u16,

    /// Upper bound accepted for `slippage_bps`
    pub max_slippage_bps: u16,

    /// Real SOL reserves at which a curve counts as graduated
    pub graduation_threshold_lamports: u64,

    /// Mints polled by `watch` (base58)
    #[serde(default)]
    pub watch_mints: Vec<String>,
}

impl Config {
    /// Config file path, from `LAUNCHPAD_CONFIG` or the working directory
    pub fn path() -> String {
        std::env::var(CONFIG_ENV).unwrap_or_else(|_| "launchpad-config.toml".to_string())
    }

    /// Load from `config_path`, falling back to mainnet defaults only when the
    /// file does not exist. Parse and validation errors are returned.
    pub fn load_or_default(config_path: &str) -> Result<Self> {
        if !Path::new(config_path).exists() {
            log::warn!("No config at {}, using default mainnet config", config_path);
            return Ok(Self::default_mainnet());
        }
        Self::load_from(config_path)
    }

    /// Load configuration from TOML file
    pub fn load_from(config_path: &str) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)
            .context(format!("Failed to read config file: {}", config_path))?;

        let config: Config = toml::from_str(&config_str).context("Failed to parse config TOML")?;
        config.validate()?;

        Ok(config)
    }

    /// Create default configuration
    pub fn default_mainnet() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            keypair_path: "~/.config/solana/id.json".to_string(),
            poll_interval_secs: 5,
            slippage_bps: 1_000,     // 10%, memecoins move fast
            max_slippage_bps: 5_000, // 50%
            graduation_threshold_lamports: GRADUATION_THRESHOLD_LAMPORTS,
            watch_mints: Vec::new(),
        }
    }

    /// Reject values the trade path would refuse anyway
    pub fn validate(&self) -> Result<()> {
        if u64::from(self.max_slippage_bps) >= BPS_SCALE {
            bail!("max_slippage_bps must be below {}", BPS_SCALE);
        }
        if self.slippage_bps > self.max_slippage_bps {
            bail!(
                "slippage_bps {} exceeds max_slippage_bps {}",
                self.slippage_bps,
                self.max_slippage_bps
            );
        }
        if self.graduation_threshold_lamports == 0 {
            bail!("graduation_threshold_lamports must be non-zero");
        }
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be non-zero");
        }
        self.watch_mints()?;
        Ok(())
    }

    /// Parsed watch list
    pub fn watch_mints(&self) -> Result<Vec<Pubkey>> {
        self.watch_mints
            .iter()
            .map(|s| Pubkey::from_str(s).context(format!("Invalid mint in watch_mints: {}", s)))
            .collect()
    }

    /// Write default config to file
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_mainnet();
        let toml_str = toml::to_string_pretty(&config).context("Failed to serialize config")?;

        std::fs::write(path, toml_str).context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}
