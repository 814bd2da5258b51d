//! Configuration for the workshop binaries
//!
//! All binaries share one `workshop.toml` file (path overridable via the
//! `WORKSHOP_CONFIG` environment variable). Every field has a default that
//! matches the devnet workshop setup, so a missing file still works.
//! A `.env` file is honored, and a few well-known variables (`RPC_URL`,
//! `KEYPAIR_PATH`, `MINT_ADDRESS`, `LUT_ADDRESS`) override the file.

use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};
use tracing::debug;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint configuration
    #[serde(default)]
    pub rpc: RpcSettings,

    /// Wallet configuration
    #[serde(default)]
    pub wallet: WalletSettings,

    /// SPL token configuration
    #[serde(default)]
    pub token: TokenSettings,

    /// Address lookup table configuration
    #[serde(default)]
    pub lookup_table: LookupTableSettings,

    /// Mock presale program configuration
    #[serde(default)]
    pub presale: PresaleSettings,

    /// Fee and compute-budget tuning
    #[serde(default)]
    pub fees: FeeSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcSettings {
    /// RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub url: String,

    /// Cluster name used for explorer links
    #[serde(default = "default_cluster")]
    pub cluster: String,

    /// Request timeout in seconds
    #[serde(default = "default_rpc_timeout")]
    pub timeout_secs: u64,

    /// Read consistency level: "processed", "confirmed" or "finalized"
    #[serde(default = "default_commitment")]
    pub commitment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSettings {
    /// Path to the keypair file (solana-keygen format)
    #[serde(default = "default_keypair_path")]
    pub keypair_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSettings {
    /// Address of the token mint the scripts operate on
    #[serde(default = "default_mint_address")]
    pub mint_address: String,

    /// Mint decimals
    #[serde(default = "default_decimals")]
    pub decimals: u8,

    /// Transfer recipient wallet
    #[serde(default = "default_recipient")]
    pub recipient: String,

    /// Whole tokens minted by the spl-mint binary
    #[serde(default = "default_mint_amount")]
    pub mint_amount_tokens: u64,

    /// Tokens moved by the transfer binaries
    #[serde(default = "default_transfer_amount")]
    pub transfer_amount_tokens: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupTableSettings {
    /// Address of an existing lookup table (created by lut-create)
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresaleSettings {
    /// Program id of the deployed mock presale program
    #[serde(default = "default_presale_program")]
    pub program_id: String,

    /// Tokens granted per SOL, passed to initialize
    #[serde(default = "default_rate")]
    pub tokens_to_sol_rate: u64,

    /// Per-purchase cap in base units, passed to initialize
    #[serde(default = "default_purchase_limit")]
    pub limit_per_purchase: u64,

    /// Lamports spent by the presale-purchase binary
    #[serde(default = "default_purchase_lamports")]
    pub purchase_lamports: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeSettings {
    /// Compute unit price in micro-lamports
    #[serde(default = "default_cu_price")]
    pub cu_price_micro_lamports: u64,

    /// Extra bytes added to the statically summed account footprint.
    /// Empirically tuned; re-measure when the loaded account set changes.
    #[serde(default = "default_static_margin")]
    pub static_footprint_margin_bytes: u32,

    /// Extra bytes added to the footprint probed via getMultipleAccounts.
    /// Empirically tuned; re-measure when the loaded account set changes.
    #[serde(default = "default_probed_margin")]
    pub probed_footprint_margin_bytes: u32,
}

// Default value functions
fn default_rpc_url() -> String {
    "https://api.devnet.solana.com".to_string()
}
fn default_cluster() -> String {
    "devnet".to_string()
}
fn default_rpc_timeout() -> u64 {
    30
}
fn default_commitment() -> String {
    "confirmed".to_string()
}
fn default_keypair_path() -> String {
    "~/.config/solana/id.json".to_string()
}
fn default_mint_address() -> String {
    "2kWHF9xq2ScP2aUcDLnVMQdoqCWdroBx6oGtjYrgrLwz".to_string()
}
fn default_decimals() -> u8 {
    9
}
fn default_recipient() -> String {
    "Bfop4khToYhkXcNMAM8Mher7euqdhctWB1v6m4Csinma".to_string()
}
fn default_mint_amount() -> u64 {
    100_000_000
}
fn default_transfer_amount() -> f64 {
    0.0001
}
fn default_presale_program() -> String {
    "Dhhuntngi4avDYGCpMeBThyA3rxTm5renL3CRoyez6Ed".to_string()
}
fn default_rate() -> u64 {
    10_000
}
fn default_purchase_limit() -> u64 {
    // 10 whole tokens at 9 decimals
    10_000_000_000
}
fn default_purchase_lamports() -> u64 {
    // 0.001 SOL
    1_000_000
}
fn default_cu_price() -> u64 {
    10_000
}
fn default_static_margin() -> u32 {
    11
}
fn default_probed_margin() -> u32 {
    23
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            url: default_rpc_url(),
            cluster: default_cluster(),
            timeout_secs: default_rpc_timeout(),
            commitment: default_commitment(),
        }
    }
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            keypair_path: default_keypair_path(),
        }
    }
}

impl Default for TokenSettings {
    fn default() -> Self {
        Self {
            mint_address: default_mint_address(),
            decimals: default_decimals(),
            recipient: default_recipient(),
            mint_amount_tokens: default_mint_amount(),
            transfer_amount_tokens: default_transfer_amount(),
        }
    }
}

impl Default for PresaleSettings {
    fn default() -> Self {
        Self {
            program_id: default_presale_program(),
            tokens_to_sol_rate: default_rate(),
            limit_per_purchase: default_purchase_limit(),
            purchase_lamports: default_purchase_lamports(),
        }
    }
}

impl Default for FeeSettings {
    fn default() -> Self {
        Self {
            cu_price_micro_lamports: default_cu_price(),
            static_footprint_margin_bytes: default_static_margin(),
            probed_footprint_margin_bytes: default_probed_margin(),
        }
    }
}

impl Config {
    /// Load configuration: `.env`, then the TOML file, then env overrides.
    ///
    /// A missing config file is not an error; defaults target devnet.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path =
            std::env::var("WORKSHOP_CONFIG").unwrap_or_else(|_| "workshop.toml".to_string());

        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path, "Config file not found, using defaults");
                Self::default()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read config file: {}", path))
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply well-known environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("RPC_URL") {
            self.rpc.url = url;
        }
        if let Ok(path) = std::env::var("KEYPAIR_PATH") {
            self.wallet.keypair_path = path;
        }
        if let Ok(mint) = std::env::var("MINT_ADDRESS") {
            self.token.mint_address = mint;
        }
        if let Ok(lut) = std::env::var("LUT_ADDRESS") {
            self.lookup_table.address = Some(lut);
        }
    }
}

impl RpcSettings {
    /// Commitment level for reads and simulations.
    pub fn commitment(&self) -> CommitmentConfig {
        match self.commitment.as_str() {
            "processed" => CommitmentConfig::processed(),
            "finalized" => CommitmentConfig::finalized(),
            _ => CommitmentConfig::confirmed(),
        }
    }
}

impl TokenSettings {
    pub fn mint(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.mint_address)
            .with_context(|| format!("Invalid mint address: {}", self.mint_address))
    }

    pub fn recipient(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.recipient)
            .with_context(|| format!("Invalid recipient address: {}", self.recipient))
    }
}

impl LookupTableSettings {
    /// The configured lookup table, required by the binaries that use one.
    pub fn address(&self) -> Result<Pubkey> {
        let address = self
            .address
            .as_deref()
            .context("No lookup table configured; run lut-create and set lookup_table.address")?;
        Pubkey::from_str(address).with_context(|| format!("Invalid lookup table: {}", address))
    }
}

impl PresaleSettings {
    pub fn program_id(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.program_id)
            .with_context(|| format!("Invalid presale program id: {}", self.program_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_devnet() {
        let config = Config::default();
        assert_eq!(config.rpc.url, "https://api.devnet.solana.com");
        assert_eq!(config.rpc.cluster, "devnet");
        assert_eq!(config.token.decimals, 9);
        assert_eq!(config.fees.cu_price_micro_lamports, 10_000);
        assert_eq!(config.fees.static_footprint_margin_bytes, 11);
        assert_eq!(config.fees.probed_footprint_margin_bytes, 23);
        assert!(config.lookup_table.address.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [rpc]
            url = "http://localhost:8899"

            [presale]
            tokens_to_sol_rate = 42
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(config.rpc.url, "http://localhost:8899");
        assert_eq!(config.rpc.commitment, "confirmed");
        assert_eq!(config.presale.tokens_to_sol_rate, 42);
        assert_eq!(config.presale.purchase_lamports, 1_000_000);
        assert_eq!(config.token.mint_amount_tokens, 100_000_000);
    }

    #[test]
    fn test_env_override_wins() {
        let mut config = Config::default();
        std::env::set_var("RPC_URL", "http://127.0.0.1:8899");
        config.apply_env_overrides();
        std::env::remove_var("RPC_URL");
        assert_eq!(config.rpc.url, "http://127.0.0.1:8899");
    }

    #[test]
    fn test_commitment_parsing() {
        let mut settings = RpcSettings::default();
        assert_eq!(settings.commitment(), CommitmentConfig::confirmed());

        settings.commitment = "finalized".to_string();
        assert_eq!(settings.commitment(), CommitmentConfig::finalized());

        settings.commitment = "bogus".to_string();
        assert_eq!(settings.commitment(), CommitmentConfig::confirmed());
    }

    #[test]
    fn test_default_addresses_parse() {
        let config = Config::default();
        assert!(config.token.mint().is_ok());
        assert!(config.token.recipient().is_ok());
        assert!(config.presale.program_id().is_ok());
        assert!(config.lookup_table.address().is_err());
    }
}
