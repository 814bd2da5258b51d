//! Wallet loading for the workshop binaries

use anyhow::{Context, Result};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};

use crate::config::WalletSettings;

/// Fee payer / authority wallet used by every binary
pub struct Wallet {
    keypair: Keypair,
}

impl Wallet {
    /// Load the wallet: `WALLET_SECRET` (base58) if set, else the keypair file.
    pub fn load(settings: &WalletSettings) -> Result<Self> {
        if let Ok(secret) = std::env::var("WALLET_SECRET") {
            return Self::from_base58(secret.trim());
        }
        Self::from_file(&expand_home(&settings.keypair_path))
    }

    /// Create a wallet from a keypair file (solana-keygen JSON or raw bytes)
    pub fn from_file(path: &str) -> Result<Self> {
        let keypair_bytes =
            std::fs::read(path).with_context(|| format!("Failed to read keypair file: {}", path))?;

        let keypair = if keypair_bytes.len() == 64 {
            // Raw bytes format - validate before conversion
            if keypair_bytes.iter().all(|&b| b == 0) {
                anyhow::bail!("Invalid keypair: all-zero key rejected");
            }
            Keypair::try_from(keypair_bytes.as_slice()).context("Invalid keypair bytes")?
        } else {
            // JSON format
            let json: Vec<u8> =
                serde_json::from_slice(&keypair_bytes).context("Failed to parse keypair JSON")?;
            if json.len() != 64 {
                anyhow::bail!("Invalid keypair length: expected 64 bytes, got {}", json.len());
            }
            if json.iter().all(|&b| b == 0) {
                anyhow::bail!("Invalid keypair: all-zero key rejected");
            }
            Keypair::try_from(json.as_slice()).context("Invalid keypair from JSON")?
        };

        Ok(Self { keypair })
    }

    /// Create a wallet from a base58-encoded 64-byte secret key
    pub fn from_base58(secret: &str) -> Result<Self> {
        let bytes = bs58::decode(secret)
            .into_vec()
            .context("WALLET_SECRET is not valid base58")?;
        if bytes.len() != 64 {
            anyhow::bail!("Invalid secret length: expected 64 bytes, got {}", bytes.len());
        }
        if bytes.iter().all(|&b| b == 0) {
            anyhow::bail!("Invalid keypair: all-zero key rejected");
        }
        let keypair = Keypair::try_from(bytes.as_slice()).context("Invalid secret key bytes")?;
        Ok(Self { keypair })
    }

    /// Get the public key
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Get a reference to the keypair (for signing operations)
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return format!("{}/{}", home, rest);
        }
    }
    path.to_string()
}
