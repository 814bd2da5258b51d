//! Presale state account: PDA derivation and decoding

use anyhow::{Context, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{native_token::LAMPORTS_PER_SOL, pubkey::Pubkey};
use thiserror::Error;
use tracing::debug;

use super::account_discriminator;

/// Seed of the singleton program-state PDA
pub const STATE_SEED: &[u8] = b"state";

/// Seed prefix of the per-mint token-vault PDA
pub const VAULT_SEED: &[u8] = b"token-vault";

// discriminator + authority + token_mint + token_vault + rate + limit
const STATE_ACCOUNT_LEN: usize = 8 + 32 + 32 + 32 + 8 + 8;

/// Errors raised by the presale client
#[derive(Debug, Error)]
pub enum PresaleError {
    #[error("State account data too short: {0} bytes")]
    StateTooShort(usize),

    #[error("State account discriminator mismatch (not a ProgramState account)")]
    WrongDiscriminator,

    #[error("Token arithmetic overflowed for {lamports} lamports at rate {rate}")]
    RateOverflow { lamports: u64, rate: u64 },
}

/// Decoded program state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramState {
    pub authority: Pubkey,
    pub token_mint: Pubkey,
    pub token_vault: Pubkey,
    pub tokens_to_sol_rate: u64,
    pub limit_per_purchase: u64,
}

/// Derive the program-state PDA.
pub fn state_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[STATE_SEED], program_id).0
}

/// Derive the token-vault PDA for a mint.
pub fn vault_address(program_id: &Pubkey, mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[VAULT_SEED, mint.as_ref()], program_id).0
}

impl ProgramState {
    /// Decode the state from raw account data.
    pub fn unpack(data: &[u8]) -> Result<Self, PresaleError> {
        if data.len() < STATE_ACCOUNT_LEN {
            return Err(PresaleError::StateTooShort(data.len()));
        }
        if data[..8] != account_discriminator("ProgramState") {
            return Err(PresaleError::WrongDiscriminator);
        }

        Ok(Self {
            authority: read_pubkey(data, 8),
            token_mint: read_pubkey(data, 40),
            token_vault: read_pubkey(data, 72),
            tokens_to_sol_rate: read_u64(data, 104),
            limit_per_purchase: read_u64(data, 112),
        })
    }

    /// Tokens a purchase of `lamports` yields: rate * lamports / 1 SOL.
    pub fn expected_tokens(&self, lamports: u64) -> Result<u64, PresaleError> {
        self.tokens_to_sol_rate
            .checked_mul(lamports)
            .map(|product| product / LAMPORTS_PER_SOL)
            .ok_or(PresaleError::RateOverflow {
                lamports,
                rate: self.tokens_to_sol_rate,
            })
    }
}

/// Fetch and decode the state account of a deployed presale program.
pub async fn fetch_state(rpc: &RpcClient, program_id: &Pubkey) -> Result<ProgramState> {
    let address = state_address(program_id);
    debug!(state = %address, "Fetching presale state");

    let account = rpc
        .get_account_with_commitment(&address, rpc.commitment())
        .await?
        .value
        .with_context(|| {
            format!("Presale state {} not found; run presale-initialize first", address)
        })?;

    Ok(ProgramState::unpack(&account.data)?)
}

fn read_pubkey(data: &[u8], offset: usize) -> Pubkey {
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&data[offset..offset + 32]);
    Pubkey::new_from_array(bytes)
}

fn read_u64(data: &[u8], offset: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&data[offset..offset + 8]);
    u64::from_le_bytes(bytes)
}
