//! Client for the mock presale program
//!
//! The on-chain program sells a fixed-rate token for SOL out of a vault:
//! `initialize` creates the state and vault PDAs, `purchase` swaps lamports
//! for tokens into the buyer's associated token account. This module
//! derives the PDAs, encodes the two instructions and decodes the state
//! account - the program itself is an external collaborator.

mod instructions;
mod state;

pub use instructions::{initialize, purchase};
pub use state::{
    fetch_state, state_address, vault_address, PresaleError, ProgramState, STATE_SEED, VAULT_SEED,
};

use sha2::{Digest, Sha256};

/// Anchor 8-byte discriminator: sha256(prefix)[..8].
pub(crate) fn discriminator(preimage: &str) -> [u8; 8] {
    let hash = Sha256::digest(preimage.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[..8]);
    bytes
}

/// Instruction discriminator for a global program method.
pub(crate) fn instruction_discriminator(name: &str) -> [u8; 8] {
    discriminator(&format!("global:{}", name))
}

/// Account discriminator for an Anchor account type.
pub(crate) fn account_discriminator(name: &str) -> [u8; 8] {
    discriminator(&format!("account:{}", name))
}
