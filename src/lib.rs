//! Landing - Solana transaction workshop toolkit
//!
//! This library backs the workshop binaries in `src/bin/`: minting and
//! transferring SPL tokens, managing address lookup tables, and driving a
//! mock presale program, with compute-budget optimization via simulation.

pub mod config;
pub mod data_size;
pub mod estimator;
pub mod logging;
pub mod lut;
pub mod presale;
pub mod rpc;
pub mod token;
pub mod wallet;

// Re-export commonly used types
pub use solana_sdk::{pubkey::Pubkey, signature::Signature};
