//! RPC plumbing shared by the workshop binaries
//!
//! One nonblocking client per binary run, no pooling, no retries: every
//! script is a single linear flow and transport errors propagate to main.

use std::time::Duration;

use anyhow::Result;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    address_lookup_table::AddressLookupTableAccount,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::{Transaction, VersionedTransaction},
};
use tracing::debug;

use crate::config::RpcSettings;

/// Build the RPC client from config (url, timeout, commitment).
pub fn connect(settings: &RpcSettings) -> RpcClient {
    RpcClient::new_with_timeout_and_commitment(
        settings.url.clone(),
        Duration::from_secs(settings.timeout_secs),
        settings.commitment(),
    )
}

/// Sign and submit a legacy transaction, waiting for confirmation.
pub async fn send_legacy(
    rpc: &RpcClient,
    instructions: &[Instruction],
    payer: &Pubkey,
    signers: &[&Keypair],
) -> Result<Signature> {
    let blockhash = rpc.get_latest_blockhash().await?;
    let transaction = Transaction::new_signed_with_payer(instructions, Some(payer), signers, blockhash);

    debug!(instruction_count = instructions.len(), "Submitting legacy transaction");
    let signature = rpc.send_and_confirm_transaction(&transaction).await?;
    Ok(signature)
}

/// Sign and submit a v0 transaction compiled against lookup tables.
pub async fn send_v0(
    rpc: &RpcClient,
    instructions: &[Instruction],
    payer: &Pubkey,
    signers: &[&Keypair],
    lookup_tables: &[AddressLookupTableAccount],
) -> Result<Signature> {
    let blockhash = rpc.get_latest_blockhash().await?;
    let message = v0::Message::try_compile(payer, instructions, lookup_tables, blockhash)?;
    let transaction = VersionedTransaction::try_new(VersionedMessage::V0(message), signers)?;

    debug!(
        instruction_count = instructions.len(),
        table_count = lookup_tables.len(),
        "Submitting v0 transaction"
    );
    let signature = rpc.send_and_confirm_transaction(&transaction).await?;
    Ok(signature)
}

/// Solscan link for a confirmed transaction.
pub fn explorer_url(signature: &Signature, cluster: &str) -> String {
    format!("https://solscan.io/tx/{}?cluster={}", signature, cluster)
}
