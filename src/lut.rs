//! Address lookup table lifecycle
//!
//! Create, extend and fetch lookup tables so v0 transactions can reference
//! accounts by index instead of carrying full addresses.

use anyhow::{Context, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    address_lookup_table::{self, state::AddressLookupTable, AddressLookupTableAccount},
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
};
use tracing::info;

use crate::rpc::send_legacy;

/// Create a new lookup table derived from a recent slot.
///
/// Returns the table address once the creation transaction confirms. The
/// table needs roughly a slot to "warm up" before v0 transactions can
/// resolve through it.
pub async fn create_lookup_table(
    rpc: &RpcClient,
    authority: &Keypair,
    payer: &Keypair,
) -> Result<Pubkey> {
    let slot = rpc.get_slot().await?;

    // Derive from the previous slot; the current one may not be finalized
    // from the node's point of view yet.
    let (instruction, table_address) = address_lookup_table::instruction::create_lookup_table(
        authority.pubkey(),
        payer.pubkey(),
        slot.saturating_sub(1),
    );

    info!(table = %table_address, slot = slot, "Creating lookup table");
    let signature = send_legacy(rpc, &[instruction], &payer.pubkey(), &[payer]).await?;
    info!(table = %table_address, signature = %signature, "Lookup table created");

    Ok(table_address)
}

/// Append addresses to an existing lookup table.
pub async fn extend_lookup_table(
    rpc: &RpcClient,
    table: &Pubkey,
    authority: &Keypair,
    payer: &Keypair,
    addresses: Vec<Pubkey>,
) -> Result<Signature> {
    let instruction = address_lookup_table::instruction::extend_lookup_table(
        *table,
        authority.pubkey(),
        Some(payer.pubkey()),
        addresses,
    );

    let signature = send_legacy(rpc, &[instruction], &payer.pubkey(), &[payer]).await?;
    info!(table = %table, signature = %signature, "Lookup table extended");
    Ok(signature)
}

/// Fetch and deserialize a lookup table for use in message compilation.
pub async fn fetch_lookup_table(
    rpc: &RpcClient,
    address: &Pubkey,
) -> Result<AddressLookupTableAccount> {
    let account = rpc
        .get_account_with_commitment(address, rpc.commitment())
        .await?
        .value
        .with_context(|| format!("Lookup table account not found: {}", address))?;

    let table = AddressLookupTable::deserialize(&account.data)
        .with_context(|| format!("Failed to deserialize lookup table: {}", address))?;

    Ok(AddressLookupTableAccount {
        key: *address,
        addresses: table.addresses.to_vec(),
    })
}
