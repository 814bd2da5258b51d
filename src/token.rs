//! SPL token operations used by the workshop scripts

use anyhow::{Context, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    program_pack::Pack,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    system_instruction,
};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account,
};
use spl_token::state::Mint;
use tracing::{debug, info};

use crate::rpc::send_legacy;

/// Create a new token mint with the payer as mint and freeze authority.
///
/// Composes the create-account and initialize-mint instructions by hand;
/// the fresh mint keypair co-signs and is discarded afterwards.
pub async fn create_mint(rpc: &RpcClient, payer: &Keypair, decimals: u8) -> Result<Pubkey> {
    let mint = Keypair::new();
    let rent = rpc
        .get_minimum_balance_for_rent_exemption(Mint::LEN)
        .await?;

    let instructions = [
        system_instruction::create_account(
            &payer.pubkey(),
            &mint.pubkey(),
            rent,
            Mint::LEN as u64,
            &spl_token::id(),
        ),
        spl_token::instruction::initialize_mint(
            &spl_token::id(),
            &mint.pubkey(),
            &payer.pubkey(),
            Some(&payer.pubkey()),
            decimals,
        )?,
    ];

    let signature = send_legacy(rpc, &instructions, &payer.pubkey(), &[payer, &mint]).await?;
    info!(mint = %mint.pubkey(), signature = %signature, "Mint created");
    Ok(mint.pubkey())
}

/// Get or create the associated token account for `owner` and `mint`.
///
/// Idempotent: returns the derived address either way; only the missing
/// case costs a transaction (paid by `payer`).
pub async fn ensure_associated_token_account(
    rpc: &RpcClient,
    payer: &Keypair,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Result<Pubkey> {
    let address = get_associated_token_address(owner, mint);

    let existing = rpc
        .get_account_with_commitment(&address, rpc.commitment())
        .await?
        .value;
    if existing.is_some() {
        debug!(account = %address, owner = %owner, "Token account exists");
        return Ok(address);
    }

    info!(account = %address, owner = %owner, "Token account does not exist, creating it");
    let instruction =
        create_associated_token_account(&payer.pubkey(), owner, mint, &spl_token::id());
    let signature = send_legacy(rpc, &[instruction], &payer.pubkey(), &[payer]).await?;
    info!(account = %address, signature = %signature, "Token account created");

    Ok(address)
}

/// Checked mint-to instruction with the authority as sole signer.
pub fn mint_to_checked_ix(
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Result<Instruction> {
    Ok(spl_token::instruction::mint_to_checked(
        &spl_token::id(),
        mint,
        destination,
        authority,
        &[],
        amount,
        decimals,
    )?)
}

/// Checked transfer instruction between two token accounts.
pub fn transfer_checked_ix(
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    owner: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Result<Instruction> {
    Ok(spl_token::instruction::transfer_checked(
        &spl_token::id(),
        source,
        mint,
        destination,
        owner,
        &[],
        amount,
        decimals,
    )?)
}

/// Convert a fractional token amount to base units.
pub fn base_units(amount_tokens: f64, decimals: u8) -> u64 {
    (amount_tokens * 10f64.powi(decimals as i32)).round() as u64
}

/// Convert a whole-token amount to base units, refusing to overflow.
pub fn whole_token_base_units(amount_tokens: u64, decimals: u8) -> Result<u64> {
    amount_tokens
        .checked_mul(10u64.pow(decimals as u32))
        .with_context(|| format!("{} tokens at {} decimals overflows u64", amount_tokens, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_units_scaling() {
        assert_eq!(base_units(0.0001, 9), 100_000);
        assert_eq!(base_units(1.0, 9), 1_000_000_000);
        assert_eq!(base_units(0.1, 6), 100_000);
    }

    #[test]
    fn test_whole_token_base_units() {
        assert_eq!(
            whole_token_base_units(100_000_000, 9).unwrap(),
            100_000_000_000_000_000
        );
        assert!(whole_token_base_units(u64::MAX, 9).is_err());
    }

    #[test]
    fn test_transfer_checked_ix_shape() {
        let source = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let destination = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let ix = transfer_checked_ix(&source, &mint, &destination, &owner, 100_000, 9).unwrap();
        assert_eq!(ix.program_id, spl_token::id());
        // source, mint, destination, owner
        assert_eq!(ix.accounts.len(), 4);
        assert!(ix.accounts[3].is_signer);
    }
}
