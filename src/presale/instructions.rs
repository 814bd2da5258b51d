//! Presale instruction builders
//!
//! Account lists mirror the program's interface description exactly;
//! order matters.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};
use spl_associated_token_account::get_associated_token_address;

use super::{instruction_discriminator, state_address, vault_address};

/// Build the `initialize(rate, limit_per_purchase)` instruction.
///
/// Creates the state and vault PDAs; `authority` pays and signs.
pub fn initialize(
    program_id: &Pubkey,
    authority: &Pubkey,
    token_mint: &Pubkey,
    tokens_to_sol_rate: u64,
    limit_per_purchase: u64,
) -> Instruction {
    let state = state_address(program_id);
    let vault = vault_address(program_id, token_mint);

    let mut data = Vec::with_capacity(8 + 8 + 8);
    data.extend_from_slice(&instruction_discriminator("initialize"));
    data.extend_from_slice(&tokens_to_sol_rate.to_le_bytes());
    data.extend_from_slice(&limit_per_purchase.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(state, false),
            AccountMeta::new_readonly(*token_mint, false),
            AccountMeta::new(vault, false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data,
    }
}

/// Build the `purchase(amount)` instruction for `amount_lamports` of SOL.
///
/// The buyer's associated token account is derived here; the program
/// creates it on first purchase.
pub fn purchase(
    program_id: &Pubkey,
    buyer: &Pubkey,
    token_mint: &Pubkey,
    amount_lamports: u64,
) -> Instruction {
    let state = state_address(program_id);
    let vault = vault_address(program_id, token_mint);
    let buyer_token_account = get_associated_token_address(buyer, token_mint);

    let mut data = Vec::with_capacity(8 + 8);
    data.extend_from_slice(&instruction_discriminator("purchase"));
    data.extend_from_slice(&amount_lamports.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(state, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(*token_mint, false),
            AccountMeta::new(*buyer, true),
            AccountMeta::new(buyer_token_account, false),
            AccountMeta::new_readonly(spl_token::id(), false),
            AccountMeta::new_readonly(spl_associated_token_account::id(), false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_layout() {
        let program_id = Pubkey::new_unique();
        let authority = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ix = initialize(&program_id, &authority, &mint, 10_000, 10_000_000_000);

        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.data.len(), 24);
        assert_eq!(&ix.data[..8], &instruction_discriminator("initialize"));
        assert_eq!(&ix.data[8..16], &10_000u64.to_le_bytes());
        assert_eq!(&ix.data[16..24], &10_000_000_000u64.to_le_bytes());

        // state, mint, vault, authority, token program, system program, rent
        assert_eq!(ix.accounts.len(), 7);
        assert_eq!(ix.accounts[0].pubkey, state_address(&program_id));
        assert!(ix.accounts[0].is_writable);
        assert_eq!(ix.accounts[2].pubkey, vault_address(&program_id, &mint));
        assert!(ix.accounts[2].is_writable);
        assert_eq!(ix.accounts[3].pubkey, authority);
        assert!(ix.accounts[3].is_signer);
        assert_eq!(ix.accounts[4].pubkey, spl_token::id());
        assert_eq!(ix.accounts[5].pubkey, system_program::id());
        assert_eq!(ix.accounts[6].pubkey, sysvar::rent::id());
    }

    #[test]
    fn test_purchase_layout() {
        let program_id = Pubkey::new_unique();
        let buyer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ix = purchase(&program_id, &buyer, &mint, 1_000_000);

        assert_eq!(ix.data.len(), 16);
        assert_eq!(&ix.data[..8], &instruction_discriminator("purchase"));
        assert_eq!(&ix.data[8..16], &1_000_000u64.to_le_bytes());

        assert_eq!(ix.accounts.len(), 9);
        assert!(ix.accounts[0].is_writable); // state collects the SOL
        assert!(ix.accounts[1].is_writable); // vault pays out tokens
        assert_eq!(ix.accounts[3].pubkey, buyer);
        assert!(ix.accounts[3].is_signer);
        assert_eq!(
            ix.accounts[4].pubkey,
            get_associated_token_address(&buyer, &mint)
        );
        assert!(ix.accounts[4].is_writable);
        assert_eq!(ix.accounts[6].pubkey, spl_associated_token_account::id());
    }

    #[test]
    fn test_purchase_only_buyer_signs() {
        let ix = purchase(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            1,
        );
        assert_eq!(ix.accounts.iter().filter(|meta| meta.is_signer).count(), 1);
    }
}
