//! Loaded-account-data-size budgeting
//!
//! Base fees also scale with how much account data a transaction loads, in
//! 32KB steps. The manual transfer scripts cap it with a
//! SetLoadedAccountsDataSizeLimit instruction; the footprint is either
//! summed from known account sizes or probed from the cluster.

use anyhow::Result;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

// Observed devnet sizes of the accounts the transfer scripts load.
pub const SYSTEM_PROGRAM_SIZE: u32 = 14;
pub const COMPUTE_BUDGET_PROGRAM_SIZE: u32 = 22;
pub const SPL_TOKEN_PROGRAM_SIZE: u32 = 134_080;
pub const SPL_MINT_ACCOUNT_SIZE: u32 = 82;
pub const SPL_TOKEN_ACCOUNT_SIZE: u32 = 165;

/// Data footprint of a checked SPL transfer: both programs, the mint and
/// two token accounts, plus a configured safety margin.
pub fn spl_transfer_footprint(margin_bytes: u32) -> u32 {
    SYSTEM_PROGRAM_SIZE
        + COMPUTE_BUDGET_PROGRAM_SIZE
        + SPL_TOKEN_PROGRAM_SIZE
        + SPL_MINT_ACCOUNT_SIZE
        + 2 * SPL_TOKEN_ACCOUNT_SIZE
        + margin_bytes
}

/// Data footprint of a plain lamports transfer (system + compute budget).
pub fn lamports_transfer_footprint() -> u32 {
    SYSTEM_PROGRAM_SIZE + COMPUTE_BUDGET_PROGRAM_SIZE
}

/// Sum the current data size of the given accounts in one RPC round-trip.
///
/// Accounts that do not exist count as zero, matching how the cluster
/// loads them.
pub async fn total_account_data_size(rpc: &RpcClient, accounts: &[Pubkey]) -> Result<u32> {
    let infos = rpc.get_multiple_accounts(accounts).await?;

    let mut total: u32 = 0;
    for (address, info) in accounts.iter().zip(infos) {
        match info {
            Some(account) => {
                debug!(account = %address, size = account.data.len(), "Account data size");
                total += account.data.len() as u32;
            }
            None => {
                debug!(account = %address, "Account does not exist, counting zero");
            }
        }
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spl_transfer_footprint_sum() {
        // 14 + 22 + 134080 + 82 + 2*165 + 11
        assert_eq!(spl_transfer_footprint(11), 134_539);
        assert_eq!(spl_transfer_footprint(0), 134_528);
    }

    #[test]
    fn test_lamports_transfer_footprint_sum() {
        assert_eq!(lamports_transfer_footprint(), 36);
    }
}
