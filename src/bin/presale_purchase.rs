//! Buy tokens from the presale with a compute-optimized transaction.
//!
//! The account-data footprint is probed from the cluster rather than
//! summed from constants, since the presale program's size varies by
//! deployment.

use anyhow::{Context, Result};
use landing::{config::Config, data_size, estimator, logging, presale, rpc, wallet::Wallet};
use solana_sdk::{compute_budget, compute_budget::ComputeBudgetInstruction, system_program};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::load()?;
    let wallet = Wallet::load(&config.wallet)?;
    let client = rpc::connect(&config.rpc);

    let program_id = config.presale.program_id()?;
    let state = presale::fetch_state(&client, &program_id).await?;
    info!(
        token_mint = %state.token_mint,
        rate = state.tokens_to_sol_rate,
        "Presale state loaded (rate is tokens per SOL)"
    );

    let lamports = config.presale.purchase_lamports;
    let tokens = state.expected_tokens(lamports)?;
    info!(lamports = lamports, tokens = tokens, "Sending purchase");

    let purchase_ix =
        presale::purchase(&program_id, &wallet.pubkey(), &state.token_mint, lamports);

    let footprint = data_size::total_account_data_size(
        &client,
        &[system_program::id(), compute_budget::id(), program_id],
    )
    .await?
        + config.fees.probed_footprint_margin_bytes;
    info!(footprint = footprint, "Probed loaded-account footprint");

    let data_limit_ix =
        ComputeBudgetInstruction::set_loaded_accounts_data_size_limit(footprint);
    let cu_price_ix =
        ComputeBudgetInstruction::set_compute_unit_price(config.fees.cu_price_micro_lamports);
    let cu_limit_mock = ComputeBudgetInstruction::set_compute_unit_limit(10_000);

    let units = estimator::get_simulation_compute_units(
        &client,
        &[
            purchase_ix.clone(),
            cu_limit_mock,
            cu_price_ix.clone(),
            data_limit_ix.clone(),
        ],
        &wallet.pubkey(),
        &[],
        config.rpc.commitment(),
    )
    .await?
    .consumed()
    .context("Simulation did not report consumed compute units")?;
    info!(units = units, "Simulation measured compute budget");

    let signature = rpc::send_legacy(
        &client,
        &[
            estimator::limit_instruction(units),
            cu_price_ix,
            data_limit_ix,
            purchase_ix,
        ],
        &wallet.pubkey(),
        &[wallet.keypair()],
    )
    .await?;
    info!(
        signature = %signature,
        url = %rpc::explorer_url(&signature, &config.rpc.cluster),
        "Purchase confirmed"
    );

    Ok(())
}
