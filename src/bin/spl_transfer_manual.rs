//! Token transfer with a hand-assembled transaction: compute-unit price,
//! simulation-measured compute limit and a loaded-account-data-size cap.

use anyhow::{Context, Result};
use landing::{
    config::Config, data_size, estimator, logging, rpc, token, wallet::Wallet,
};
use solana_sdk::compute_budget::ComputeBudgetInstruction;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::load()?;
    let wallet = Wallet::load(&config.wallet)?;
    let client = rpc::connect(&config.rpc);

    let mint = config.token.mint()?;
    let recipient = config.token.recipient()?;
    info!(payer = %wallet.pubkey(), recipient = %recipient, "Preparing optimized token transfer");

    let source = token::ensure_associated_token_account(
        &client,
        wallet.keypair(),
        &wallet.pubkey(),
        &mint,
    )
    .await?;
    let destination =
        token::ensure_associated_token_account(&client, wallet.keypair(), &recipient, &mint)
            .await?;

    let amount = token::base_units(config.token.transfer_amount_tokens, config.token.decimals);
    let transfer_ix = token::transfer_checked_ix(
        &source,
        &mint,
        &destination,
        &wallet.pubkey(),
        amount,
        config.token.decimals,
    )?;

    let data_limit_ix = ComputeBudgetInstruction::set_loaded_accounts_data_size_limit(
        data_size::spl_transfer_footprint(config.fees.static_footprint_margin_bytes),
    );
    let cu_price_ix =
        ComputeBudgetInstruction::set_compute_unit_price(config.fees.cu_price_micro_lamports);
    // Placeholder limit; the estimator swaps it for the ceiling during the
    // dry run and the measured value replaces it in the real transaction.
    let cu_limit_mock = ComputeBudgetInstruction::set_compute_unit_limit(10_000);

    let units = estimator::get_simulation_compute_units(
        &client,
        &[
            transfer_ix.clone(),
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
            transfer_ix,
            estimator::limit_instruction(units),
            cu_price_ix,
            data_limit_ix,
        ],
        &wallet.pubkey(),
        &[wallet.keypair()],
    )
    .await?;
    info!(
        signature = %signature,
        url = %rpc::explorer_url(&signature, &config.rpc.cluster),
        "Transfer confirmed"
    );

    Ok(())
}
