//! Plain lamports transfer with simulation-measured compute budget.

use anyhow::{Context, Result};
use landing::{config::Config, data_size, estimator, logging, rpc, wallet::Wallet};
use solana_sdk::{compute_budget::ComputeBudgetInstruction, system_instruction};
use tracing::info;

// 0.0001 SOL; sending to a fresh account needs at least 0.001 SOL for rent.
const LAMPORTS_TO_SEND: u64 = 100_000;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::load()?;
    let wallet = Wallet::load(&config.wallet)?;
    let client = rpc::connect(&config.rpc);

    let recipient = config.token.recipient()?;
    info!(payer = %wallet.pubkey(), recipient = %recipient, lamports = LAMPORTS_TO_SEND, "Preparing lamports transfer");

    let transfer_ix = system_instruction::transfer(&wallet.pubkey(), &recipient, LAMPORTS_TO_SEND);

    // 36 bytes total; far too small to change the fee (only multiples of
    // 32KB matter), kept to show the full instruction set.
    let data_limit_ix = ComputeBudgetInstruction::set_loaded_accounts_data_size_limit(
        data_size::lamports_transfer_footprint(),
    );
    let cu_price_ix =
        ComputeBudgetInstruction::set_compute_unit_price(config.fees.cu_price_micro_lamports);
    let cu_limit_mock = ComputeBudgetInstruction::set_compute_unit_limit(50_000);

    let units = estimator::get_simulation_compute_units(
        &client,
        &[
            cu_price_ix.clone(),
            cu_limit_mock,
            transfer_ix.clone(),
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
            transfer_ix,
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
