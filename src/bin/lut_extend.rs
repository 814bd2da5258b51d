//! Extend the configured lookup table with the presale accounts
//! (token mint, state PDA, vault PDA).

use anyhow::Result;
use landing::{config::Config, logging, lut, presale, rpc, wallet::Wallet};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::load()?;
    let wallet = Wallet::load(&config.wallet)?;
    let client = rpc::connect(&config.rpc);

    let table = config.lookup_table.address()?;
    let program_id = config.presale.program_id()?;
    let mint = config.token.mint()?;

    let state = presale::state_address(&program_id);
    let vault = presale::vault_address(&program_id, &mint);
    info!(table = %table, mint = %mint, state = %state, vault = %vault, "Extending lookup table");

    let signature = lut::extend_lookup_table(
        &client,
        &table,
        wallet.keypair(),
        wallet.keypair(),
        vec![mint, state, vault],
    )
    .await?;
    info!(
        signature = %signature,
        url = %rpc::explorer_url(&signature, &config.rpc.cluster),
        "Extension confirmed"
    );

    Ok(())
}
