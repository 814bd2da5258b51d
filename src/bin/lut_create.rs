//! Create an address lookup table owned by the wallet.

use anyhow::Result;
use landing::{config::Config, logging, lut, rpc, wallet::Wallet};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::load()?;
    let wallet = Wallet::load(&config.wallet)?;
    let client = rpc::connect(&config.rpc);

    let table = lut::create_lookup_table(&client, wallet.keypair(), wallet.keypair()).await?;
    info!(table = %table, "Set lookup_table.address in workshop.toml to use it");

    Ok(())
}
