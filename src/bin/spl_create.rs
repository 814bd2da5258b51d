//! Create a new SPL token mint with the configured decimals.

use anyhow::Result;
use landing::{config::Config, logging, rpc, token, wallet::Wallet};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::load()?;
    let wallet = Wallet::load(&config.wallet)?;
    let client = rpc::connect(&config.rpc);

    info!(payer = %wallet.pubkey(), decimals = config.token.decimals, "Creating mint");
    let mint = token::create_mint(&client, wallet.keypair(), config.token.decimals).await?;
    info!(mint = %mint, "Set token.mint_address in workshop.toml to use it");

    Ok(())
}
