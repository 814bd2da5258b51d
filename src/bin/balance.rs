//! Print the wallet address and its SOL balance.

use anyhow::Result;
use landing::{config::Config, logging, rpc, wallet::Wallet};
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::load()?;
    let wallet = Wallet::load(&config.wallet)?;
    let client = rpc::connect(&config.rpc);

    let lamports = client.get_balance(&wallet.pubkey()).await?;
    info!(
        address = %wallet.pubkey(),
        sol = lamports as f64 / LAMPORTS_PER_SOL as f64,
        lamports = lamports,
        "Wallet balance"
    );

    Ok(())
}
