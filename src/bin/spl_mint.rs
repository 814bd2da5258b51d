//! Mint the configured token supply to the payer's associated token account.

use anyhow::Result;
use landing::{config::Config, logging, rpc, token, wallet::Wallet};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::load()?;
    let wallet = Wallet::load(&config.wallet)?;
    let client = rpc::connect(&config.rpc);

    let mint = config.token.mint()?;
    info!(payer = %wallet.pubkey(), mint = %mint, "Minting to payer's token account");

    let destination = token::ensure_associated_token_account(
        &client,
        wallet.keypair(),
        &wallet.pubkey(),
        &mint,
    )
    .await?;

    let amount =
        token::whole_token_base_units(config.token.mint_amount_tokens, config.token.decimals)?;
    let instruction = token::mint_to_checked_ix(
        &mint,
        &destination,
        &wallet.pubkey(),
        amount,
        config.token.decimals,
    )?;

    let signature =
        rpc::send_legacy(&client, &[instruction], &wallet.pubkey(), &[wallet.keypair()]).await?;
    info!(
        signature = %signature,
        tokens = config.token.mint_amount_tokens,
        url = %rpc::explorer_url(&signature, &config.rpc.cluster),
        "Mint confirmed"
    );

    Ok(())
}
