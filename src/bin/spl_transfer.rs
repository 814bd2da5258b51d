//! Transfer tokens to the configured recipient, creating missing token
//! accounts along the way. No compute-budget tuning; see
//! spl-transfer-manual for the optimized variant.

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
    let recipient = config.token.recipient()?;
    info!(payer = %wallet.pubkey(), recipient = %recipient, "Preparing token transfer");

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

    info!(source = %source, destination = %destination, "Transferring between token accounts");

    let amount = token::base_units(config.token.transfer_amount_tokens, config.token.decimals);
    let instruction = token::transfer_checked_ix(
        &source,
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
        url = %rpc::explorer_url(&signature, &config.rpc.cluster),
        "Transfer confirmed"
    );

    Ok(())
}
