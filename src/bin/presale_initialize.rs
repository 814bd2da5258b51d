//! Initialize the mock presale: create the state and vault PDAs with the
//! configured rate and per-purchase limit, then read the state back.

use anyhow::Result;
use landing::{config::Config, logging, presale, rpc, wallet::Wallet};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let config = Config::load()?;
    let wallet = Wallet::load(&config.wallet)?;
    let client = rpc::connect(&config.rpc);

    let program_id = config.presale.program_id()?;
    let mint = config.token.mint()?;

    info!(
        state = %presale::state_address(&program_id),
        vault = %presale::vault_address(&program_id, &mint),
        rate = config.presale.tokens_to_sol_rate,
        limit = config.presale.limit_per_purchase,
        "Initializing presale"
    );

    let instruction = presale::initialize(
        &program_id,
        &wallet.pubkey(),
        &mint,
        config.presale.tokens_to_sol_rate,
        config.presale.limit_per_purchase,
    );
    let signature =
        rpc::send_legacy(&client, &[instruction], &wallet.pubkey(), &[wallet.keypair()]).await?;
    info!(
        signature = %signature,
        url = %rpc::explorer_url(&signature, &config.rpc.cluster),
        "Presale initialized"
    );

    // Read the state back to verify what landed on chain
    let state = presale::fetch_state(&client, &program_id).await?;
    info!(
        authority = %state.authority,
        token_mint = %state.token_mint,
        token_vault = %state.token_vault,
        rate = state.tokens_to_sol_rate,
        limit = state.limit_per_purchase,
        "On-chain presale state"
    );

    Ok(())
}
