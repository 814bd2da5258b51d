//! Estimator checks against a live cluster.
//!
//! These hit devnet and need a funded keypair, so they are ignored by
//! default; run with `cargo test -- --ignored`.

use landing::{
    config::Config,
    estimator::{get_simulation_compute_units, SimulatedUnits, MAX_COMPUTE_UNITS},
    rpc,
    wallet::Wallet,
};
use solana_sdk::system_instruction;

#[tokio::test]
#[ignore = "requires network access and a funded devnet keypair"]
async fn simulated_lamports_transfer_reports_units() {
    let config = Config::load().expect("config");
    let wallet = Wallet::load(&config.wallet).expect("wallet");
    let client = rpc::connect(&config.rpc);

    let recipient = config.token.recipient().expect("recipient");
    let transfer_ix = system_instruction::transfer(&wallet.pubkey(), &recipient, 100_000);

    let units = get_simulation_compute_units(
        &client,
        &[transfer_ix],
        &wallet.pubkey(),
        &[],
        config.rpc.commitment(),
    )
    .await
    .expect("simulation should succeed for a plain transfer");

    match units {
        SimulatedUnits::Consumed(units) => {
            assert!(units > 0, "a transfer always costs something");
            assert!(units < u64::from(MAX_COMPUTE_UNITS));
        }
        SimulatedUnits::Unknown => panic!("devnet reports consumed units for transfers"),
    }
}

#[tokio::test]
#[ignore = "requires network access and a funded devnet keypair"]
async fn simulating_for_unfunded_payer_surfaces_logs() {
    let config = Config::load().expect("config");
    let client = rpc::connect(&config.rpc);

    // Fresh keypair, zero balance: the dry run must fail and the error
    // must carry the diagnostic text, not a generic failure.
    let payer = solana_sdk::signature::Keypair::new();
    let payer_pubkey = solana_sdk::signer::Signer::pubkey(&payer);
    let recipient = config.token.recipient().expect("recipient");
    let transfer_ix = system_instruction::transfer(&payer_pubkey, &recipient, 100_000);

    let err = get_simulation_compute_units(
        &client,
        &[transfer_ix],
        &payer_pubkey,
        &[],
        config.rpc.commitment(),
    )
    .await
    .expect_err("unfunded payer cannot pass simulation");

    assert!(err.to_string().contains("Transaction simulation failed"));
}
