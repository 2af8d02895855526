//! Request a faucet airdrop for a fresh account and check its balance.
//!
//! Works on devnet/testnet/localhost only; beware of faucet cooldowns
//! between requests.

use solana_sdk::signature::Signer;
use solbox::config::ClientConfig;
use solbox::{account, keypair, SolboxClient};
use tracing::{error, info};

const AIRDROP_SOL: f64 = 3.0;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run().await {
        error!("Airdrop demo failed: {e}");
        std::process::exit(-1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = SolboxClient::connect(ClientConfig::load()?)?;

    let wallet = keypair::generate();
    let before = account::balance(client.rpc(), &wallet.pubkey())?;

    account::request_airdrop(client.rpc(), &wallet.pubkey(), AIRDROP_SOL).await?;

    let after = account::balance(client.rpc(), &wallet.pubkey())?;
    info!(
        "Balance grew by {} lamports after a {} SOL airdrop",
        after - before,
        AIRDROP_SOL
    );
    Ok(())
}
