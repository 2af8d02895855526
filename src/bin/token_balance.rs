//! Look up a wallet's associated token account balance for a given mint.

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use solbox::config::ClientConfig;
use solbox::{account, SolboxClient};
use tracing::{error, info};

const WALLET: &str = "H5BANcerHrJCwTim8ywJ3Nhpfo9PWvGtCwE45bXsgD72";
// USDC devnet mint
const MINT: &str = "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run().await {
        error!("Token balance lookup failed: {e}");
        std::process::exit(-1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = SolboxClient::connect(ClientConfig::load()?)?;
    let wallet = Pubkey::from_str(WALLET)?;
    let mint = Pubkey::from_str(MINT)?;

    let amount = account::token_balance(client.rpc(), &wallet, &mint)?;
    info!(
        "Wallet {} holds {} (raw {}) of mint {}",
        wallet, amount.ui_amount_string, amount.amount, mint
    );
    Ok(())
}
