//! List the latest transactions that touched the calculator program.

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use solbox::config::ClientConfig;
use solbox::{rpc, SolboxClient};
use tracing::{error, info};

const PROGRAM_ID: &str = "356bh1oaoAZLvuJkS4i9ma9QdxEkBiCcAaef1d7p75XR";
const LIMIT: usize = 10;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run().await {
        error!("Transaction lookup failed: {e}");
        std::process::exit(-1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = SolboxClient::connect(ClientConfig::load()?)?;
    let program_id = Pubkey::from_str(PROGRAM_ID)?;

    let signatures = rpc::recent_transactions(client.rpc(), &program_id, LIMIT)?;
    info!("Fetched {} transaction(s) for {}", signatures.len(), program_id);
    Ok(())
}
