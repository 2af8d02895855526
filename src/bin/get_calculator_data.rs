//! Read the calculator's current value from its seeded data account.

use solana_sdk::signature::Signer;
use solbox::config::ClientConfig;
use solbox::{program, SolboxClient, PROGRAM_DIR};
use tracing::{error, info};

const PROGRAM_NAME: &str = "p4_calculator";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run().await {
        error!("Failed to read calculator data: {e}");
        std::process::exit(-1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = SolboxClient::connect(ClientConfig::load()?)?;
    let handle = program::load_program(PROGRAM_DIR, PROGRAM_NAME)?;
    let owner = client.default_signer()?;

    let value = client.calculator_value(&owner.pubkey(), &handle)?;
    info!("Retrieved calculator value: {value}");
    Ok(())
}
