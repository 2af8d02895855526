//! Transfer SOL from the default signer to a fixed recipient.

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use solbox::config::ClientConfig;
use solbox::SolboxClient;
use tracing::{error, info};

const RECIPIENT: &str = "69dG12zt4y4uaRW1oBAupaPu2efX7SptzPemK35iEeyi";
const AMOUNT_SOL: f64 = 0.1;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run().await {
        error!("Transfer failed: {e}");
        std::process::exit(-1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = SolboxClient::connect(ClientConfig::load()?)?;
    let sender = client.default_signer()?;
    let recipient = Pubkey::from_str(RECIPIENT)?;

    let result = client.transfer_sol(&sender, &recipient, AMOUNT_SOL)?;
    match result.signature {
        Some(signature) => info!("Transaction signature: {signature}"),
        None => return Err(format!("transfer did not confirm: {:?}", result.status).into()),
    }
    Ok(())
}
