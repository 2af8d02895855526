//! Ping a deployed program with an empty instruction payload.
//!
//! Deploy the program first; its deploy keypair is expected under
//! dist/program/.

use solbox::config::ClientConfig;
use solbox::{program, SolboxClient, PROGRAM_DIR};
use tracing::{error, info};

const PROGRAM_NAME: &str = "hello_solana";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run().await {
        error!("Ping failed: {e}");
        std::process::exit(-1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = SolboxClient::connect(ClientConfig::load()?)?;
    let handle = program::load_program(PROGRAM_DIR, PROGRAM_NAME)?;
    let payer = client.default_signer()?;

    // hello_solana keeps no state, so the ping targets the payer itself.
    let result = client.ping_program(&payer, &handle, None)?;
    if result.is_confirmed() {
        info!("Ping successful");
    } else {
        return Err(format!("ping did not confirm: {:?}", result.status).into());
    }
    Ok(())
}
