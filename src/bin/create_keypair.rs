//! Generate a fresh local account and save its key file.

use std::path::Path;

use solana_sdk::signature::Signer;
use solbox::{keypair, ACCOUNTS_DIR};
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run() {
        error!("Failed to create keypair: {e}");
        std::process::exit(-1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let new_keypair = keypair::generate();
    info!("Public key: {}", new_keypair.pubkey());

    std::fs::create_dir_all(ACCOUNTS_DIR)?;
    let path = Path::new(ACCOUNTS_DIR).join("new_account.json");
    keypair::save_keypair(&new_keypair, &path)?;

    let reloaded = keypair::load_keypair(&path)?;
    keypair::verify_keypair(&reloaded, &new_keypair.pubkey());
    Ok(())
}
