//! Restore the first ten accounts of a BIP-39 mnemonic phrase.
//!
//! Reads the phrase from the MNEMONIC environment variable (a .env file
//! works too). Only public keys are logged; set EXPORT_SECRETS=1 to also
//! print each account's base58 secret key to stdout.

use solana_sdk::signature::Signer;
use solbox::keypair;
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();
    if let Err(e) = run() {
        error!("Mnemonic restore failed: {e}");
        std::process::exit(-1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let phrase = std::env::var("MNEMONIC")
        .map_err(|_| "set MNEMONIC to a BIP-39 phrase (12 or 24 words)")?;
    let export_secrets = std::env::var("EXPORT_SECRETS").is_ok();

    let keypairs = keypair::from_mnemonic(&phrase, 10)?;
    info!("Restored {} accounts along m/44'/501'/i'/0'", keypairs.len());

    for (account, restored) in keypairs.iter().enumerate() {
        info!("Account #{account}: {}", restored.pubkey());
        if export_secrets {
            // Secrets go to stdout only, and only on explicit request.
            println!("{}", keypair::to_base58(restored));
        }
    }
    Ok(())
}
