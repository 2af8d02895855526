//! Brute-force a keypair whose address starts with a chosen prefix.
//!
//! Capped: prefixes longer than a couple of characters can take a very long
//! time, so the search gives up after a fixed number of candidates instead
//! of spinning forever.

use std::path::Path;

use solana_sdk::signature::Signer;
use solbox::keypair::{self, VanitySearch};
use solbox::ACCOUNTS_DIR;
use tracing::{error, info};

const REQUIRED_PREFIX: &str = "69";
const REQUIRED_SUFFIX: &str = "";
const MAX_ATTEMPTS: u64 = 5_000_000;

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run() {
        error!("Vanity address search failed: {e}");
        std::process::exit(-1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!(
        "Searching for an address matching '{}…{}' (up to {} attempts)...",
        REQUIRED_PREFIX, REQUIRED_SUFFIX, MAX_ATTEMPTS
    );

    let mut search = VanitySearch::new(REQUIRED_PREFIX, REQUIRED_SUFFIX).with_cap(MAX_ATTEMPTS);
    let keypair = search
        .run()
        .ok_or("no match within the attempt cap; raise MAX_ATTEMPTS or shorten the prefix")?;

    info!("Vanity address created after {} attempts!", search.attempts());
    info!("Public key: {}", keypair.pubkey());

    std::fs::create_dir_all(ACCOUNTS_DIR)?;
    keypair::save_keypair(&keypair, Path::new(ACCOUNTS_DIR).join("vanity_account.json"))?;
    Ok(())
}
