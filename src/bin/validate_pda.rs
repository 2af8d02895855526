//! Check whether addresses are program-derived (off-curve), and derive one.

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use solbox::address;
use tracing::{error, info};

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run() {
        error!("PDA validation failed: {e}");
        std::process::exit(-1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A wallet address and a known data-account address, for contrast.
    let wallet = Pubkey::from_str("H5BANcerHrJCwTim8ywJ3Nhpfo9PWvGtCwE45bXsgD72")?;
    let data_account = Pubkey::from_str("5ZrrH46dGVRw25P2oHBaMKFCR2D1LjVTwPuc3BFFoqLj")?;

    for address in [&wallet, &data_account] {
        if address::is_off_curve(address) {
            info!("{address} is a program derived address (off-curve)");
        } else {
            info!("{address} is not a program derived address");
        }
    }

    // Derive a fresh PDA the way a program would.
    let program_id = Pubkey::from_str("356bh1oaoAZLvuJkS4i9ma9QdxEkBiCcAaef1d7p75XR")?;
    let (pda, bump) =
        address::find_program_address(&[b"vault-seed", wallet.as_ref()], &program_id)?;
    info!("PDA: {pda}");
    info!("Bump seed: {bump}");
    Ok(())
}
