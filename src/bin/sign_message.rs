//! Sign a fixed message and verify the detached signature.

use solana_sdk::signature::{Keypair, Signer};
use solbox::keypair;
use tracing::{error, info};

// Secret key of the throwaway demo account (accounts/new_account.json).
const DEMO_SECRET: [u8; 64] = [
    69, 146, 180, 188, 120, 51, 55, 155, 43, 135, 240, 184, 208, 225, 137, 71, 78, 216, 181, 183,
    43, 118, 142, 103, 231, 123, 133, 193, 66, 132, 227, 95, 238, 204, 205, 198, 178, 0, 59, 75,
    91, 29, 72, 31, 175, 153, 200, 148, 152, 1, 139, 184, 4, 118, 63, 69, 248, 106, 109, 4, 91, 6,
    68, 133,
];

fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run() {
        error!("Sign/verify demo failed: {e}");
        std::process::exit(-1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let message = "Hello Solana";
    let signer = Keypair::try_from(&DEMO_SECRET[..])?;
    info!("Public key: {}", signer.pubkey());
    info!("Message to be signed: {message}");

    let signature = keypair::sign_message(&signer, message);
    info!("Signature: {}", hex::encode(signature.as_ref()));

    // Verify against the signer's identity, then against a stranger's.
    keypair::verify_signature(message, &signature, &signer.pubkey());
    let stranger = keypair::generate();
    keypair::verify_signature(message, &signature, &stranger.pubkey());
    Ok(())
}
