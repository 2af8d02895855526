//! One atomic transaction carrying several instructions from several signers:
//! transfer A -> B, transfer B -> C, then a calculator call, in that order.

use std::path::Path;

use solana_sdk::signature::Signer;
use solbox::config::ClientConfig;
use solbox::instruction::{CalculatorOp, CalculatorOperation};
use solbox::transaction::SubmissionPipeline;
use solbox::{account, instruction, keypair, program, transaction};
use solbox::{SolboxClient, ACCOUNTS_DIR, PROGRAM_DIR};
use tracing::{error, info};

const PROGRAM_NAME: &str = "p4_calculator";
const SECOND_ACCOUNT: &str = "apple.json";
const THIRD_ACCOUNT: &str = "bob.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run().await {
        error!("Multi-instruction transaction failed: {e}");
        std::process::exit(-1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::load()?;
    let seed = config.seed.clone();
    let client = SolboxClient::connect(config)?;
    let handle = program::load_program(PROGRAM_DIR, PROGRAM_NAME)?;

    let first = client.default_signer()?;
    let second = keypair::load_keypair(Path::new(ACCOUNTS_DIR).join(SECOND_ACCOUNT))?;
    let third = keypair::load_keypair(Path::new(ACCOUNTS_DIR).join(THIRD_ACCOUNT))?;

    let data_account = account::ensure_account(
        client.rpc(),
        &first,
        &seed,
        &handle.program_id,
        account::Calculator::SIZE,
    )?;

    // Order matters on-chain: the second transfer spends what the first sent.
    let instructions = vec![
        instruction::transfer_sol(&first.pubkey(), &second.pubkey(), 0.01)?,
        instruction::transfer_sol(&second.pubkey(), &third.pubkey(), 0.005)?,
        instruction::calculator_operation(
            &handle.program_id,
            &data_account,
            CalculatorOperation::new(CalculatorOp::Add, 8)?,
        )?,
    ];

    let unit = transaction::assemble(
        instructions,
        first.pubkey(),
        &[first.pubkey(), second.pubkey()],
    )?;

    let pipeline = SubmissionPipeline::new(client.rpc());
    let fee = pipeline.estimate_fee(&unit)?;
    info!("Estimated fee for the bundle: {fee} lamports");

    let result = pipeline.submit(&unit, &[&first, &second])?;
    match result.signature {
        Some(signature) => info!("Bundle confirmed: {signature}"),
        None => return Err(format!("bundle did not confirm: {:?}", result.status).into()),
    }
    Ok(())
}
