//! Send one calculator operation to the deployed calculator program.
//!
//! Watch the program logs while this runs:
//!   solana logs | grep "<program id> invoke" -A 20

use solbox::config::ClientConfig;
use solbox::instruction::CalculatorOp;
use solbox::{program, SolboxClient, PROGRAM_DIR};
use tracing::{error, info};

const PROGRAM_NAME: &str = "p4_calculator";
const OPERATION: CalculatorOp = CalculatorOp::Add;
const OPERAND: u64 = 6;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    if let Err(e) = run().await {
        error!("Calculator operation failed: {e}");
        std::process::exit(-1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let client = SolboxClient::connect(ClientConfig::load()?)?;
    let handle = program::load_program(PROGRAM_DIR, PROGRAM_NAME)?;
    let payer = client.default_signer()?;

    let result = client.operate_calculator(&payer, &handle, OPERATION, OPERAND)?;
    match result.signature {
        Some(signature) => info!("Operation confirmed: {signature}"),
        None => return Err(format!("operation did not confirm: {:?}", result.status).into()),
    }
    Ok(())
}
