//! solbox - Solana client toolbox
//!
//! A thin helper layer over the Solana SDK for demonstration scripts:
//! keypair handling, deterministic address derivation, data-account
//! provisioning, instruction building and a sign/submit/confirm pipeline.
//! The binaries under `src/bin/` each compose one linear flow out of these
//! pieces.

pub mod account;
pub mod address;
pub mod config;
pub mod instruction;
pub mod keypair;
pub mod program;
pub mod rpc;
pub mod transaction;

use solana_client::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use thiserror::Error;

use crate::account::AccountError;
use crate::address::AddressError;
use crate::config::{ClientConfig, ConfigError};
use crate::instruction::{CalculatorOp, CalculatorOperation, InstructionError};
use crate::keypair::KeypairError;
use crate::program::ProgramHandle;
use crate::rpc::RpcError;
use crate::transaction::{SubmissionPipeline, SubmissionResult, TransactionError};

/// Public mainnet RPC endpoint
pub const MAINNET_URL: &str = "https://api.mainnet-beta.solana.com";
/// Public testnet RPC endpoint
pub const TESTNET_URL: &str = "https://api.testnet.solana.com";
/// Public devnet RPC endpoint
pub const DEVNET_URL: &str = "https://api.devnet.solana.com";
/// Local test validator RPC endpoint
pub const LOCALHOST_URL: &str = "http://localhost:8899";

/// Where the deploy tooling leaves program build artifacts and keypairs
pub const PROGRAM_DIR: &str = "dist/program";
/// Where the demo scripts keep generated account key files
pub const ACCOUNTS_DIR: &str = "accounts";

/// One connected client instance: resolved configuration plus an RPC
/// connection at the configured commitment level.
pub struct SolboxClient {
    client: RpcClient,
    config: ClientConfig,
}

impl SolboxClient {
    /// Connect using the given resolved configuration.
    pub fn connect(config: ClientConfig) -> Result<Self, SolboxError> {
        let commitment = config.commitment_config()?;
        let client = rpc::connect(&config.json_rpc_url, commitment);
        Ok(Self { client, config })
    }

    /// The underlying RPC connection.
    pub fn rpc(&self) -> &RpcClient {
        &self.client
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Load the configured default signer. It must already exist and hold a
    /// positive SOL balance.
    pub fn default_signer(&self) -> Result<Keypair, SolboxError> {
        let path = self.config.keypair_path()?;
        Ok(keypair::load_keypair(path)?)
    }

    /// Transfer SOL between wallets: build, assemble, submit, confirm.
    pub fn transfer_sol(
        &self,
        from: &Keypair,
        to: &Pubkey,
        amount_sol: f64,
    ) -> Result<SubmissionResult, SolboxError> {
        tracing::info!(
            "Transferring {} SOL from {} to {}",
            amount_sol,
            from.pubkey(),
            to
        );
        let ix = instruction::transfer_sol(&from.pubkey(), to, amount_sol)?;
        let unit = transaction::assemble(vec![ix], from.pubkey(), &[from.pubkey()])?;
        let result = SubmissionPipeline::new(&self.client).submit(&unit, &[from])?;
        Ok(result)
    }

    /// Resolve the data account for a program flow: provision a seeded
    /// account of `space` bytes when requested, otherwise target the payer's
    /// own account (for programs that keep no state).
    pub fn data_account(
        &self,
        payer: &Keypair,
        program: &ProgramHandle,
        space: Option<u64>,
    ) -> Result<Pubkey, SolboxError> {
        match space {
            Some(space) => Ok(account::ensure_account(
                &self.client,
                payer,
                &self.config.seed,
                &program.program_id,
                space,
            )?),
            None => Ok(payer.pubkey()),
        }
    }

    /// Ping a program with an empty payload.
    pub fn ping_program(
        &self,
        payer: &Keypair,
        program: &ProgramHandle,
        space: Option<u64>,
    ) -> Result<SubmissionResult, SolboxError> {
        tracing::info!("Pinging {} program ({})...", program.name, program.program_id);
        let data_account = self.data_account(payer, program, space)?;

        let ix = instruction::ping(&program.program_id, &data_account);
        let unit = transaction::assemble(vec![ix], payer.pubkey(), &[payer.pubkey()])?;
        Ok(SubmissionPipeline::new(&self.client).submit(&unit, &[payer])?)
    }

    /// Send one calculator operation to the program's data account,
    /// provisioning the account first if needed.
    pub fn operate_calculator(
        &self,
        payer: &Keypair,
        program: &ProgramHandle,
        op: CalculatorOp,
        operating_value: u64,
    ) -> Result<SubmissionResult, SolboxError> {
        let payload = CalculatorOperation::new(op, operating_value)?;
        tracing::info!(
            "Sending calculator instruction: we're going to {}",
            op.describe(payload.operating_value)
        );

        let data_account =
            self.data_account(payer, program, Some(account::Calculator::SIZE))?;
        let ix = instruction::calculator_operation(&program.program_id, &data_account, payload)?;
        let unit = transaction::assemble(vec![ix], payer.pubkey(), &[payer.pubkey()])?;
        Ok(SubmissionPipeline::new(&self.client).submit(&unit, &[payer])?)
    }

    /// Read back the calculator's current value from its data account.
    pub fn calculator_value(
        &self,
        owner: &Pubkey,
        program: &ProgramHandle,
    ) -> Result<u32, SolboxError> {
        let data_pubkey = address::derive_with_seed(owner, &self.config.seed, &program.program_id)?;
        let calculator = account::fetch_calculator(&self.client, &data_pubkey)?;
        Ok(calculator.value)
    }
}

/// Top-level error type for solbox operations
#[derive(Error, Debug)]
pub enum SolboxError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("keypair error: {0}")]
    Keypair(#[from] KeypairError),

    #[error("address derivation error: {0}")]
    Address(#[from] AddressError),

    #[error("instruction error: {0}")]
    Instruction(#[from] InstructionError),

    #[error("transaction error: {0}")]
    Transaction(#[from] TransactionError),

    #[error("account error: {0}")]
    Account(#[from] AccountError),

    #[error("rpc error: {0}")]
    Rpc(#[from] RpcError),
}
