//! Transaction assembly and submission
//!
//! An assembled unit is an ordered instruction list plus the signer set it
//! needs. Assembly validates signer coverage up front so a missing signer
//! fails locally instead of as an opaque network rejection. Submission signs,
//! sends and waits for confirmation at the client's commitment level, and is
//! never retried automatically: resubmitting a state-mutating instruction is
//! not always safe, so the caller decides.

use solana_client::rpc_client::RpcClient;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::signer::SignerError;
use solana_sdk::transaction::Transaction;
use thiserror::Error;

/// An atomically-applied, ordered list of instructions with its required
/// signer set.
#[derive(Debug, Clone)]
pub struct TransactionUnit {
    pub instructions: Vec<Instruction>,
    pub payer: Pubkey,
    pub required_signers: Vec<Pubkey>,
}

/// Compose instructions into a single submission unit.
///
/// Instruction order is preserved exactly as given; it affects on-chain
/// execution semantics. Nothing is deduplicated. Every account flagged as a
/// signer by any instruction (and the fee payer) must appear in `signers`.
pub fn assemble(
    instructions: Vec<Instruction>,
    payer: Pubkey,
    signers: &[Pubkey],
) -> Result<TransactionUnit, TransactionError> {
    let mut required = vec![payer];
    for instruction in &instructions {
        for meta in &instruction.accounts {
            if meta.is_signer && !required.contains(&meta.pubkey) {
                required.push(meta.pubkey);
            }
        }
    }

    for needed in &required {
        if *needed != payer && !signers.contains(needed) {
            return Err(TransactionError::MissingSigner(*needed));
        }
    }
    if !signers.contains(&payer) {
        return Err(TransactionError::MissingSigner(payer));
    }

    tracing::debug!(
        "Assembled unit: {} instruction(s), {} required signer(s), payer {}",
        instructions.len(),
        required.len(),
        payer
    );
    Ok(TransactionUnit {
        instructions,
        payer,
        required_signers: required,
    })
}

/// Outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Confirmed,
    Failed(String),
}

/// Submission result: the signature when the unit landed, and its status.
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    pub signature: Option<Signature>,
    pub status: SubmissionStatus,
}

impl SubmissionResult {
    pub fn is_confirmed(&self) -> bool {
        self.status == SubmissionStatus::Confirmed
    }
}

/// Signs, sends and confirms assembled units over one RPC connection.
pub struct SubmissionPipeline<'a> {
    client: &'a RpcClient,
}

impl<'a> SubmissionPipeline<'a> {
    pub fn new(client: &'a RpcClient) -> Self {
        Self { client }
    }

    /// Sign the unit with the provided keypairs, send it, and block until the
    /// network confirms it at the client's commitment level.
    ///
    /// Rejection or confirmation timeout is caught and logged, and surfaces
    /// as a `Failed` status rather than an error, so callers composing
    /// several transactions can decide whether to continue. At-most-once:
    /// nothing is retried here.
    pub fn submit(
        &self,
        unit: &TransactionUnit,
        signers: &[&Keypair],
    ) -> Result<SubmissionResult, TransactionError> {
        for required in &unit.required_signers {
            if !signers.iter().any(|k| k.pubkey() == *required) {
                return Err(TransactionError::MissingSigner(*required));
            }
        }

        let blockhash = self
            .client
            .get_latest_blockhash()
            .map_err(|e| TransactionError::Network(e.to_string()))?;

        let mut tx = Transaction::new_with_payer(&unit.instructions, Some(&unit.payer));
        tx.try_sign(&signers.to_vec(), blockhash)?;

        tracing::info!(
            "Submitting transaction with {} instruction(s)...",
            unit.instructions.len()
        );
        match self.client.send_and_confirm_transaction(&tx) {
            Ok(signature) => {
                tracing::info!("Transaction confirmed: {}", signature);
                Ok(SubmissionResult {
                    signature: Some(signature),
                    status: SubmissionStatus::Confirmed,
                })
            }
            Err(e) => {
                tracing::error!("Transaction failed: {}", e);
                Ok(SubmissionResult {
                    signature: None,
                    status: SubmissionStatus::Failed(e.to_string()),
                })
            }
        }
    }

    /// Estimate the fee for the unit against a current blockhash.
    pub fn estimate_fee(&self, unit: &TransactionUnit) -> Result<u64, TransactionError> {
        let blockhash = self
            .client
            .get_latest_blockhash()
            .map_err(|e| TransactionError::Network(e.to_string()))?;
        let message =
            Message::new_with_blockhash(&unit.instructions, Some(&unit.payer), &blockhash);

        let fee = self
            .client
            .get_fee_for_message(&message)
            .map_err(|e| TransactionError::Network(e.to_string()))?;
        tracing::info!("Estimated fee: {} lamports", fee);
        Ok(fee)
    }
}

/// Transaction assembly and submission errors
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("required signer {0} was not provided")]
    MissingSigner(Pubkey),

    #[error("signing failed: {0}")]
    Signing(#[from] SignerError),

    #[error("RPC unreachable: {0}")]
    Network(String),
}
