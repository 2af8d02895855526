//! Account provisioning and state queries
//!
//! Guarantees a seeded data account exists, is rent-exempt for its size and
//! is owned by the right program before instructions write to it. Creation is
//! idempotent: re-invocation for the same (owner, seed, program) is a no-op
//! read, and a lost creation race is treated as success.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_account_decoder::parse_token::UiTokenAmount;
use solana_client::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::system_instruction;
use thiserror::Error;

use crate::address::{self, AddressError};
use crate::transaction::{self, SubmissionPipeline, SubmissionStatus, TransactionError};

/// Ensure the seeded data account for (owner, seed, program) exists with
/// `space` bytes, funded exactly at the rent-exemption minimum and owned by
/// `program_id`. Returns the derived address.
///
/// If the account already exists it is returned as-is: no re-funding, no
/// re-sizing.
pub fn ensure_account(
    client: &RpcClient,
    owner: &Keypair,
    seed: &str,
    program_id: &Pubkey,
    space: u64,
) -> Result<Pubkey, AccountError> {
    let data_pubkey = address::derive_with_seed(&owner.pubkey(), seed, program_id)?;
    tracing::info!("Data account derived with seed '{}': {}", seed, data_pubkey);

    if account_exists(client, &data_pubkey)? {
        tracing::info!("Account {} already exists, reusing it", data_pubkey);
        return Ok(data_pubkey);
    }
    tracing::info!("Account {} does not exist yet, creating it", data_pubkey);

    let lamports = rent_exempt_minimum(client, space)?;
    let instruction = system_instruction::create_account_with_seed(
        &owner.pubkey(),
        &data_pubkey,
        &owner.pubkey(),
        seed,
        lamports,
        space,
        program_id,
    );

    let unit = transaction::assemble(vec![instruction], owner.pubkey(), &[owner.pubkey()])?;
    let result = SubmissionPipeline::new(client).submit(&unit, &[owner])?;

    match result.status {
        SubmissionStatus::Confirmed => {
            tracing::info!("Created data account {} ({} bytes)", data_pubkey, space);
            Ok(data_pubkey)
        }
        SubmissionStatus::Failed(reason) => {
            // A concurrent provisioner may have won the creation race; if the
            // account is there now, the goal is met.
            if account_exists(client, &data_pubkey)? {
                tracing::warn!(
                    "Creation of {} failed ({}) but the account exists now, reusing it",
                    data_pubkey,
                    reason
                );
                Ok(data_pubkey)
            } else {
                Err(AccountError::Provisioning(data_pubkey, reason))
            }
        }
    }
}

/// Whether an account currently exists at `pubkey`. Absence is not an error;
/// transport failures are.
pub fn account_exists(client: &RpcClient, pubkey: &Pubkey) -> Result<bool, AccountError> {
    let response = client
        .get_account_with_commitment(pubkey, client.commitment())
        .map_err(|e| AccountError::Network(e.to_string()))?;
    Ok(response.value.is_some())
}

/// Fetch raw account state, failing if the account does not exist.
pub fn fetch_account(client: &RpcClient, pubkey: &Pubkey) -> Result<Account, AccountError> {
    let response = client
        .get_account_with_commitment(pubkey, client.commitment())
        .map_err(|e| AccountError::Network(e.to_string()))?;
    response.value.ok_or(AccountError::NotFound(*pubkey))
}

/// Fetch several accounts in one query. Missing addresses yield `None`.
pub fn fetch_accounts(
    client: &RpcClient,
    pubkeys: &[Pubkey],
) -> Result<Vec<Option<Account>>, AccountError> {
    client
        .get_multiple_accounts(pubkeys)
        .map_err(|e| AccountError::Network(e.to_string()))
}

/// The minimum funding an account of `space` bytes needs to persist.
pub fn rent_exempt_minimum(client: &RpcClient, space: u64) -> Result<u64, AccountError> {
    let lamports = client
        .get_minimum_balance_for_rent_exemption(space as usize)
        .map_err(|e| AccountError::Network(e.to_string()))?;
    tracing::debug!("Rent exemption for {} bytes: {} lamports", space, lamports);
    Ok(lamports)
}

/// Current balance in lamports.
pub fn balance(client: &RpcClient, pubkey: &Pubkey) -> Result<u64, AccountError> {
    let lamports = client
        .get_balance(pubkey)
        .map_err(|e| AccountError::Network(e.to_string()))?;
    tracing::info!(
        "Balance of {} is {} lamports ({} SOL)",
        pubkey,
        lamports,
        lamports as f64 / LAMPORTS_PER_SOL as f64
    );
    Ok(lamports)
}

/// Request a devnet/testnet airdrop and wait for it to confirm. Beware of
/// faucet caps and cooldowns between requests.
pub async fn request_airdrop(
    client: &RpcClient,
    pubkey: &Pubkey,
    sol: f64,
) -> Result<(), AccountError> {
    if !sol.is_finite() || sol < 0.0 {
        return Err(AccountError::InvalidAmount(sol));
    }
    let lamports = (sol * LAMPORTS_PER_SOL as f64) as u64;
    tracing::info!("Requesting airdrop of {} SOL for {}...", sol, pubkey);

    let signature = client
        .request_airdrop(pubkey, lamports)
        .map_err(|e| AccountError::Network(e.to_string()))?;

    // The faucet transaction takes a moment to land; poll until confirmed.
    for _ in 0..20 {
        let confirmed = client
            .confirm_transaction(&signature)
            .map_err(|e| AccountError::Network(e.to_string()))?;
        if confirmed {
            tracing::info!("Airdrop confirmed: {}", signature);
            return Ok(());
        }
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    }
    Err(AccountError::Network(format!(
        "airdrop {signature} not confirmed in time"
    )))
}

/// Calculator account state, as the on-chain program stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Calculator {
    pub value: u32,
}

impl Calculator {
    /// Serialized size of the account state.
    pub const SIZE: u64 = 4;
}

/// Fetch and decode a calculator data account.
pub fn fetch_calculator(client: &RpcClient, pubkey: &Pubkey) -> Result<Calculator, AccountError> {
    let account = fetch_account(client, pubkey)?;
    let calculator = Calculator::try_from_slice(&account.data)
        .map_err(|e| AccountError::Decode(*pubkey, e.to_string()))?;
    tracing::info!("Calculator {} holds value {}", pubkey, calculator.value);
    Ok(calculator)
}

/// Balance of the wallet's associated token account for `mint`.
pub fn token_balance(
    client: &RpcClient,
    wallet: &Pubkey,
    mint: &Pubkey,
) -> Result<UiTokenAmount, AccountError> {
    let ata = spl_associated_token_account::get_associated_token_address_with_program_id(
        wallet,
        mint,
        &spl_token::id(),
    );
    tracing::info!("Associated token account for {} / mint {}: {}", wallet, mint, ata);

    let amount = client
        .get_token_account_balance(&ata)
        .map_err(|e| AccountError::Network(e.to_string()))?;
    tracing::info!("Token balance: {}", amount.ui_amount_string);
    Ok(amount)
}

/// Account provisioning and query errors
#[derive(Error, Debug)]
pub enum AccountError {
    #[error(transparent)]
    Derivation(#[from] AddressError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error("RPC unreachable: {0}")]
    Network(String),

    #[error("account {0} does not exist")]
    NotFound(Pubkey),

    #[error("account {0} holds undecodable state: {1}")]
    Decode(Pubkey, String),

    #[error("failed to provision account {0}: {1}")]
    Provisioning(Pubkey, String),

    #[error("airdrop amount must be a non-negative finite number, got {0}")]
    InvalidAmount(f64),
}
