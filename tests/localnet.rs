//! Integration tests against a local validator.
//!
//! These tests are ignored by default; start `solana-test-validator` on the
//! default port and run them with `cargo test -- --ignored`.

use solana_client::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::signature::{Keypair, Signer};

use solbox::{account, instruction, rpc, transaction, LOCALHOST_URL};

fn localnet() -> RpcClient {
    rpc::connect(LOCALHOST_URL, CommitmentConfig::confirmed())
}

#[tokio::test]
#[ignore]
async fn airdrop_increases_balance() {
    let client = localnet();
    let wallet = Keypair::new();

    let before = account::balance(&client, &wallet.pubkey()).unwrap();
    assert_eq!(before, 0);

    account::request_airdrop(&client, &wallet.pubkey(), 3.0)
        .await
        .unwrap();

    let after = account::balance(&client, &wallet.pubkey()).unwrap();
    assert_eq!(after, 3 * LAMPORTS_PER_SOL);
}

#[tokio::test]
#[ignore]
async fn transfer_moves_lamports() {
    let client = localnet();
    let sender = Keypair::new();
    let recipient = Keypair::new();

    account::request_airdrop(&client, &sender.pubkey(), 1.0)
        .await
        .unwrap();

    let ix = instruction::transfer_sol(&sender.pubkey(), &recipient.pubkey(), 0.1).unwrap();
    let unit = transaction::assemble(vec![ix], sender.pubkey(), &[sender.pubkey()]).unwrap();

    let pipeline = transaction::SubmissionPipeline::new(&client);
    let result = pipeline.submit(&unit, &[&sender]).unwrap();
    assert!(result.is_confirmed());

    let received = account::balance(&client, &recipient.pubkey()).unwrap();
    assert_eq!(received, LAMPORTS_PER_SOL / 10);
}

#[tokio::test]
#[ignore]
async fn ensure_account_is_idempotent() {
    let client = localnet();
    let owner = Keypair::new();
    // The system program owns plain data accounts created with a seed.
    let program_id = solana_sdk::system_program::id();

    account::request_airdrop(&client, &owner.pubkey(), 2.0)
        .await
        .unwrap();

    let first = account::ensure_account(&client, &owner, "test1", &program_id, 4).unwrap();
    let created = account::fetch_account(&client, &first).unwrap();
    assert_eq!(created.data.len(), 4);

    // A second call must find the existing account and return the same address
    // without attempting another creation.
    let second = account::ensure_account(&client, &owner, "test1", &program_id, 4).unwrap();
    assert_eq!(first, second);
}
