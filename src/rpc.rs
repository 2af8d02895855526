//! Cluster connection and read-side RPC queries

use solana_client::rpc_client::{GetConfirmedSignaturesForAddress2Config, RpcClient};
use solana_client::rpc_config::{RpcBlockConfig, RpcTransactionConfig};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use thiserror::Error;

/// Connect to a cluster RPC endpoint at the given commitment level.
pub fn connect(url: &str, commitment: CommitmentConfig) -> RpcClient {
    tracing::info!(
        "Connecting to sol rpc: {} at commitment level: {}...",
        url,
        commitment.commitment
    );
    RpcClient::new_with_commitment(url.to_string(), commitment)
}

/// Snapshot of general cluster state.
#[derive(Debug, Clone)]
pub struct ClusterInfo {
    pub slot: u64,
    pub block_time: Option<i64>,
    pub slot_leader: Option<Pubkey>,
    pub transactions_in_block: Option<usize>,
}

/// Query the current slot, its block time, the slot leader and the size of
/// the current block.
pub fn cluster_info(client: &RpcClient) -> Result<ClusterInfo, RpcError> {
    let slot = client.get_slot().map_err(RpcError::network)?;
    tracing::info!("Current slot is {}", slot);

    let block_time = client.get_block_time(slot).ok();
    if let Some(ts) = block_time {
        let formatted = chrono::DateTime::from_timestamp(ts, 0)
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| ts.to_string());
        tracing::info!("Block time of slot {}: {}", slot, formatted);
    }

    let slot_leader = client
        .get_slot_leaders(slot, 1)
        .ok()
        .and_then(|leaders| leaders.first().copied());
    if let Some(leader) = slot_leader {
        tracing::info!("Slot leader is {}", leader);
    }

    let transactions_in_block = client
        .get_block_with_config(
            slot,
            RpcBlockConfig {
                max_supported_transaction_version: Some(0),
                ..RpcBlockConfig::default()
            },
        )
        .ok()
        .and_then(|block| block.transactions.map(|txs| txs.len()));
    if let Some(count) = transactions_in_block {
        tracing::info!("Block at slot {} holds {} transaction(s)", slot, count);
    }

    Ok(ClusterInfo {
        slot,
        block_time,
        slot_leader,
        transactions_in_block,
    })
}

/// Fetch the latest signatures that touched `address` and log each
/// transaction's slot and status. Returns the signatures, newest first.
pub fn recent_transactions(
    client: &RpcClient,
    address: &Pubkey,
    limit: usize,
) -> Result<Vec<Signature>, RpcError> {
    let config = GetConfirmedSignaturesForAddress2Config {
        limit: Some(limit),
        ..GetConfirmedSignaturesForAddress2Config::default()
    };
    let infos = client
        .get_signatures_for_address_with_config(address, config)
        .map_err(RpcError::network)?;

    let mut signatures = Vec::with_capacity(infos.len());
    for info in infos {
        let signature: Signature = info
            .signature
            .parse()
            .map_err(|_| RpcError::InvalidSignature(info.signature.clone()))?;

        let tx = client
            .get_transaction_with_config(
                &signature,
                RpcTransactionConfig {
                    commitment: Some(CommitmentConfig::confirmed()),
                    max_supported_transaction_version: Some(0),
                    ..RpcTransactionConfig::default()
                },
            )
            .map_err(RpcError::network)?;
        tracing::info!(
            "Transaction {} landed in slot {} (block time {:?})",
            signature,
            tx.slot,
            tx.block_time
        );
        signatures.push(signature);
    }
    Ok(signatures)
}

/// RPC query errors
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("RPC unreachable: {0}")]
    Network(String),

    #[error("cluster returned an unparsable signature: {0}")]
    InvalidSignature(String),
}

impl RpcError {
    fn network(e: impl std::fmt::Display) -> Self {
        RpcError::Network(e.to_string())
    }
}
