//! Resolved client configuration
//!
//! Loaded once at each binary's boundary and passed down explicitly; no deep
//! helper reads ambient files or environment variables on its own. Sources,
//! in increasing precedence: built-in defaults, the Solana CLI config file
//! (`~/.config/solana/cli/config.yml`), then `RPC_URL` / `KEYPAIR_PATH` /
//! `COMMITMENT` / `SEED` environment variables (a `.env` file is honored).

use std::env;
use std::path::PathBuf;

use config::{Config, File, FileFormat};
use dotenv::dotenv;
use serde::Deserialize;
use solana_sdk::commitment_config::CommitmentConfig;
use thiserror::Error;

use crate::DEVNET_URL;

fn default_rpc_url() -> String {
    DEVNET_URL.to_string()
}

fn default_commitment() -> String {
    "confirmed".to_string()
}

fn default_seed() -> String {
    "test1".to_string()
}

/// Resolved configuration for one script invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// RPC endpoint, named as in the Solana CLI config file.
    #[serde(default = "default_rpc_url")]
    pub json_rpc_url: String,

    /// Commitment level: processed, confirmed or finalized.
    #[serde(default = "default_commitment")]
    pub commitment: String,

    /// Path to the default signer's key file.
    #[serde(default)]
    pub keypair_path: Option<String>,

    /// String seed for the derived data account.
    #[serde(default = "default_seed")]
    pub seed: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            json_rpc_url: default_rpc_url(),
            commitment: default_commitment(),
            keypair_path: None,
            seed: default_seed(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the Solana CLI config file and the
    /// environment. A missing config file falls back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::load_from(cli_config_path())
    }

    /// Load from an explicit config file path plus the environment.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        let mut cfg: ClientConfig = Config::builder()
            .add_source(
                File::new(&path.display().to_string(), FileFormat::Yaml).required(false),
            )
            .build()
            .map_err(|e| ConfigError::File(path.display().to_string(), e.to_string()))?
            .try_deserialize()
            .map_err(|e| ConfigError::File(path.display().to_string(), e.to_string()))?;

        if let Ok(url) = env::var("RPC_URL") {
            cfg.json_rpc_url = url;
        }
        if let Ok(path) = env::var("KEYPAIR_PATH") {
            cfg.keypair_path = Some(path);
        }
        if let Ok(commitment) = env::var("COMMITMENT") {
            cfg.commitment = commitment;
        }
        if let Ok(seed) = env::var("SEED") {
            cfg.seed = seed;
        }

        // Fail early on a bad commitment level rather than at first use.
        cfg.commitment_config()?;

        tracing::debug!(
            "Resolved config: rpc {}, commitment {}, seed '{}'",
            cfg.json_rpc_url,
            cfg.commitment,
            cfg.seed
        );
        Ok(cfg)
    }

    /// The configured commitment level.
    pub fn commitment_config(&self) -> Result<CommitmentConfig, ConfigError> {
        match self.commitment.as_str() {
            "processed" => Ok(CommitmentConfig::processed()),
            "confirmed" => Ok(CommitmentConfig::confirmed()),
            "finalized" => Ok(CommitmentConfig::finalized()),
            other => Err(ConfigError::InvalidCommitment(other.to_string())),
        }
    }

    /// The configured key file path, or an error pointing at `solana-keygen`.
    pub fn keypair_path(&self) -> Result<&str, ConfigError> {
        match self.keypair_path.as_deref() {
            Some(path) if !path.is_empty() => Ok(path),
            _ => Err(ConfigError::NoDefaultSigner),
        }
    }
}

/// Location of the Solana CLI config file.
pub fn cli_config_path() -> PathBuf {
    let home = env::var("HOME").unwrap_or_default();
    PathBuf::from(home)
        .join(".config")
        .join("solana")
        .join("cli")
        .join("config.yml")
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    File(String, String),

    #[error("unknown commitment level '{0}' (expected processed|confirmed|finalized)")]
    InvalidCommitment(String),

    #[error("no default signer configured; set keypair_path (create one with `solana-keygen new`)")]
    NoDefaultSigner,
}
