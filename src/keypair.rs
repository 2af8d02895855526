//! Keypair generation, persistence and recovery
//!
//! Key files are a JSON array of unsigned bytes holding the 64-byte secret
//! key, the same format `solana-keygen` writes. Secrets are never logged.

use std::fs;
use std::path::Path;

use solana_sdk::derivation_path::DerivationPath;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{keypair_from_seed_and_derivation_path, Keypair, Signature, Signer};
use thiserror::Error;

/// Generate a fresh random keypair.
pub fn generate() -> Keypair {
    let keypair = Keypair::new();
    tracing::info!("Generated new keypair: {}", keypair.pubkey());
    keypair
}

/// Load a keypair from a JSON byte-array file.
pub fn load_keypair(path: impl AsRef<Path>) -> Result<Keypair, KeypairError> {
    let path = path.as_ref();
    tracing::debug!("Reading keypair file: {}", path.display());

    let raw = fs::read_to_string(path)
        .map_err(|e| KeypairError::Io(path.display().to_string(), e))?;
    let bytes: Vec<u8> = serde_json::from_str(&raw)?;
    let keypair = Keypair::try_from(bytes.as_slice())
        .map_err(|e| KeypairError::InvalidSecret(e.to_string()))?;

    tracing::info!("Loaded keypair {} from {}", keypair.pubkey(), path.display());
    Ok(keypair)
}

/// Save a keypair as a JSON byte-array file.
pub fn save_keypair(keypair: &Keypair, path: impl AsRef<Path>) -> Result<(), KeypairError> {
    let path = path.as_ref();
    let bytes = keypair.to_bytes().to_vec();
    let json = serde_json::to_string(&bytes)?;

    fs::write(path, json).map_err(|e| KeypairError::Io(path.display().to_string(), e))?;
    tracing::info!("Saved keypair {} to {}", keypair.pubkey(), path.display());
    Ok(())
}

/// Recover a keypair from a base58-encoded secret key.
pub fn from_base58(encoded: &str) -> Result<Keypair, KeypairError> {
    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| KeypairError::InvalidSecret(format!("base58 decode failed: {e}")))?;
    Keypair::try_from(bytes.as_slice()).map_err(|e| KeypairError::InvalidSecret(e.to_string()))
}

/// Export a keypair's secret key as a base58 string.
pub fn to_base58(keypair: &Keypair) -> String {
    bs58::encode(keypair.to_bytes()).into_string()
}

/// Check that a keypair's public identity matches the expected key.
pub fn verify_keypair(keypair: &Keypair, expected: &Pubkey) -> bool {
    let matches = keypair.pubkey() == *expected;
    if matches {
        tracing::info!("Public key {} matches the provided secret key", expected);
    } else {
        tracing::warn!("Public key {} does not match the provided secret key", expected);
    }
    matches
}

/// Produce a detached ed25519 signature over a UTF-8 message.
pub fn sign_message(keypair: &Keypair, message: &str) -> Signature {
    tracing::debug!("Signing message with {}", keypair.pubkey());
    keypair.sign_message(message.as_bytes())
}

/// Verify a detached signature against a public identity.
pub fn verify_signature(message: &str, signature: &Signature, pubkey: &Pubkey) -> bool {
    let valid = signature.verify(pubkey.as_ref(), message.as_bytes());
    if valid {
        tracing::info!("Signature is valid and signed by {}", pubkey);
    } else {
        tracing::warn!("Signature is not valid or not signed by {}", pubkey);
    }
    valid
}

/// Restore the first `count` accounts of a BIP-39 mnemonic using the Solana
/// derivation path m/44'/501'/i'/0' (hardened at every level).
pub fn from_mnemonic(phrase: &str, count: u32) -> Result<Vec<Keypair>, KeypairError> {
    let mnemonic = bip39::Mnemonic::parse(phrase)
        .map_err(|e| KeypairError::InvalidMnemonic(e.to_string()))?;
    let seed = mnemonic.to_seed("");

    let mut keypairs = Vec::with_capacity(count as usize);
    for account in 0..count {
        let path = DerivationPath::new_bip44(Some(account), Some(0));
        let keypair = keypair_from_seed_and_derivation_path(&seed, Some(path))
            .map_err(|e| KeypairError::Derivation(e.to_string()))?;
        tracing::info!(
            "Restored account #{account} at m/44'/501'/{account}'/0' => {}",
            keypair.pubkey()
        );
        keypairs.push(keypair);
    }
    Ok(keypairs)
}

/// Brute-force search for an address with a given base58 prefix/suffix.
///
/// The search is lazy and resumable: each `run` scans candidates until a
/// match is found or the attempt cap is exhausted, and a later call picks up
/// where the previous one stopped once the cap is raised. Prefixes longer
/// than a few characters are practically non-terminating, hence the cap.
pub struct VanitySearch {
    prefix: String,
    suffix: String,
    cap: Option<u64>,
    attempts: u64,
}

impl VanitySearch {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
            cap: None,
            attempts: 0,
        }
    }

    /// Cap the total number of candidates this search may try.
    pub fn with_cap(mut self, cap: u64) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Raise the cap by `extra` attempts so an exhausted search can resume.
    pub fn extend_cap(&mut self, extra: u64) {
        if let Some(cap) = self.cap.as_mut() {
            *cap += extra;
        }
    }

    /// Candidates tried so far, across all runs.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Whether an address satisfies the search pattern.
    pub fn matches(&self, address: &Pubkey) -> bool {
        let encoded = address.to_string();
        encoded.starts_with(&self.prefix) && encoded.ends_with(&self.suffix)
    }

    /// Scan candidates until a match or the cap. Returns `None` when the cap
    /// is exhausted without a match.
    pub fn run(&mut self) -> Option<Keypair> {
        loop {
            if let Some(cap) = self.cap {
                if self.attempts >= cap {
                    tracing::warn!(
                        "Vanity search for '{}…{}' exhausted {} attempts without a match",
                        self.prefix,
                        self.suffix,
                        self.attempts
                    );
                    return None;
                }
            }
            self.attempts += 1;

            let candidate = Keypair::new();
            if self.matches(&candidate.pubkey()) {
                tracing::info!(
                    "Found vanity address {} after {} attempts",
                    candidate.pubkey(),
                    self.attempts
                );
                return Some(candidate);
            }
        }
    }
}

/// Keypair handling errors
#[derive(Error, Debug)]
pub enum KeypairError {
    #[error("failed to read or write key file {0}: {1}")]
    Io(String, #[source] std::io::Error),

    #[error("key file is not a JSON byte array: {0}")]
    Format(#[from] serde_json::Error),

    #[error("invalid secret key material: {0}")]
    InvalidSecret(String),

    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("key derivation failed: {0}")]
    Derivation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_preserves_identity() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new_account.json");

        let keypair = generate();
        save_keypair(&keypair, &path).unwrap();

        let loaded = load_keypair(&path).unwrap();
        assert_eq!(loaded.pubkey(), keypair.pubkey());
        assert!(verify_keypair(&loaded, &keypair.pubkey()));
    }

    #[test]
    fn key_file_is_a_json_byte_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("id.json");

        let keypair = generate();
        save_keypair(&keypair, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let bytes: Vec<u8> = serde_json::from_str(&raw).unwrap();
        assert_eq!(bytes.len(), 64);
        assert_eq!(bytes, keypair.to_bytes().to_vec());
    }

    #[test]
    fn load_rejects_wrong_length() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("short.json");
        std::fs::write(&path, "[1,2,3]").unwrap();

        assert!(matches!(
            load_keypair(&path),
            Err(KeypairError::InvalidSecret(_))
        ));
    }

    #[test]
    fn base58_round_trip() {
        let keypair = generate();
        let encoded = to_base58(&keypair);
        let restored = from_base58(&encoded).unwrap();
        assert_eq!(restored.pubkey(), keypair.pubkey());
    }

    #[test]
    fn from_base58_rejects_garbage() {
        assert!(from_base58("not-base58-0OIl").is_err());
    }

    #[test]
    fn sign_and_verify_hello_solana() {
        let keypair = generate();
        let signature = sign_message(&keypair, "Hello Solana");

        assert!(verify_signature("Hello Solana", &signature, &keypair.pubkey()));

        // Any other identity must fail verification.
        let other = generate();
        assert!(!verify_signature("Hello Solana", &signature, &other.pubkey()));

        // So must a tampered message.
        assert!(!verify_signature("Hello Salona", &signature, &keypair.pubkey()));
    }

    #[test]
    fn mnemonic_restore_is_deterministic() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

        let first = from_mnemonic(phrase, 3).unwrap();
        let second = from_mnemonic(phrase, 3).unwrap();
        assert_eq!(first.len(), 3);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.pubkey(), b.pubkey());
        }
        // Distinct accounts along the path.
        assert_ne!(first[0].pubkey(), first[1].pubkey());
    }

    #[test]
    fn mnemonic_accounts_export_to_base58() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

        for restored in from_mnemonic(phrase, 2).unwrap() {
            let reimported = from_base58(&to_base58(&restored)).unwrap();
            assert_eq!(reimported.pubkey(), restored.pubkey());
        }
    }

    #[test]
    fn mnemonic_rejects_bad_phrase() {
        assert!(matches!(
            from_mnemonic("definitely not a valid phrase", 1),
            Err(KeypairError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn vanity_search_respects_cap() {
        // An impossible pattern: "0" is not in the base58 alphabet.
        let mut search = VanitySearch::new("0", "").with_cap(25);
        assert!(search.run().is_none());
        assert_eq!(search.attempts(), 25);

        // Resumable after raising the cap.
        search.extend_cap(10);
        assert!(search.run().is_none());
        assert_eq!(search.attempts(), 35);
    }

    #[test]
    fn vanity_search_empty_pattern_matches_first_candidate() {
        let mut search = VanitySearch::new("", "").with_cap(5);
        let keypair = search.run().expect("empty pattern matches everything");
        assert!(search.matches(&keypair.pubkey()));
        assert_eq!(search.attempts(), 1);
    }
}
