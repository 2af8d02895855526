//! Deployed-program handles
//!
//! A program's id is the public key of the keypair used to deploy it; the
//! deploy tooling leaves that keypair next to the build artifacts as
//! `<name>-keypair.json`.

use std::path::Path;

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signer;

use crate::keypair::{self, KeypairError};

/// A deployed on-chain program this client can target.
#[derive(Debug, Clone)]
pub struct ProgramHandle {
    pub name: String,
    pub program_id: Pubkey,
}

/// Resolve a program's id from its deploy keypair, e.g.
/// `dist/program/p4_calculator-keypair.json`.
pub fn load_program(dir: impl AsRef<Path>, name: &str) -> Result<ProgramHandle, KeypairError> {
    let path = dir.as_ref().join(format!("{name}-keypair.json"));
    let program_keypair = keypair::load_keypair(&path)?;
    let program_id = program_keypair.pubkey();

    tracing::info!("Program '{}' has id {}", name, program_id);
    Ok(ProgramHandle {
        name: name.to_string(),
        program_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn loads_program_id_from_deploy_keypair() {
        let dir = TempDir::new().unwrap();
        let deploy_keypair = keypair::generate();
        keypair::save_keypair(&deploy_keypair, dir.path().join("p4_calculator-keypair.json"))
            .unwrap();

        let handle = load_program(dir.path(), "p4_calculator").unwrap();
        assert_eq!(handle.name, "p4_calculator");
        assert_eq!(handle.program_id, deploy_keypair.pubkey());
    }

    #[test]
    fn missing_deploy_keypair_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_program(dir.path(), "hello_solana"),
            Err(KeypairError::Io(..))
        ));
    }
}
