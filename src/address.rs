//! Deterministic address derivation
//!
//! Seeded addresses (base + string seed + owning program) and program-derived
//! addresses (seed list + program, guaranteed off-curve).

use solana_sdk::pubkey::{Pubkey, PubkeyError};
use thiserror::Error;

/// Derive a deterministic address from a base key, a string seed and the
/// owning program. Two calls with identical inputs always yield the same
/// address.
pub fn derive_with_seed(
    base: &Pubkey,
    seed: &str,
    program_id: &Pubkey,
) -> Result<Pubkey, AddressError> {
    let derived = Pubkey::create_with_seed(base, seed, program_id)
        .map_err(|e| AddressError::InvalidSeed(seed.to_string(), e))?;

    tracing::debug!(
        "Derived {} from base {} with seed '{}' owned by {}",
        derived,
        base,
        seed,
        program_id
    );
    Ok(derived)
}

/// Find a program-derived address for the given seeds, searching bump bytes
/// 255 down to 0 for the first off-curve candidate.
///
/// Returns the address and the bump byte that produced it.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), AddressError> {
    let (pda, bump) = Pubkey::try_find_program_address(seeds, program_id)
        .ok_or(AddressError::NoViableBump)?;

    debug_assert!(is_off_curve(&pda));
    tracing::debug!("Found PDA {} (bump {}) under program {}", pda, bump, program_id);
    Ok((pda, bump))
}

/// True iff the address has no corresponding private key, i.e. it is a
/// derived (non-wallet) address.
pub fn is_off_curve(address: &Pubkey) -> bool {
    !address.is_on_curve()
}

/// Address derivation errors
#[derive(Error, Debug)]
pub enum AddressError {
    #[error("seed '{0}' cannot produce a valid address: {1}")]
    InvalidSeed(String, #[source] PubkeyError),

    #[error("no bump byte in 255..=0 produced an off-curve address")]
    NoViableBump,
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::signature::{Keypair, Signer};

    #[test]
    fn seeded_derivation_is_deterministic() {
        let base = Keypair::new().pubkey();
        let program_id = Pubkey::new_unique();

        let a = derive_with_seed(&base, "test1", &program_id).unwrap();
        let b = derive_with_seed(&base, "test1", &program_id).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_give_different_addresses() {
        let base = Keypair::new().pubkey();
        let program_id = Pubkey::new_unique();

        let a = derive_with_seed(&base, "test1", &program_id).unwrap();
        let b = derive_with_seed(&base, "test2", &program_id).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn overlong_seed_is_rejected() {
        let base = Keypair::new().pubkey();
        let program_id = Pubkey::new_unique();

        // Seeds are capped at 32 bytes by the runtime.
        let seed = "x".repeat(64);
        let result = derive_with_seed(&base, &seed, &program_id);
        assert!(matches!(result, Err(AddressError::InvalidSeed(..))));
    }

    #[test]
    fn pda_is_off_curve() {
        let program_id = Pubkey::new_unique();
        let payer = Keypair::new().pubkey();

        let (pda, _bump) =
            find_program_address(&[b"vault-seed", payer.as_ref()], &program_id).unwrap();
        assert!(is_off_curve(&pda));
    }

    #[test]
    fn pda_search_is_deterministic() {
        let program_id = Pubkey::new_unique();

        let (a, bump_a) = find_program_address(&[b"state"], &program_id).unwrap();
        let (b, bump_b) = find_program_address(&[b"state"], &program_id).unwrap();
        assert_eq!(a, b);
        assert_eq!(bump_a, bump_b);
    }

    #[test]
    fn wallet_keys_are_on_curve() {
        let wallet = Keypair::new().pubkey();
        assert!(!is_off_curve(&wallet));
    }
}
