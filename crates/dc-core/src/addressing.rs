//! Deterministic program address derivation.
//!
//! Storage and file records live at program-derived addresses: hashes of a
//! fixed namespace tag, the owner identity and (for files) a prefix of the file
//! hash. Anyone can recompute them without a lookup, so the client never
//! persists or transmits a record address on its own.
//!
//! Byte contract, shared with the program:
//!
//! ```text
//! storage: seeds = ["storage", owner(32)]
//! file:    seeds = ["file", owner(32), file_hash[0..min(len, 32)]]
//! address = sha256(seed_1 || .. || seed_n || [bump] || program_id || "ProgramDerivedAddress")
//! ```
//!
//! `bump` is searched from 255 downwards; the first candidate that is not a
//! valid ed25519 point wins.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::ids::{Address, FileHash};

pub const STORAGE_SEED: &[u8] = b"storage";
pub const FILE_SEED: &[u8] = b"file";

pub const MAX_SEEDS: usize = 16;
pub const MAX_SEED_LEN: usize = 32;

const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressingError {
    #[error("too many seeds: {0} (max 16)")]
    TooManySeeds(usize),

    #[error("seed of {0} bytes exceeds 32 bytes")]
    SeedTooLong(usize),

    #[error("derived address lies on the ed25519 curve")]
    OnCurve,

    #[error("no viable bump found")]
    NoViableBump,
}

/// Hashes `seeds` into a program address, rejecting on-curve results.
pub fn create_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<Address, AddressingError> {
    if seeds.len() > MAX_SEEDS {
        return Err(AddressingError::TooManySeeds(seeds.len()));
    }
    if let Some(seed) = seeds.iter().find(|s| s.len() > MAX_SEED_LEN) {
        return Err(AddressingError::SeedTooLong(seed.len()));
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);
    let address = Address::new(hasher.finalize().into());

    if address.is_on_curve() {
        return Err(AddressingError::OnCurve);
    }
    Ok(address)
}

/// Finds the canonical program address for `seeds` and its bump seed.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<(Address, u8), AddressingError> {
    // The bump takes one seed slot of its own.
    if seeds.len() >= MAX_SEEDS {
        return Err(AddressingError::TooManySeeds(seeds.len() + 1));
    }

    for bump in (0..=u8::MAX).rev() {
        let bump_seed = [bump];
        let mut with_bump: Vec<&[u8]> = seeds.to_vec();
        with_bump.push(&bump_seed);
        match create_program_address(&with_bump, program_id) {
            Ok(address) => return Ok((address, bump)),
            Err(AddressingError::OnCurve) => {}
            Err(other) => return Err(other),
        }
    }
    Err(AddressingError::NoViableBump)
}

/// Address of the owner's storage record.
pub fn storage_address(
    owner: &Address,
    program_id: &Address,
) -> Result<(Address, u8), AddressingError> {
    find_program_address(&[STORAGE_SEED, owner.as_bytes()], program_id)
}

/// Address of the file record identified by `(owner, file_hash)`.
pub fn file_address(
    owner: &Address,
    file_hash: &FileHash,
    program_id: &Address,
) -> Result<(Address, u8), AddressingError> {
    find_program_address(&[FILE_SEED, owner.as_bytes(), file_hash.seed()], program_id)
}
