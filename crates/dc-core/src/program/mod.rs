//! Contract with the on-chain storage program: its identity, request shapes,
//! account byte layout and custom error codes.

mod error_code;
mod instruction;
pub mod layout;
mod wire;

use sha2::{Digest, Sha256};

use crate::ids::Address;

pub use error_code::ProgramErrorCode;
pub use instruction::{AccountMeta, ProgramInstruction, ProgramRequest, UploadFileArgs};

/// Program id of the deployed storage program.
pub const DEFAULT_PROGRAM_ID: &str = "2DWNrUtJXqnA9qu444yyACg2VXnXmEqwBPG7Q7cgM1NM";

/// The system program, required by instructions that allocate accounts.
pub const SYSTEM_PROGRAM_ID: Address = Address::new([0u8; 32]);

pub const DISCRIMINATOR_LEN: usize = 8;

/// Anchor-style 8-byte discriminator: `sha256("<namespace>:<name>")[..8]`.
pub fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&digest[..DISCRIMINATOR_LEN]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_program_id_parses() {
        let id: Address = DEFAULT_PROGRAM_ID.parse().unwrap();
        assert_eq!(id.to_string(), DEFAULT_PROGRAM_ID);
    }

    #[test]
    fn test_discriminator_is_namespace_sensitive() {
        assert_ne!(
            discriminator("account", "FileAccount"),
            discriminator("global", "FileAccount")
        );
    }
}
