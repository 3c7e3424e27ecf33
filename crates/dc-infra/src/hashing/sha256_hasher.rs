use anyhow::Result;
use dc_core::ports::ContentHashPort;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of file content.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl ContentHashPort for Sha256Hasher {
    fn hash_bytes(&self, bytes: &[u8]) -> Result<String> {
        Ok(hex::encode(Sha256::digest(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        let digest = Sha256Hasher.hash_bytes(b"test").unwrap();
        assert_eq!(
            digest,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }
}
