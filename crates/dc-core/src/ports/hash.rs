use anyhow::Result;

pub trait ContentHashPort: Send + Sync {
    /// Lowercase hex digest of `bytes`.
    fn hash_bytes(&self, bytes: &[u8]) -> Result<String>;
}
