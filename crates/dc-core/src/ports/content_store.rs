use anyhow::Result;
use async_trait::async_trait;

use crate::ids::ContentAddress;

/// The content-addressed network holding file bytes.
#[async_trait]
pub trait ContentStorePort: Send + Sync {
    /// Retrieval locator (URL) for `address`.
    fn locator(&self, address: &ContentAddress) -> String;

    /// Stores `bytes` and returns their content address once placement is confirmed.
    async fn place(&self, file_name: &str, bytes: Vec<u8>) -> Result<ContentAddress>;

    /// Whether `address` currently resolves to retrievable content.
    async fn is_available(&self, address: &ContentAddress) -> Result<bool>;

    async fn retrieve(&self, address: &ContentAddress) -> Result<Vec<u8>>;
}
