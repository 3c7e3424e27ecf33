use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use dc_core::ports::ContentStorePort;
use dc_core::ContentAddress;
use sha2::{Digest, Sha256};

/// Content-addressed byte store keyed by the SHA-256 of the content.
#[derive(Default)]
pub struct InMemoryContentStore {
    blobs: Mutex<HashMap<ContentAddress, Vec<u8>>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, bytes: Vec<u8>) -> ContentAddress {
        let address = ContentAddress::from(format!("mem{}", hex::encode(Sha256::digest(&bytes))));
        if let Ok(mut blobs) = self.blobs.lock() {
            blobs.insert(address.clone(), bytes);
        }
        address
    }

    pub fn get(&self, address: &ContentAddress) -> Option<Vec<u8>> {
        self.blobs.lock().ok()?.get(address).cloned()
    }
}

#[async_trait]
impl ContentStorePort for InMemoryContentStore {
    fn locator(&self, address: &ContentAddress) -> String {
        format!("memory://{address}")
    }

    async fn place(&self, _file_name: &str, bytes: Vec<u8>) -> Result<ContentAddress> {
        Ok(self.insert(bytes))
    }

    async fn is_available(&self, address: &ContentAddress) -> Result<bool> {
        Ok(self.get(address).is_some())
    }

    async fn retrieve(&self, address: &ContentAddress) -> Result<Vec<u8>> {
        self.get(address)
            .ok_or_else(|| anyhow!("content {address} not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_identical_content_shares_an_address() {
        let store = InMemoryContentStore::new();
        let first = store.place("a", b"same".to_vec()).await.unwrap();
        let second = store.place("b", b"same".to_vec()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.retrieve(&first).await.unwrap(), b"same");
    }

    #[tokio::test]
    async fn test_unknown_content_is_unavailable() {
        let store = InMemoryContentStore::new();
        let missing = ContentAddress::from("memnothing");
        assert!(!store.is_available(&missing).await.unwrap());
        assert!(store.retrieve(&missing).await.is_err());
    }
}
