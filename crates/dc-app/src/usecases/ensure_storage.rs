use std::sync::Arc;

use anyhow::{Context, Result};
use dc_core::{Address, ChainError};
use serde::Serialize;
use tracing::info;

use crate::StorageClient;

/// Outcome of [`EnsureStorage`]; both variants mean the record exists afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "address", rename_all = "snake_case")]
pub enum StorageStatus {
    Initialized(Address),
    AlreadyInitialized(Address),
}

impl StorageStatus {
    pub fn address(&self) -> &Address {
        match self {
            StorageStatus::Initialized(address) | StorageStatus::AlreadyInitialized(address) => address,
        }
    }
}

/// Creates the wallet owner's storage record unless it already exists.
pub struct EnsureStorage {
    client: Arc<StorageClient>,
}

impl EnsureStorage {
    pub fn new(client: Arc<StorageClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(name = "usecase.ensure_storage.execute", skip(self))]
    pub async fn execute(&self) -> Result<StorageStatus> {
        let owner = self.client.current_identity()?;
        let storage = self.client.derive_storage_address(&owner)?;

        if self
            .client
            .storage_exists(&owner)
            .await
            .context("Failed to check storage record")?
        {
            info!(storage = %storage, "Storage already initialized");
            return Ok(StorageStatus::AlreadyInitialized(storage));
        }

        match self.client.initialize_storage().await {
            Ok(address) => Ok(StorageStatus::Initialized(address)),
            // Lost a race with another initialize for the same owner.
            Err(ChainError::AlreadyExists(_)) => Ok(StorageStatus::AlreadyInitialized(storage)),
            Err(err) => Err(err).context("Failed to initialize storage"),
        }
    }
}
