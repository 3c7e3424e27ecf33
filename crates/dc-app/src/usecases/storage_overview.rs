use std::sync::Arc;

use anyhow::{Context, Result};
use dc_core::records::FileSummary;
use dc_core::{Address, FileEntry, StorageRecord};
use serde::Serialize;
use tracing::debug;

use crate::StorageClient;

/// Dashboard data for one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageOverviewReport {
    pub owner: Address,
    pub storage_address: Address,
    /// `None` until the owner initializes storage.
    pub storage: Option<StorageRecord>,
    pub files: Vec<FileEntry>,
    pub summary: FileSummary,
}

impl StorageOverviewReport {
    pub fn is_initialized(&self) -> bool {
        self.storage.is_some()
    }
}

pub struct StorageOverview {
    client: Arc<StorageClient>,
}

impl StorageOverview {
    pub fn new(client: Arc<StorageClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(name = "usecase.storage_overview.execute", skip(self), fields(owner = %owner))]
    pub async fn execute(&self, owner: &Address) -> Result<StorageOverviewReport> {
        let storage_address = self.client.derive_storage_address(owner)?;

        let storage = match self.client.fetch_storage_info(owner).await {
            Ok(record) => Some(record),
            Err(err) if err.is_not_found() => None,
            Err(err) => return Err(err).context("Failed to fetch storage record"),
        };

        let files = if storage.is_some() {
            self.client
                .list_owned_files(owner)
                .await
                .context("Failed to list files")?
        } else {
            debug!("Storage not initialized, skipping file listing");
            Vec::new()
        };

        Ok(StorageOverviewReport {
            owner: *owner,
            storage_address,
            summary: FileSummary::from_entries(&files),
            storage,
            files,
        })
    }
}
