use std::sync::Arc;

use anyhow::{Context, Result};
use dc_core::records::FileSummary;
use dc_core::FileEntry;
use serde::Serialize;
use tracing::info;

use crate::StorageClient;

/// Public catalogue across all owners, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCatalogue {
    pub files: Vec<FileEntry>,
    pub summary: FileSummary,
}

pub struct BrowsePublicFiles {
    client: Arc<StorageClient>,
}

impl BrowsePublicFiles {
    pub fn new(client: Arc<StorageClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(name = "usecase.browse_public_files.execute", skip(self))]
    pub async fn execute(&self) -> Result<PublicCatalogue> {
        let files = self
            .client
            .list_public_files()
            .await
            .context("Failed to list public files")?;
        let summary = FileSummary::from_entries(&files);

        info!(count = summary.file_count, "Public files browsed");
        Ok(PublicCatalogue { files, summary })
    }
}
