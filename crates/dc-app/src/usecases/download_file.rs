use std::sync::Arc;

use anyhow::{Context, Result};
use dc_core::ports::ContentStorePort;
use dc_core::{Address, FileEntry, FileHash};
use tracing::{info, warn};

use crate::StorageClient;

/// Retrieved bytes plus the record they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub entry: FileEntry,
    pub bytes: Vec<u8>,
    /// Whether the access counter update was accepted.
    pub access_recorded: bool,
}

/// Fetches a file's content, counting the access on a best-effort basis.
pub struct DownloadFile {
    client: Arc<StorageClient>,
    content: Arc<dyn ContentStorePort>,
}

impl DownloadFile {
    pub fn from_ports(client: Arc<StorageClient>, content: Arc<dyn ContentStorePort>) -> Self {
        Self { client, content }
    }

    /// Looks up `(owner, file_hash)`, records the access, then retrieves the content.
    ///
    /// A failed access update is logged and reported through
    /// [`DownloadedFile::access_recorded`]; it never prevents retrieval.
    #[tracing::instrument(
        name = "usecase.download_file.execute",
        skip(self),
        fields(owner = %owner, file_hash = %file_hash)
    )]
    pub async fn execute(&self, owner: &Address, file_hash: &FileHash) -> Result<DownloadedFile> {
        let entry = self
            .client
            .get_file(owner, file_hash)
            .await
            .with_context(|| format!("Failed to look up file {file_hash}"))?;

        let access_recorded = match self.client.record_download(owner, file_hash).await {
            Ok(signature) => {
                info!(signature = %signature, "Download recorded");
                true
            }
            Err(err) => {
                warn!(error = %err, "Failed to record download, continuing");
                false
            }
        };

        let bytes = self
            .content
            .retrieve(&entry.record.content_address)
            .await
            .with_context(|| format!("Failed to retrieve {}", entry.record.content_address))?;

        Ok(DownloadedFile {
            entry,
            bytes,
            access_recorded,
        })
    }
}
