//! Upload flow: content first, metadata second.
//!
//! The content store must hold the bytes before the program learns about
//! them, so a placement failure aborts before any remote call and never
//! leaves a record pointing at missing content.

use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use dc_core::ports::{ClockPort, ContentHashPort, ContentStorePort};
use dc_core::{Address, ContentAddress, FileHash};
use serde::Serialize;
use tracing::{info, warn};

use crate::{unique_file_hash, StorageClient, UploadRequest};

/// Where the file content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// Raw bytes, placed in the content store by this use case.
    Bytes(Vec<u8>),
    /// Content already placed elsewhere; only its availability is confirmed.
    Existing {
        content_address: ContentAddress,
        file_size: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFileInput {
    pub file_name: String,
    pub source: ContentSource,
    /// Explicit file hash; generated from the content and time when absent.
    pub file_hash: Option<FileHash>,
    pub encryption_key: Option<String>,
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_address: Address,
    pub file_hash: FileHash,
    pub content_address: ContentAddress,
    pub locator: String,
    pub file_size: u64,
    pub is_public: bool,
}

pub struct UploadFile {
    client: Arc<StorageClient>,
    content: Arc<dyn ContentStorePort>,
    hasher: Arc<dyn ContentHashPort>,
    clock: Arc<dyn ClockPort>,
}

impl UploadFile {
    pub fn from_ports(
        client: Arc<StorageClient>,
        content: Arc<dyn ContentStorePort>,
        hasher: Arc<dyn ContentHashPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            client,
            content,
            hasher,
            clock,
        }
    }

    /// Places (or confirms) the content, then registers its metadata.
    ///
    /// # Returns / 返回值
    /// - `Ok(UploadedFile)` once the record exists, shared when requested
    /// - `Err` when hashing or placement fails (nothing registered) or the
    ///   program rejects the record; a [`ChainError`](dc_core::ChainError)
    ///   stays downcastable from the returned error
    #[tracing::instrument(
        name = "usecase.upload_file.execute",
        skip(self, input),
        fields(file_name = %input.file_name, is_public = input.is_public)
    )]
    pub async fn execute(&self, input: UploadFileInput) -> Result<UploadedFile> {
        let owner = self.client.current_identity()?;
        if !self
            .client
            .storage_exists(&owner)
            .await
            .context("Failed to check storage record")?
        {
            bail!("Storage is not initialized for {owner}; run init first");
        }

        let (file_hash, content_address, file_size) = match input.source {
            ContentSource::Bytes(bytes) => {
                let file_hash = match input.file_hash {
                    Some(hash) => hash,
                    None => self.generate_hash(&bytes)?,
                };
                let file_size = bytes.len() as u64;
                let content_address = self
                    .content
                    .place(&input.file_name, bytes)
                    .await
                    .context("Failed to place file content")?;
                info!(content_address = %content_address, file_size, "Content placed");
                (file_hash, content_address, file_size)
            }
            ContentSource::Existing {
                content_address,
                file_size,
            } => {
                let available = self
                    .content
                    .is_available(&content_address)
                    .await
                    .context("Failed to check content availability")?;
                if !available {
                    bail!("Content {content_address} is not retrievable");
                }
                let file_hash = match input.file_hash {
                    Some(hash) => hash,
                    None => self.generate_hash(content_address.as_str().as_bytes())?,
                };
                (file_hash, content_address, file_size)
            }
        };

        let file_address = self
            .client
            .upload_file(UploadRequest {
                file_hash: file_hash.clone(),
                file_name: input.file_name,
                file_size,
                content_address: content_address.clone(),
                encryption_key: input.encryption_key,
            })
            .await
            .context("Failed to register file metadata")?;

        if input.is_public {
            if let Err(err) = self.client.set_sharing(&file_hash, true).await {
                warn!(error = %err, file = %file_address, "File registered but sharing failed");
                return Err(anyhow!(err).context("File registered but could not be made public"));
            }
        }

        info!(file = %file_address, file_hash = %file_hash, "Upload complete");
        Ok(UploadedFile {
            file_address,
            locator: self.content.locator(&content_address),
            file_hash,
            content_address,
            file_size,
            is_public: input.is_public,
        })
    }

    fn generate_hash(&self, bytes: &[u8]) -> Result<FileHash> {
        let digest = self.hasher.hash_bytes(bytes)?;
        Ok(unique_file_hash(&digest, self.clock.now_ms())?)
    }
}
