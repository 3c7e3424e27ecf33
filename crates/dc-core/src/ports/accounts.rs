use async_trait::async_trait;

use crate::ids::Address;
use crate::ports::errors::ChainError;
use crate::records::{FileEntry, FileRecord, StorageRecord};

/// Read side of the storage program: account fetches and scans.
#[async_trait]
pub trait ProgramAccountsPort: Send + Sync {
    /// Reads the storage record at `address`; [`ChainError::NotFound`] if absent.
    async fn fetch_storage_record(&self, address: &Address) -> Result<StorageRecord, ChainError>;

    /// Reads the file record at `address`; [`ChainError::NotFound`] if absent.
    async fn fetch_file_record(&self, address: &Address) -> Result<FileRecord, ChainError>;

    /// Enumerates file records, filtered remotely by owner when one is given.
    async fn list_file_records(&self, owner: Option<Address>) -> Result<Vec<FileEntry>, ChainError>;
}
