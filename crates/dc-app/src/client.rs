//! Chain client adapter: the only boundary between callers and the storage program.
//!
//! Turns intents ("initialize storage", "upload file", "list my files") into
//! addressed program requests signed by the injected wallet, and maps account
//! reads into [`FileEntry`] / [`StorageRecord`] shapes. Holds no cache: every
//! query re-fetches, and every record address is re-derived from
//! `(owner, file_hash)` on each call.

use std::sync::Arc;

use dc_core::addressing;
use dc_core::ports::{ChainError, ProgramAccountsPort, WalletPort};
use dc_core::program::{ProgramRequest, UploadFileArgs};
use dc_core::records::{sort_newest_first, FileEntry, StorageRecord};
use dc_core::{Address, ContentAddress, FileHash, TxSignature};
use tracing::{debug, info};

pub type ChainResult<T> = Result<T, ChainError>;

/// Metadata to register for a file whose content is already placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_hash: FileHash,
    pub file_name: String,
    pub file_size: u64,
    pub content_address: ContentAddress,
    pub encryption_key: Option<String>,
}

pub struct StorageClient {
    accounts: Arc<dyn ProgramAccountsPort>,
    wallet: Arc<dyn WalletPort>,
    program_id: Address,
}

impl StorageClient {
    pub fn from_ports(
        accounts: Arc<dyn ProgramAccountsPort>,
        wallet: Arc<dyn WalletPort>,
        program_id: Address,
    ) -> Self {
        Self {
            accounts,
            wallet,
            program_id,
        }
    }

    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    /// Identity of the connected wallet, or `PreconditionFailed` when disconnected.
    pub fn current_identity(&self) -> ChainResult<Address> {
        self.wallet
            .current_identity()
            .ok_or_else(|| ChainError::precondition("wallet not connected"))
    }

    pub fn derive_storage_address(&self, owner: &Address) -> ChainResult<Address> {
        let (address, _bump) = addressing::storage_address(owner, &self.program_id)?;
        Ok(address)
    }

    pub fn derive_file_address(&self, owner: &Address, file_hash: &FileHash) -> ChainResult<Address> {
        let (address, _bump) = addressing::file_address(owner, file_hash, &self.program_id)?;
        Ok(address)
    }

    /// Creates the wallet owner's storage record and returns its address.
    ///
    /// A second call surfaces as [`ChainError::AlreadyExists`].
    #[tracing::instrument(name = "client.initialize_storage", skip(self))]
    pub async fn initialize_storage(&self) -> ChainResult<Address> {
        let owner = self.current_identity()?;
        let storage = self.derive_storage_address(&owner)?;

        let request = ProgramRequest::initialize_storage(self.program_id, owner, storage);
        let signature = self.wallet.sign_and_send(request).await?;

        info!(owner = %owner, storage = %storage, signature = %signature, "Storage initialized");
        Ok(storage)
    }

    /// Reads the owner's storage record; [`ChainError::NotFound`] when uninitialized.
    #[tracing::instrument(name = "client.fetch_storage_info", skip(self), fields(owner = %owner))]
    pub async fn fetch_storage_info(&self, owner: &Address) -> ChainResult<StorageRecord> {
        let storage = self.derive_storage_address(owner)?;
        self.accounts.fetch_storage_record(&storage).await
    }

    /// `false` when the owner has no storage record; other failures propagate.
    pub async fn storage_exists(&self, owner: &Address) -> ChainResult<bool> {
        match self.fetch_storage_info(owner).await {
            Ok(_) => Ok(true),
            Err(ChainError::NotFound(_)) => {
                debug!(owner = %owner, "No storage record yet");
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Registers file metadata under the wallet owner and returns the file address.
    #[tracing::instrument(
        name = "client.upload_file",
        skip(self, request),
        fields(file_hash = %request.file_hash, file_size = request.file_size)
    )]
    pub async fn upload_file(&self, request: UploadRequest) -> ChainResult<Address> {
        let owner = self.current_identity()?;
        if request.file_name.trim().is_empty() {
            return Err(ChainError::precondition("file name is required"));
        }
        if request.content_address.is_empty() {
            return Err(ChainError::precondition("content address is required"));
        }

        let storage = self.derive_storage_address(&owner)?;
        let file = self.derive_file_address(&owner, &request.file_hash)?;

        let args = UploadFileArgs {
            file_hash: request.file_hash,
            file_name: request.file_name,
            file_size: request.file_size,
            content_address: request.content_address,
            encryption_key: request.encryption_key,
        };
        let signature = self
            .wallet
            .sign_and_send(ProgramRequest::upload_file(
                self.program_id,
                owner,
                storage,
                file,
                args,
            ))
            .await?;

        info!(file = %file, signature = %signature, "File registered");
        Ok(file)
    }

    /// Reads one file record by `(owner, file_hash)`.
    pub async fn get_file(&self, owner: &Address, file_hash: &FileHash) -> ChainResult<FileEntry> {
        let address = self.derive_file_address(owner, file_hash)?;
        let record = self.accounts.fetch_file_record(&address).await?;
        Ok(FileEntry::new(address, record))
    }

    /// All files of `owner`, most recent first.
    #[tracing::instrument(name = "client.list_owned_files", skip(self), fields(owner = %owner))]
    pub async fn list_owned_files(&self, owner: &Address) -> ChainResult<Vec<FileEntry>> {
        let mut entries = self.accounts.list_file_records(Some(*owner)).await?;
        entries.retain(|entry| entry.record.owner == *owner);
        sort_newest_first(&mut entries);

        debug!(count = entries.len(), "Listed owned files");
        Ok(entries)
    }

    /// Every public file regardless of owner, most recent first.
    ///
    /// Scans all file records and filters locally: the program offers no
    /// public-only index, so cost grows with the total record count.
    #[tracing::instrument(name = "client.list_public_files", skip(self))]
    pub async fn list_public_files(&self) -> ChainResult<Vec<FileEntry>> {
        let mut entries = self.accounts.list_file_records(None).await?;
        let scanned = entries.len();
        entries.retain(|entry| entry.record.is_public);
        sort_newest_first(&mut entries);

        debug!(scanned, public = entries.len(), "Listed public files");
        Ok(entries)
    }

    /// Toggles visibility of one of the wallet owner's files.
    #[tracing::instrument(name = "client.set_sharing", skip(self), fields(file_hash = %file_hash))]
    pub async fn set_sharing(&self, file_hash: &FileHash, is_public: bool) -> ChainResult<TxSignature> {
        let owner = self.current_identity()?;
        let file = self.derive_file_address(&owner, file_hash)?;

        let signature = self
            .wallet
            .sign_and_send(ProgramRequest::share_file(self.program_id, owner, file, is_public))
            .await?;

        info!(file = %file, is_public, "File visibility updated");
        Ok(signature)
    }

    /// Destroys one of the wallet owner's file records; the program adjusts
    /// the storage counters itself.
    #[tracing::instrument(name = "client.delete_file", skip(self), fields(file_hash = %file_hash))]
    pub async fn delete_file(&self, file_hash: &FileHash) -> ChainResult<TxSignature> {
        let owner = self.current_identity()?;
        let storage = self.derive_storage_address(&owner)?;
        let file = self.derive_file_address(&owner, file_hash)?;

        let signature = self
            .wallet
            .sign_and_send(ProgramRequest::delete_file(self.program_id, owner, storage, file))
            .await?;

        info!(file = %file, "File deleted");
        Ok(signature)
    }

    /// Records one download of `owner`'s file, signed by the wallet.
    #[tracing::instrument(name = "client.record_download", skip(self), fields(owner = %owner, file_hash = %file_hash))]
    pub async fn record_download(&self, owner: &Address, file_hash: &FileHash) -> ChainResult<TxSignature> {
        let accessor = self.current_identity()?;
        let file = self.derive_file_address(owner, file_hash)?;

        self.wallet
            .sign_and_send(ProgramRequest::download_file(
                self.program_id,
                accessor,
                file,
                file_hash.clone(),
            ))
            .await
    }
}
