use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use dc_core::addressing;
use dc_core::ports::{ChainError, ProgramAccountsPort};
use dc_core::program::layout::{self, FILE_ACCOUNT};
use dc_core::program::{ProgramInstruction, ProgramRequest, UploadFileArgs, DISCRIMINATOR_LEN};
use dc_core::{Address, FileEntry, FileHash, FileRecord, ProgramErrorCode, StorageRecord, TxSignature};
use tracing::debug;

pub const MAX_FILE_HASH_LEN: usize = 64;
pub const MAX_FILE_NAME_LEN: usize = 256;
pub const MAX_CONTENT_ADDRESS_LEN: usize = 128;

/// First upload timestamp handed out by the logical clock (unix seconds).
const GENESIS_TIMESTAMP: i64 = 1_700_000_000;

struct ProgramState {
    accounts: BTreeMap<Address, Vec<u8>>,
    clock: i64,
    transactions: u64,
}

/// The storage program, executed in process.
///
/// Each upload advances a logical clock by one second so listings have a
/// deterministic order.
pub struct InMemoryProgram {
    program_id: Address,
    state: Mutex<ProgramState>,
}

fn not_initialized(address: &Address) -> ChainError {
    ChainError::remote(format!(
        "AnchorError caused by account: {address}. Error Code: AccountNotInitialized"
    ))
}

fn seeds_violation(address: &Address) -> ChainError {
    ChainError::remote(format!(
        "AnchorError caused by account: {address}. Error Code: ConstraintSeeds"
    ))
}

fn already_in_use(address: &Address) -> ChainError {
    ChainError::from_remote_detail(&format!(
        "Allocate: account Address {{ address: {address}, base: None }} already in use"
    ))
}

fn required_account(request: &ProgramRequest, index: usize) -> Result<Address, ChainError> {
    request
        .account(index)
        .copied()
        .ok_or_else(|| ChainError::remote("Error Code: AccountNotEnoughKeys"))
}

impl InMemoryProgram {
    pub fn new(program_id: Address) -> Self {
        Self {
            program_id,
            state: Mutex::new(ProgramState {
                accounts: BTreeMap::new(),
                clock: GENESIS_TIMESTAMP,
                transactions: 0,
            }),
        }
    }

    pub fn program_id(&self) -> &Address {
        &self.program_id
    }

    /// Accepted transactions so far.
    pub fn transaction_count(&self) -> u64 {
        self.state.lock().map(|state| state.transactions).unwrap_or_default()
    }

    fn state(&self) -> Result<MutexGuard<'_, ProgramState>, ChainError> {
        self.state
            .lock()
            .map_err(|_| ChainError::remote("in-memory program state poisoned"))
    }

    /// Applies `request` as signed by `signer`. State changes only on success.
    pub fn execute(&self, signer: Address, request: ProgramRequest) -> Result<TxSignature, ChainError> {
        if request.program_id != self.program_id {
            return Err(ChainError::remote(format!(
                "Attempt to load a program that does not exist: {}",
                request.program_id
            )));
        }
        if request.user() != Some(&signer) {
            return Err(ChainError::remote("missing required signature for instruction"));
        }

        let mut state = self.state()?;
        match &request.instruction {
            ProgramInstruction::InitializeStorage => {
                self.initialize_storage(&mut state, signer, required_account(&request, 1)?)?
            }
            ProgramInstruction::UploadFile(args) => self.upload_file(
                &mut state,
                signer,
                required_account(&request, 1)?,
                required_account(&request, 2)?,
                args,
            )?,
            ProgramInstruction::DownloadFile { file_hash } => {
                self.download_file(&mut state, signer, required_account(&request, 1)?, file_hash)?
            }
            ProgramInstruction::DeleteFile => self.delete_file(
                &mut state,
                signer,
                required_account(&request, 1)?,
                required_account(&request, 2)?,
            )?,
            ProgramInstruction::ShareFile { is_public } => {
                self.share_file(&mut state, signer, required_account(&request, 1)?, *is_public)?
            }
        }

        state.transactions += 1;
        debug!(instruction = request.instruction.name(), signer = %signer, "In-memory transaction applied");
        Ok(TxSignature::new(format!("memtx{:08}", state.transactions)))
    }

    fn initialize_storage(
        &self,
        state: &mut ProgramState,
        user: Address,
        storage: Address,
    ) -> Result<(), ChainError> {
        let (expected, bump) = addressing::storage_address(&user, &self.program_id)?;
        if storage != expected {
            return Err(seeds_violation(&storage));
        }
        if state.accounts.contains_key(&storage) {
            return Err(already_in_use(&storage));
        }
        let record = StorageRecord::empty(user, bump);
        state.accounts.insert(storage, layout::encode_storage_record(&record));
        Ok(())
    }

    fn upload_file(
        &self,
        state: &mut ProgramState,
        user: Address,
        storage: Address,
        file: Address,
        args: &UploadFileArgs,
    ) -> Result<(), ChainError> {
        if args.file_hash.as_str().len() > MAX_FILE_HASH_LEN {
            return Err(ChainError::Rejected(ProgramErrorCode::FileHashTooLong));
        }
        if args.file_name.len() > MAX_FILE_NAME_LEN {
            return Err(ChainError::Rejected(ProgramErrorCode::FileNameTooLong));
        }
        if args.content_address.as_str().len() > MAX_CONTENT_ADDRESS_LEN {
            return Err(ChainError::Rejected(ProgramErrorCode::IpfsHashTooLong));
        }
        if args.file_size == 0 {
            return Err(ChainError::Rejected(ProgramErrorCode::InvalidFileSize));
        }

        let mut storage_record = self.storage_record(state, &user, &storage)?;
        let (expected, bump) = addressing::file_address(&user, &args.file_hash, &self.program_id)?;
        if file != expected {
            return Err(seeds_violation(&file));
        }
        if state.accounts.contains_key(&file) {
            return Err(already_in_use(&file));
        }

        state.clock += 1;
        let record = FileRecord {
            owner: user,
            file_hash: args.file_hash.as_str().to_string(),
            file_name: args.file_name.clone(),
            file_size: args.file_size,
            content_address: args.content_address.clone(),
            encryption_key: args.encryption_key.clone(),
            upload_timestamp: state.clock,
            is_public: false,
            access_count: 0,
            bump,
        };
        storage_record.total_files = storage_record.total_files.saturating_add(1);
        storage_record.total_storage_used = storage_record
            .total_storage_used
            .saturating_add(args.file_size);

        state.accounts.insert(file, layout::encode_file_record(&record));
        state
            .accounts
            .insert(storage, layout::encode_storage_record(&storage_record));
        Ok(())
    }

    fn download_file(
        &self,
        state: &mut ProgramState,
        user: Address,
        file: Address,
        file_hash: &FileHash,
    ) -> Result<(), ChainError> {
        let mut record = self.file_record(state, &file)?;
        let (expected, _) = addressing::file_address(&record.owner, file_hash, &self.program_id)?;
        if file != expected {
            return Err(seeds_violation(&file));
        }
        if !record.is_public && record.owner != user {
            return Err(ChainError::Rejected(ProgramErrorCode::UnauthorizedAccess));
        }

        record.access_count = record.access_count.saturating_add(1);
        state.accounts.insert(file, layout::encode_file_record(&record));
        Ok(())
    }

    fn delete_file(
        &self,
        state: &mut ProgramState,
        user: Address,
        storage: Address,
        file: Address,
    ) -> Result<(), ChainError> {
        let record = self.file_record(state, &file)?;
        if record.owner != user {
            return Err(ChainError::Rejected(ProgramErrorCode::UnauthorizedAccess));
        }
        let mut storage_record = self.storage_record(state, &user, &storage)?;

        storage_record.total_files = storage_record.total_files.saturating_sub(1);
        storage_record.total_storage_used = storage_record
            .total_storage_used
            .saturating_sub(record.file_size);

        state.accounts.remove(&file);
        state
            .accounts
            .insert(storage, layout::encode_storage_record(&storage_record));
        Ok(())
    }

    fn share_file(
        &self,
        state: &mut ProgramState,
        user: Address,
        file: Address,
        is_public: bool,
    ) -> Result<(), ChainError> {
        let mut record = self.file_record(state, &file)?;
        if record.owner != user {
            return Err(ChainError::Rejected(ProgramErrorCode::UnauthorizedAccess));
        }
        record.is_public = is_public;
        state.accounts.insert(file, layout::encode_file_record(&record));
        Ok(())
    }

    fn storage_record(
        &self,
        state: &ProgramState,
        user: &Address,
        storage: &Address,
    ) -> Result<StorageRecord, ChainError> {
        let (expected, _) = addressing::storage_address(user, &self.program_id)?;
        if *storage != expected {
            return Err(seeds_violation(storage));
        }
        let data = state
            .accounts
            .get(storage)
            .ok_or_else(|| not_initialized(storage))?;
        Ok(layout::decode_storage_record(data)?)
    }

    fn file_record(&self, state: &ProgramState, file: &Address) -> Result<FileRecord, ChainError> {
        let data = state.accounts.get(file).ok_or_else(|| not_initialized(file))?;
        Ok(layout::decode_file_record(data)?)
    }
}

#[async_trait]
impl ProgramAccountsPort for InMemoryProgram {
    async fn fetch_storage_record(&self, address: &Address) -> Result<StorageRecord, ChainError> {
        let state = self.state()?;
        let data = state
            .accounts
            .get(address)
            .ok_or(ChainError::NotFound(*address))?;
        Ok(layout::decode_storage_record(data)?)
    }

    async fn fetch_file_record(&self, address: &Address) -> Result<FileRecord, ChainError> {
        let state = self.state()?;
        let data = state
            .accounts
            .get(address)
            .ok_or(ChainError::NotFound(*address))?;
        Ok(layout::decode_file_record(data)?)
    }

    async fn list_file_records(&self, owner: Option<Address>) -> Result<Vec<FileEntry>, ChainError> {
        let discriminator = layout::account_discriminator(FILE_ACCOUNT);
        let state = self.state()?;

        state
            .accounts
            .iter()
            .filter(|(_, data)| data.starts_with(&discriminator))
            .filter(|(_, data)| match &owner {
                Some(owner) => {
                    data.get(DISCRIMINATOR_LEN..DISCRIMINATOR_LEN + 32) == Some(owner.as_bytes().as_slice())
                }
                None => true,
            })
            .map(|(address, data)| -> Result<FileEntry, ChainError> {
                Ok(FileEntry::new(*address, layout::decode_file_record(data)?))
            })
            .collect()
    }
}
