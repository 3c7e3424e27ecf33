use std::sync::Arc;

use async_trait::async_trait;
use dc_core::ports::{ChainError, ProgramAccountsPort};
use dc_core::program::layout::{self, FILE_ACCOUNT, OWNER_OFFSET};
use dc_core::{Address, FileEntry, FileRecord, StorageRecord};
use tracing::{debug, warn};

use super::rpc::{AccountFilter, RpcClient, RpcError};

/// Reads storage-program accounts from a live cluster.
pub struct RpcProgramAccounts {
    rpc: Arc<RpcClient>,
    program_id: Address,
}

impl RpcProgramAccounts {
    pub fn new(rpc: Arc<RpcClient>, program_id: Address) -> Self {
        Self { rpc, program_id }
    }

    async fn account_data(&self, address: &Address) -> Result<Vec<u8>, ChainError> {
        self.rpc
            .get_account_data(address)
            .await
            .map_err(remote)?
            .ok_or(ChainError::NotFound(*address))
    }
}

fn remote(err: RpcError) -> ChainError {
    ChainError::remote(err.detail())
}

#[async_trait]
impl ProgramAccountsPort for RpcProgramAccounts {
    async fn fetch_storage_record(&self, address: &Address) -> Result<StorageRecord, ChainError> {
        let data = self.account_data(address).await?;
        Ok(layout::decode_storage_record(&data)?)
    }

    async fn fetch_file_record(&self, address: &Address) -> Result<FileRecord, ChainError> {
        let data = self.account_data(address).await?;
        Ok(layout::decode_file_record(&data)?)
    }

    async fn list_file_records(&self, owner: Option<Address>) -> Result<Vec<FileEntry>, ChainError> {
        let mut filters = vec![AccountFilter::Memcmp {
            offset: 0,
            bytes: layout::account_discriminator(FILE_ACCOUNT).to_vec(),
        }];
        if let Some(owner) = owner {
            filters.push(AccountFilter::Memcmp {
                offset: OWNER_OFFSET,
                bytes: owner.as_bytes().to_vec(),
            });
        }

        let accounts = self
            .rpc
            .get_program_accounts(&self.program_id, &filters)
            .await
            .map_err(remote)?;
        debug!(count = accounts.len(), "Fetched file accounts");

        let entries = accounts
            .into_iter()
            .filter_map(|(address, data)| match layout::decode_file_record(&data) {
                Ok(record) => Some(FileEntry::new(address, record)),
                Err(err) => {
                    warn!(address = %address, error = %err, "Skipping undecodable file account");
                    None
                }
            })
            .collect();
        Ok(entries)
    }
}
