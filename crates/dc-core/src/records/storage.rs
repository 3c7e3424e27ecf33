use serde::{Deserialize, Serialize};

use crate::ids::Address;

/// Per-owner storage record, created once by an explicit initialize request.
///
/// Counters are maintained by the program on every upload and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageRecord {
    pub owner: Address,
    pub total_files: u32,
    pub total_storage_used: u64,
    pub bump: u8,
}

impl StorageRecord {
    pub fn empty(owner: Address, bump: u8) -> Self {
        Self {
            owner,
            total_files: 0,
            total_storage_used: 0,
            bump,
        }
    }
}
