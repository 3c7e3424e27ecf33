use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::ids::{Address, ContentAddress};

/// Metadata of one uploaded file. The bytes live in the content-addressed store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    pub owner: Address,
    /// Stored verbatim; records written by other clients may not satisfy
    /// [`FileHash`](crate::ids::FileHash) validation.
    pub file_hash: String,
    pub file_name: String,
    pub file_size: u64,
    pub content_address: ContentAddress,
    pub encryption_key: Option<String>,
    /// Unix seconds, set by the program.
    pub upload_timestamp: i64,
    pub is_public: bool,
    pub access_count: u64,
    pub bump: u8,
}

/// A file record together with the address it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub address: Address,
    #[serde(flatten)]
    pub record: FileRecord,
}

impl FileEntry {
    pub fn new(address: Address, record: FileRecord) -> Self {
        Self { address, record }
    }
}

/// Orders entries most recent first. Stable, so equal timestamps keep fetch order.
pub fn sort_newest_first(entries: &mut [FileEntry]) {
    entries.sort_by_key(|entry| Reverse(entry.record.upload_timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tag: u8, timestamp: i64) -> FileEntry {
        FileEntry::new(
            Address::new([tag; 32]),
            FileRecord {
                owner: Address::new([1; 32]),
                file_hash: format!("hash-{tag}"),
                file_name: format!("file-{tag}.txt"),
                file_size: 10,
                content_address: ContentAddress::from("bafy"),
                encryption_key: None,
                upload_timestamp: timestamp,
                is_public: false,
                access_count: 0,
                bump: 255,
            },
        )
    }

    #[test]
    fn test_sort_newest_first() {
        let mut entries = vec![entry(1, 100), entry(2, 300), entry(3, 200)];
        sort_newest_first(&mut entries);
        let timestamps: Vec<i64> = entries.iter().map(|e| e.record.upload_timestamp).collect();
        assert_eq!(timestamps, vec![300, 200, 100]);
    }

    #[test]
    fn test_sort_keeps_fetch_order_for_ties() {
        let mut entries = vec![entry(1, 100), entry(2, 100)];
        sort_newest_first(&mut entries);
        assert_eq!(entries[0].record.file_hash, "hash-1");
        assert_eq!(entries[1].record.file_hash, "hash-2");
    }

    #[test]
    fn test_entry_serializes_flat_camel_case() {
        let json = serde_json::to_value(entry(4, 42)).unwrap();
        assert_eq!(json["uploadTimestamp"], 42);
        assert_eq!(json["fileName"], "file-4.txt");
        assert!(json.get("record").is_none());
        assert!(json["address"].is_string());
    }
}
