//! Byte layout of the program's accounts.
//!
//! ```text
//! StorageAccount: disc(8) owner(32) total_files(u32) total_storage_used(u64) bump(u8)
//! FileAccount:    disc(8) owner(32) file_hash(str) file_name(str) file_size(u64)
//!                 ipfs_hash(str) encryption_key(option<str>) upload_timestamp(i64)
//!                 is_public(bool) access_count(u64) bump(u8)
//! ```
//!
//! Accounts may be allocated larger than their content; trailing bytes are ignored.

use thiserror::Error;

use super::wire::{self, Reader};
use super::{discriminator, DISCRIMINATOR_LEN};
use crate::ids::ContentAddress;
use crate::records::{FileRecord, StorageRecord};

pub const STORAGE_ACCOUNT: &str = "StorageAccount";
pub const FILE_ACCOUNT: &str = "FileAccount";

/// Byte offset of the `owner` field in both account kinds.
pub const OWNER_OFFSET: usize = DISCRIMINATOR_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("account data is not a {expected}")]
    DiscriminatorMismatch { expected: &'static str },

    #[error("unexpected end of data reading {field}: needed {needed} bytes, {remaining} left")]
    UnexpectedEnd {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("invalid bool byte {value} in {field}")]
    InvalidBool { field: &'static str, value: u8 },

    #[error("invalid option tag {value} in {field}")]
    InvalidOptionTag { field: &'static str, value: u8 },
}

pub fn account_discriminator(name: &str) -> [u8; DISCRIMINATOR_LEN] {
    discriminator("account", name)
}

fn expect_discriminator(reader: &mut Reader<'_>, name: &'static str) -> Result<(), LayoutError> {
    let found = reader.bytes(DISCRIMINATOR_LEN, "discriminator")?;
    if found != account_discriminator(name) {
        return Err(LayoutError::DiscriminatorMismatch { expected: name });
    }
    Ok(())
}

pub fn decode_storage_record(data: &[u8]) -> Result<StorageRecord, LayoutError> {
    let mut reader = Reader::new(data);
    expect_discriminator(&mut reader, STORAGE_ACCOUNT)?;
    Ok(StorageRecord {
        owner: reader.address("owner")?,
        total_files: reader.u32("total_files")?,
        total_storage_used: reader.u64("total_storage_used")?,
        bump: reader.u8("bump")?,
    })
}

pub fn decode_file_record(data: &[u8]) -> Result<FileRecord, LayoutError> {
    let mut reader = Reader::new(data);
    expect_discriminator(&mut reader, FILE_ACCOUNT)?;
    Ok(FileRecord {
        owner: reader.address("owner")?,
        file_hash: reader.string("file_hash")?,
        file_name: reader.string("file_name")?,
        file_size: reader.u64("file_size")?,
        content_address: ContentAddress::new(reader.string("ipfs_hash")?),
        encryption_key: reader.option_string("encryption_key")?,
        upload_timestamp: reader.i64("upload_timestamp")?,
        is_public: reader.bool("is_public")?,
        access_count: reader.u64("access_count")?,
        bump: reader.u8("bump")?,
    })
}

pub fn encode_storage_record(record: &StorageRecord) -> Vec<u8> {
    let mut out = Vec::with_capacity(DISCRIMINATOR_LEN + 32 + 4 + 8 + 1);
    out.extend_from_slice(&account_discriminator(STORAGE_ACCOUNT));
    wire::put_address(&mut out, &record.owner);
    out.extend_from_slice(&record.total_files.to_le_bytes());
    out.extend_from_slice(&record.total_storage_used.to_le_bytes());
    out.push(record.bump);
    out
}

pub fn encode_file_record(record: &FileRecord) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&account_discriminator(FILE_ACCOUNT));
    wire::put_address(&mut out, &record.owner);
    wire::put_string(&mut out, &record.file_hash);
    wire::put_string(&mut out, &record.file_name);
    out.extend_from_slice(&record.file_size.to_le_bytes());
    wire::put_string(&mut out, record.content_address.as_str());
    wire::put_option_string(&mut out, record.encryption_key.as_deref());
    out.extend_from_slice(&record.upload_timestamp.to_le_bytes());
    wire::put_bool(&mut out, record.is_public);
    out.extend_from_slice(&record.access_count.to_le_bytes());
    out.push(record.bump);
    out
}
