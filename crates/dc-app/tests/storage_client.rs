//! End-to-end behaviour of the storage client against the in-memory program.

use std::sync::Arc;

use dc_app::{StorageClient, UploadRequest};
use dc_core::addressing;
use dc_core::{Address, ChainError, ContentAddress, FileHash, ProgramErrorCode};
use dc_infra::memory::{InMemoryProgram, MemoryWallet};

const PROGRAM: Address = Address::new([42u8; 32]);

fn owner(tag: u8) -> Address {
    Address::new([tag; 32])
}

fn client_as(program: &Arc<InMemoryProgram>, identity: Address) -> StorageClient {
    StorageClient::from_ports(
        program.clone(),
        Arc::new(MemoryWallet::new(program.clone(), Some(identity))),
        PROGRAM,
    )
}

fn request(hash: &str, size: u64) -> UploadRequest {
    UploadRequest {
        file_hash: FileHash::new(hash).unwrap(),
        file_name: format!("{hash}.txt"),
        file_size: size,
        content_address: ContentAddress::from(format!("bafy{hash}")),
        encryption_key: None,
    }
}

async fn initialized(tag: u8) -> (Arc<InMemoryProgram>, StorageClient) {
    let program = Arc::new(InMemoryProgram::new(PROGRAM));
    let client = client_as(&program, owner(tag));
    client.initialize_storage().await.unwrap();
    (program, client)
}

#[test]
fn storage_address_is_deterministic_per_owner() {
    let program = Arc::new(InMemoryProgram::new(PROGRAM));
    let client = client_as(&program, owner(1));

    let first = client.derive_storage_address(&owner(1)).unwrap();
    let second = client.derive_storage_address(&owner(1)).unwrap();
    let other = client.derive_storage_address(&owner(2)).unwrap();

    assert_eq!(first, second);
    assert_ne!(first, other);
    assert!(!first.is_on_curve());
}

#[test]
fn distinct_hashes_derive_distinct_file_addresses() {
    let program = Arc::new(InMemoryProgram::new(PROGRAM));
    let client = client_as(&program, owner(1));

    let a = client.derive_file_address(&owner(1), &FileHash::new("abc123").unwrap()).unwrap();
    let b = client.derive_file_address(&owner(1), &FileHash::new("abc124").unwrap()).unwrap();
    let other_owner = client.derive_file_address(&owner(2), &FileHash::new("abc123").unwrap()).unwrap();

    assert_ne!(a, b);
    assert_ne!(a, other_owner);
}

#[tokio::test]
async fn initialize_creates_empty_storage_record() {
    let program = Arc::new(InMemoryProgram::new(PROGRAM));
    let client = client_as(&program, owner(1));

    assert!(!client.storage_exists(&owner(1)).await.unwrap());
    let address = client.initialize_storage().await.unwrap();
    assert!(client.storage_exists(&owner(1)).await.unwrap());

    let record = client.fetch_storage_info(&owner(1)).await.unwrap();
    assert_eq!(record.owner, owner(1));
    assert_eq!(record.total_files, 0);
    assert_eq!(record.total_storage_used, 0);
    assert_eq!(address, addressing::storage_address(&owner(1), &PROGRAM).unwrap().0);
}

#[tokio::test]
async fn second_initialize_is_already_exists() {
    let (_program, client) = initialized(1).await;
    let err = client.initialize_storage().await.unwrap_err();
    assert!(err.is_already_exists());
}

#[tokio::test]
async fn fetch_storage_info_for_unknown_owner_is_not_found() {
    let program = Arc::new(InMemoryProgram::new(PROGRAM));
    let client = client_as(&program, owner(1));

    let err = client.fetch_storage_info(&owner(7)).await.unwrap_err();
    let expected = addressing::storage_address(&owner(7), &PROGRAM).unwrap().0;
    assert_eq!(err, ChainError::NotFound(expected));
}

#[tokio::test]
async fn upload_registers_private_record_and_updates_counters() {
    let (_program, client) = initialized(1).await;

    let address = client.upload_file(request("abc123", 2048)).await.unwrap();

    let files = client.list_owned_files(&owner(1)).await.unwrap();
    assert_eq!(files.len(), 1);
    let entry = &files[0];
    assert_eq!(entry.address, address);
    assert_eq!(entry.record.file_hash, "abc123");
    assert_eq!(entry.record.file_size, 2048);
    assert!(!entry.record.is_public);
    assert_eq!(entry.record.access_count, 0);

    let storage = client.fetch_storage_info(&owner(1)).await.unwrap();
    assert_eq!(storage.total_files, 1);
    assert_eq!(storage.total_storage_used, 2048);
}

#[tokio::test]
async fn duplicate_upload_is_already_exists_and_counters_unchanged() {
    let (_program, client) = initialized(1).await;
    client.upload_file(request("abc123", 10)).await.unwrap();

    let err = client.upload_file(request("abc123", 10)).await.unwrap_err();

    assert!(err.is_already_exists());
    let storage = client.fetch_storage_info(&owner(1)).await.unwrap();
    assert_eq!(storage.total_files, 1);
    assert_eq!(storage.total_storage_used, 10);
}

#[tokio::test]
async fn hashes_sharing_a_seed_prefix_collide() {
    let (_program, client) = initialized(1).await;
    let prefix = "0123456789abcdef0123456789abcdef";
    client.upload_file(request(&format!("{prefix}-first"), 1)).await.unwrap();

    let err = client
        .upload_file(request(&format!("{prefix}-second"), 1))
        .await
        .unwrap_err();
    assert!(err.is_already_exists());
}

#[tokio::test]
async fn upload_without_storage_fails_remotely() {
    let program = Arc::new(InMemoryProgram::new(PROGRAM));
    let client = client_as(&program, owner(1));

    let err = client.upload_file(request("abc123", 1)).await.unwrap_err();
    assert!(matches!(err, ChainError::Remote(_)));
}

#[tokio::test]
async fn overlong_fields_are_rejected_by_program() {
    let (_program, client) = initialized(1).await;
    let mut long_name = request("abc123", 1);
    long_name.file_name = "n".repeat(300);

    let err = client.upload_file(long_name).await.unwrap_err();
    assert_eq!(err, ChainError::Rejected(ProgramErrorCode::FileNameTooLong));
}

#[tokio::test]
async fn owned_listing_is_newest_first_and_owner_scoped() {
    let (program, alice) = initialized(1).await;
    let bob = client_as(&program, owner(2));
    bob.initialize_storage().await.unwrap();

    for hash in ["a1", "a2", "a3"] {
        alice.upload_file(request(hash, 1)).await.unwrap();
    }
    bob.upload_file(request("b1", 1)).await.unwrap();

    let files = alice.list_owned_files(&owner(1)).await.unwrap();
    assert_eq!(files.len(), 3);
    assert!(files.iter().all(|f| f.record.owner == owner(1)));
    assert!(files
        .windows(2)
        .all(|pair| pair[0].record.upload_timestamp >= pair[1].record.upload_timestamp));
    assert_eq!(files[0].record.file_hash, "a3");
}

#[tokio::test]
async fn public_listing_contains_only_public_files_newest_first() {
    let (program, alice) = initialized(1).await;
    let bob = client_as(&program, owner(2));
    bob.initialize_storage().await.unwrap();

    alice.upload_file(request("a1", 1)).await.unwrap();
    alice.upload_file(request("a2", 1)).await.unwrap();
    bob.upload_file(request("b1", 1)).await.unwrap();
    alice.set_sharing(&FileHash::new("a1").unwrap(), true).await.unwrap();
    bob.set_sharing(&FileHash::new("b1").unwrap(), true).await.unwrap();

    let files = alice.list_public_files().await.unwrap();
    let hashes: Vec<&str> = files.iter().map(|f| f.record.file_hash.as_str()).collect();
    assert_eq!(hashes, vec!["b1", "a1"]);
    assert!(files.iter().all(|f| f.record.is_public));
}

#[tokio::test]
async fn sharing_toggles_public_listing_membership() {
    let (_program, client) = initialized(1).await;
    let hash = FileHash::new("abc123").unwrap();
    client.upload_file(request("abc123", 1)).await.unwrap();

    client.set_sharing(&hash, true).await.unwrap();
    assert_eq!(client.list_public_files().await.unwrap().len(), 1);

    client.set_sharing(&hash, false).await.unwrap();
    assert!(client.list_public_files().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_removes_record_and_decrements_counters() {
    let (_program, client) = initialized(1).await;
    client.upload_file(request("keep", 5)).await.unwrap();
    client.upload_file(request("drop", 7)).await.unwrap();

    client.delete_file(&FileHash::new("drop").unwrap()).await.unwrap();

    let files = client.list_owned_files(&owner(1)).await.unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].record.file_hash, "keep");
    let storage = client.fetch_storage_info(&owner(1)).await.unwrap();
    assert_eq!(storage.total_files, 1);
    assert_eq!(storage.total_storage_used, 5);
}

#[tokio::test]
async fn other_owners_cannot_modify_files() {
    let (program, alice) = initialized(1).await;
    alice.upload_file(request("abc123", 1)).await.unwrap();
    let mallory = client_as(&program, owner(6));
    mallory.initialize_storage().await.unwrap();

    // Mallory's wallet derives the address under her own identity, which holds nothing.
    let err = mallory.delete_file(&FileHash::new("abc123").unwrap()).await.unwrap_err();
    assert!(matches!(err, ChainError::Remote(_)));
    assert_eq!(alice.list_owned_files(&owner(1)).await.unwrap().len(), 1);
}

#[tokio::test]
async fn record_download_increments_access_count() {
    let (program, alice) = initialized(1).await;
    let hash = FileHash::new("abc123").unwrap();
    alice.upload_file(request("abc123", 1)).await.unwrap();
    alice.set_sharing(&hash, true).await.unwrap();

    let reader = client_as(&program, owner(2));
    reader.record_download(&owner(1), &hash).await.unwrap();
    reader.record_download(&owner(1), &hash).await.unwrap();

    let entry = alice.get_file(&owner(1), &hash).await.unwrap();
    assert_eq!(entry.record.access_count, 2);
}
