//! RPC account reader and keypair wallet against a mocked JSON-RPC node.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use dc_core::ports::{ProgramAccountsPort, WalletPort};
use dc_core::program::layout;
use dc_core::{Address, ChainError, ContentAddress, FileRecord, ProgramErrorCode, ProgramRequest, StorageRecord};
use dc_infra::solana::{KeypairWallet, RpcClient, RpcProgramAccounts};
use ed25519_dalek::SigningKey;
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{json, Value};

const PROGRAM: Address = Address::new([42u8; 32]);

fn rpc_result(result: Value) -> String {
    json!({ "jsonrpc": "2.0", "id": 1, "result": result }).to_string()
}

fn rpc_error(message: &str, logs: &[&str]) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": { "code": -32002, "message": message, "data": { "logs": logs } }
    })
    .to_string()
}

async fn mock_method(server: &mut ServerGuard, method: &str, body: String) -> mockito::Mock {
    server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "method": method })))
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

fn rpc_for(server: &ServerGuard) -> Arc<RpcClient> {
    Arc::new(RpcClient::new(server.url(), "processed"))
}

fn file_record(owner: Address) -> FileRecord {
    FileRecord {
        owner,
        file_hash: "abc123".into(),
        file_name: "a.txt".into(),
        file_size: 2048,
        content_address: ContentAddress::from("bafyabc"),
        encryption_key: None,
        upload_timestamp: 1_700_000_000,
        is_public: true,
        access_count: 3,
        bump: 254,
    }
}

#[tokio::test]
async fn missing_account_is_not_found() {
    let mut server = Server::new_async().await;
    let _mock = mock_method(
        &mut server,
        "getAccountInfo",
        rpc_result(json!({ "context": { "slot": 1 }, "value": null })),
    )
    .await;

    let accounts = RpcProgramAccounts::new(rpc_for(&server), PROGRAM);
    let address = Address::new([3u8; 32]);
    let err = accounts.fetch_storage_record(&address).await.unwrap_err();
    assert_eq!(err, ChainError::NotFound(address));
}

#[tokio::test]
async fn storage_account_is_decoded() {
    let owner = Address::new([1u8; 32]);
    let record = StorageRecord {
        owner,
        total_files: 2,
        total_storage_used: 4096,
        bump: 253,
    };
    let data = BASE64.encode(layout::encode_storage_record(&record));

    let mut server = Server::new_async().await;
    let _mock = mock_method(
        &mut server,
        "getAccountInfo",
        rpc_result(json!({
            "context": { "slot": 1 },
            "value": { "data": [data, "base64"], "lamports": 1, "owner": PROGRAM.to_string(), "executable": false }
        })),
    )
    .await;

    let accounts = RpcProgramAccounts::new(rpc_for(&server), PROGRAM);
    let fetched = accounts
        .fetch_storage_record(&Address::new([3u8; 32]))
        .await
        .unwrap();
    assert_eq!(fetched, record);
}

#[tokio::test]
async fn owned_listing_filters_by_owner_and_skips_garbage() {
    let owner = Address::new([1u8; 32]);
    let good = BASE64.encode(layout::encode_file_record(&file_record(owner)));
    let garbage = BASE64.encode([0u8; 12]);

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({ "method": "getProgramAccounts" })),
            Matcher::Regex(owner.to_string()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(rpc_result(json!([
            { "pubkey": Address::new([5u8; 32]).to_string(), "account": { "data": [good, "base64"] } },
            { "pubkey": Address::new([6u8; 32]).to_string(), "account": { "data": [garbage, "base64"] } }
        ])))
        .create_async()
        .await;

    let accounts = RpcProgramAccounts::new(rpc_for(&server), PROGRAM);
    let entries = accounts.list_file_records(Some(owner)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].address, Address::new([5u8; 32]));
    assert_eq!(entries[0].record, file_record(owner));
}

fn wallet(server: &ServerGuard, attempts: u32) -> (KeypairWallet, Address) {
    let key = SigningKey::from_bytes(&[7u8; 32]);
    let wallet = KeypairWallet::from_bytes(&key.to_keypair_bytes(), rpc_for(server))
        .unwrap()
        .with_confirmation(attempts, Duration::from_millis(1));
    let identity = *wallet.identity();
    (wallet, identity)
}

fn initialize_request(user: Address) -> ProgramRequest {
    ProgramRequest::initialize_storage(PROGRAM, user, Address::new([4u8; 32]))
}

async fn mock_blockhash(server: &mut ServerGuard) -> mockito::Mock {
    mock_method(
        server,
        "getLatestBlockhash",
        rpc_result(json!({
            "context": { "slot": 1 },
            "value": { "blockhash": "11111111111111111111111111111111", "lastValidBlockHeight": 10 }
        })),
    )
    .await
}

#[tokio::test]
async fn send_submits_and_waits_for_confirmation() {
    let mut server = Server::new_async().await;
    let _blockhash = mock_blockhash(&mut server).await;
    let send = mock_method(&mut server, "sendTransaction", rpc_result(json!("5ignature"))).await;
    let _mock = mock_method(
        &mut server,
        "getSignatureStatuses",
        rpc_result(json!({
            "context": { "slot": 2 },
            "value": [{ "slot": 2, "confirmations": 0, "err": null, "confirmationStatus": "processed" }]
        })),
    )
    .await;

    let (wallet, identity) = wallet(&server, 3);
    let signature = wallet.sign_and_send(initialize_request(identity)).await.unwrap();

    send.assert_async().await;
    assert_eq!(signature.as_str(), "5ignature");
}

#[tokio::test]
async fn simulation_collision_is_already_exists() {
    let mut server = Server::new_async().await;
    let _blockhash = mock_blockhash(&mut server).await;
    let _mock = mock_method(
        &mut server,
        "sendTransaction",
        rpc_error(
            "Transaction simulation failed: Error processing Instruction 0: custom program error: 0x0",
            &["Allocate: account Address { address: X, base: None } already in use"],
        ),
    )
    .await;

    let (wallet, identity) = wallet(&server, 3);
    let err = wallet.sign_and_send(initialize_request(identity)).await.unwrap_err();
    assert!(err.is_already_exists());
}

#[tokio::test]
async fn failed_transaction_status_decodes_program_error() {
    let mut server = Server::new_async().await;
    let _blockhash = mock_blockhash(&mut server).await;
    let _send = mock_method(&mut server, "sendTransaction", rpc_result(json!("5ignature"))).await;
    let _mock = mock_method(
        &mut server,
        "getSignatureStatuses",
        rpc_result(json!({
            "context": { "slot": 2 },
            "value": [{
                "slot": 2,
                "err": { "InstructionError": [0, { "Custom": 6004 }] },
                "confirmationStatus": "processed"
            }]
        })),
    )
    .await;

    let (wallet, identity) = wallet(&server, 3);
    let err = wallet.sign_and_send(initialize_request(identity)).await.unwrap_err();
    assert_eq!(err, ChainError::Rejected(ProgramErrorCode::UnauthorizedAccess));
}

#[tokio::test]
async fn unconfirmed_transaction_times_out_without_resubmitting() {
    let mut server = Server::new_async().await;
    let _blockhash = mock_blockhash(&mut server).await;
    let send = mock_method(&mut server, "sendTransaction", rpc_result(json!("5ignature"))).await;
    let statuses = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({ "method": "getSignatureStatuses" })))
        .with_header("content-type", "application/json")
        .with_body(rpc_result(json!({ "context": { "slot": 2 }, "value": [null] })))
        .expect(2)
        .create_async()
        .await;

    let (wallet, identity) = wallet(&server, 2);
    let err = wallet.sign_and_send(initialize_request(identity)).await.unwrap_err();

    assert!(matches!(err, ChainError::Remote(ref detail) if detail.contains("not confirmed")));
    send.assert_async().await;
    statuses.assert_async().await;
}

#[tokio::test]
async fn keypair_file_is_loaded() {
    let key = SigningKey::from_bytes(&[9u8; 32]);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("id.json");
    std::fs::write(&path, serde_json::to_string(&key.to_keypair_bytes().to_vec()).unwrap()).unwrap();

    let rpc = Arc::new(RpcClient::new("http://127.0.0.1:1", "processed"));
    let wallet = KeypairWallet::from_file(&path, rpc).await.unwrap();
    assert_eq!(wallet.identity().as_bytes(), key.verifying_key().as_bytes());
    assert_eq!(wallet.current_identity(), Some(*wallet.identity()));
}
