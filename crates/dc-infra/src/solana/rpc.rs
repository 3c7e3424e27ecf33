//! Minimal Solana JSON-RPC 2.0 client: just the methods the storage client needs.

use std::sync::atomic::{AtomicU64, Ordering};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use dc_core::Address;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("rpc transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Error object returned by the node; `logs` carries simulation logs when present.
    #[error("rpc error {code}: {message}")]
    Node {
        code: i64,
        message: String,
        logs: Vec<String>,
    },

    #[error("unexpected rpc response: {0}")]
    UnexpectedResponse(String),
}

impl RpcError {
    /// Message plus simulation logs, for error classification.
    pub fn detail(&self) -> String {
        match self {
            RpcError::Node { message, logs, .. } if !logs.is_empty() => {
                format!("{message}\n{}", logs.join("\n"))
            }
            other => other.to_string(),
        }
    }
}

/// Server-side filter for `getProgramAccounts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFilter {
    /// Account data at `offset` must equal `bytes`.
    Memcmp { offset: usize, bytes: Vec<u8> },
}

impl AccountFilter {
    fn to_json(&self) -> Value {
        match self {
            AccountFilter::Memcmp { offset, bytes } => json!({
                "memcmp": { "offset": offset, "bytes": bs58::encode(bytes).into_string() }
            }),
        }
    }
}

/// Confirmation state of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub slot: u64,
    /// Transaction error object, `None` on success.
    pub err: Option<Value>,
    pub confirmation_status: Option<String>,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    data: Option<Value>,
}

#[derive(Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Deserialize)]
struct AccountInfo {
    data: (String, String),
}

#[derive(Deserialize)]
struct KeyedAccount {
    pubkey: String,
    account: AccountInfo,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestBlockhash {
    blockhash: String,
}

pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    commitment: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, commitment: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), url, commitment)
    }

    pub fn with_http(http: reqwest::Client, url: impl Into<String>, commitment: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            commitment: commitment.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn commitment(&self) -> &str {
        &self.commitment
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        trace!(method, id, "rpc request");

        let response: RpcResponse = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            let logs = error
                .data
                .as_ref()
                .and_then(|data| data.get("logs"))
                .and_then(Value::as_array)
                .map(|logs| {
                    logs.iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            debug!(method, code = error.code, message = %error.message, "rpc error");
            return Err(RpcError::Node {
                code: error.code,
                message: error.message,
                logs,
            });
        }

        let result = response.result.unwrap_or(Value::Null);
        serde_json::from_value(result)
            .map_err(|err| RpcError::UnexpectedResponse(format!("{method}: {err}")))
    }

    /// Raw data of one account, `None` when the account does not exist.
    pub async fn get_account_data(&self, address: &Address) -> Result<Option<Vec<u8>>, RpcError> {
        let response: WithContext<Option<AccountInfo>> = self
            .call(
                "getAccountInfo",
                json!([address.to_string(), { "encoding": "base64", "commitment": self.commitment }]),
            )
            .await?;
        response.value.map(|info| decode_data(&info.data)).transpose()
    }

    /// All accounts owned by `program_id` that pass every filter.
    pub async fn get_program_accounts(
        &self,
        program_id: &Address,
        filters: &[AccountFilter],
    ) -> Result<Vec<(Address, Vec<u8>)>, RpcError> {
        let filters: Vec<Value> = filters.iter().map(AccountFilter::to_json).collect();
        let accounts: Vec<KeyedAccount> = self
            .call(
                "getProgramAccounts",
                json!([
                    program_id.to_string(),
                    { "encoding": "base64", "commitment": self.commitment, "filters": filters }
                ]),
            )
            .await?;

        accounts
            .into_iter()
            .map(|keyed| {
                let address = keyed
                    .pubkey
                    .parse::<Address>()
                    .map_err(|err| RpcError::UnexpectedResponse(err.to_string()))?;
                Ok((address, decode_data(&keyed.account.data)?))
            })
            .collect()
    }

    pub async fn get_latest_blockhash(&self) -> Result<[u8; 32], RpcError> {
        let response: WithContext<LatestBlockhash> = self
            .call("getLatestBlockhash", json!([{ "commitment": self.commitment }]))
            .await?;
        let blockhash = response
            .value
            .blockhash
            .parse::<Address>()
            .map_err(|err| RpcError::UnexpectedResponse(format!("blockhash: {err}")))?;
        Ok(blockhash.to_bytes())
    }

    /// Submits a signed wire transaction with preflight; returns its signature.
    pub async fn send_transaction(&self, wire: &[u8]) -> Result<String, RpcError> {
        self.call(
            "sendTransaction",
            json!([
                BASE64.encode(wire),
                { "encoding": "base64", "preflightCommitment": self.commitment }
            ]),
        )
        .await
    }

    pub async fn get_signature_status(&self, signature: &str) -> Result<Option<SignatureStatus>, RpcError> {
        let response: WithContext<Vec<Option<SignatureStatus>>> = self
            .call("getSignatureStatuses", json!([[signature]]))
            .await?;
        Ok(response.value.into_iter().next().flatten())
    }
}

fn decode_data((data, encoding): &(String, String)) -> Result<Vec<u8>, RpcError> {
    if encoding != "base64" {
        return Err(RpcError::UnexpectedResponse(format!("account encoding {encoding}")));
    }
    BASE64
        .decode(data)
        .map_err(|err| RpcError::UnexpectedResponse(format!("account data: {err}")))
}

/// Renders a transaction error object the way node error messages do, so
/// that custom program codes stay recognizable.
pub(crate) fn describe_transaction_error(err: &Value) -> String {
    let custom = err
        .get("InstructionError")
        .and_then(Value::as_array)
        .and_then(|parts| {
            let index = parts.first()?.as_u64()?;
            let code = parts.get(1)?.get("Custom")?.as_u64()?;
            Some((index, code))
        });
    match custom {
        Some((index, code)) => {
            format!("Error processing Instruction {index}: custom program error: 0x{code:x}")
        }
        None => err.to_string(),
    }
}
