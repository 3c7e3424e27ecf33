//! Wallet backed by a local Solana CLI keypair file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dc_core::ports::{ChainError, WalletPort};
use dc_core::program::ProgramRequest;
use dc_core::{Address, TxSignature};
use ed25519_dalek::{Signer, SigningKey};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::rpc::{describe_transaction_error, RpcClient};
use super::transaction::{compile_message, serialize_transaction};

const KEYPAIR_LEN: usize = 64;

#[derive(Debug, Error)]
pub enum KeypairError {
    #[error("failed to read keypair file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("keypair file is not a JSON byte array: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("keypair must be 64 bytes, got {0}")]
    InvalidLength(usize),

    #[error("keypair public half does not match its secret")]
    Mismatch,
}

pub struct KeypairWallet {
    signing_key: SigningKey,
    identity: Address,
    rpc: Arc<RpcClient>,
    confirm_attempts: u32,
    confirm_interval: Duration,
}

impl KeypairWallet {
    /// `bytes` is the 64-byte secret-then-public layout of Solana keypair files.
    pub fn from_bytes(bytes: &[u8], rpc: Arc<RpcClient>) -> Result<Self, KeypairError> {
        let bytes: &[u8; KEYPAIR_LEN] = bytes
            .try_into()
            .map_err(|_| KeypairError::InvalidLength(bytes.len()))?;
        let signing_key = SigningKey::from_keypair_bytes(bytes).map_err(|_| KeypairError::Mismatch)?;
        let identity = Address::new(signing_key.verifying_key().to_bytes());

        Ok(Self {
            signing_key,
            identity,
            rpc,
            confirm_attempts: 30,
            confirm_interval: Duration::from_millis(500),
        })
    }

    pub async fn from_file(path: &Path, rpc: Arc<RpcClient>) -> Result<Self, KeypairError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| KeypairError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let bytes: Vec<u8> = serde_json::from_str(&content)?;
        Self::from_bytes(&bytes, rpc)
    }

    pub fn with_confirmation(mut self, attempts: u32, interval: Duration) -> Self {
        self.confirm_attempts = attempts;
        self.confirm_interval = interval;
        self
    }

    pub fn identity(&self) -> &Address {
        &self.identity
    }

    /// Polls signature status until the configured commitment is reached.
    ///
    /// Observes the one submission; it never resubmits.
    async fn confirm(&self, signature: &str) -> Result<(), ChainError> {
        let target = commitment_rank(self.rpc.commitment());

        for attempt in 1..=self.confirm_attempts {
            let status = self
                .rpc
                .get_signature_status(signature)
                .await
                .map_err(|err| ChainError::remote(err.detail()))?;

            if let Some(status) = status {
                if let Some(err) = status.err {
                    return Err(ChainError::from_remote_detail(&describe_transaction_error(&err)));
                }
                let reached = status
                    .confirmation_status
                    .as_deref()
                    .map_or(2, commitment_rank);
                if reached >= target {
                    debug!(attempt, slot = status.slot, "Transaction confirmed");
                    return Ok(());
                }
            }
            tokio::time::sleep(self.confirm_interval).await;
        }

        warn!(signature, attempts = self.confirm_attempts, "Confirmation timed out");
        Err(ChainError::remote(format!(
            "transaction {signature} not confirmed after {} status checks",
            self.confirm_attempts
        )))
    }
}

fn commitment_rank(commitment: &str) -> u8 {
    match commitment {
        "finalized" => 2,
        "confirmed" => 1,
        _ => 0,
    }
}

#[async_trait]
impl WalletPort for KeypairWallet {
    fn current_identity(&self) -> Option<Address> {
        Some(self.identity)
    }

    #[tracing::instrument(
        name = "wallet.sign_and_send",
        skip(self, request),
        fields(instruction = request.instruction.name())
    )]
    async fn sign_and_send(&self, request: ProgramRequest) -> Result<TxSignature, ChainError> {
        if request.user() != Some(&self.identity) {
            return Err(ChainError::precondition("request is not signed by this wallet"));
        }

        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|err| ChainError::remote(err.detail()))?;
        let message = compile_message(&self.identity, &request, blockhash)
            .map_err(|err| ChainError::precondition(err.to_string()))?;
        let signature = self.signing_key.sign(&message).to_bytes();
        let wire = serialize_transaction(&[signature], &message);

        let signature = self
            .rpc
            .send_transaction(&wire)
            .await
            .map_err(|err| ChainError::from_remote_detail(&err.detail()))?;
        self.confirm(&signature).await?;

        info!(signature = %signature, "Transaction confirmed");
        Ok(TxSignature::from(signature))
    }
}
