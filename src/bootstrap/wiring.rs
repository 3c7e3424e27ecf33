//! # Dependency Injection / 依赖注入模块
//!
//! Builds the concrete adapters from [`ClientConfig`] and hands them to the
//! application layer as ports. This is the only place that depends on
//! dc-infra and dc-app together; it assembles, it does not decide.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dc_app::StorageClient;
use dc_core::ports::{ClockPort, ContentHashPort, ContentStorePort, WalletPort};
use dc_core::{Address, ChainError, ClientConfig, ProgramRequest, TxSignature};
use dc_infra::ipfs::IpfsContentStore;
use dc_infra::solana::{KeypairError, KeypairWallet, RpcClient, RpcProgramAccounts};
use dc_infra::{Sha256Hasher, SystemClock};
use tracing::{debug, info};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpInit(#[from] reqwest::Error),

    #[error("wallet keypair could not be loaded: {0}")]
    Keypair(#[from] KeypairError),
}

/// Wallet used when no keypair is available: reads work, writes fail locally.
pub struct ReadOnlyWallet;

#[async_trait]
impl WalletPort for ReadOnlyWallet {
    fn current_identity(&self) -> Option<Address> {
        None
    }

    async fn sign_and_send(&self, _request: ProgramRequest) -> Result<TxSignature, ChainError> {
        Err(ChainError::precondition(
            "wallet not connected; set wallet.keypair_path",
        ))
    }
}

/// Everything the commands need, already wired.
pub struct AppServices {
    pub client: Arc<StorageClient>,
    pub content: Arc<dyn ContentStorePort>,
    pub hasher: Arc<dyn ContentHashPort>,
    pub clock: Arc<dyn ClockPort>,
}

/// Explicit keypair path, else the Solana CLI default when it exists.
fn keypair_path(config: &ClientConfig) -> Option<PathBuf> {
    config.wallet.keypair_path.clone().or_else(|| {
        dirs::home_dir()
            .map(|home| home.join(".config").join("solana").join("id.json"))
            .filter(|path| path.exists())
    })
}

pub async fn wire_services(config: &ClientConfig) -> WiringResult<AppServices> {
    let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
    let rpc = Arc::new(RpcClient::with_http(
        http.clone(),
        config.cluster.rpc_url.clone(),
        config.cluster.commitment.clone(),
    ));
    let program_id = config.program.program_id;

    let wallet: Arc<dyn WalletPort> = match keypair_path(config) {
        Some(path) => {
            let wallet = KeypairWallet::from_file(&path, rpc.clone())
                .await?
                .with_confirmation(
                    config.cluster.confirm_attempts,
                    Duration::from_millis(config.cluster.confirm_interval_ms),
                );
            info!(identity = %wallet.identity(), "Wallet loaded");
            Arc::new(wallet)
        }
        None => {
            debug!("No keypair configured, running read-only");
            Arc::new(ReadOnlyWallet)
        }
    };

    let accounts = Arc::new(RpcProgramAccounts::new(rpc, program_id));
    let client = Arc::new(StorageClient::from_ports(accounts, wallet, program_id));
    let content = Arc::new(IpfsContentStore::with_http(
        http,
        config.content.gateway_url.clone(),
        config.content.api_url.clone(),
    ));

    debug!(rpc_url = %config.cluster.rpc_url, program_id = %program_id, "Services wired");
    Ok(AppServices {
        client,
        content,
        hasher: Arc::new(Sha256Hasher),
        clock: Arc::new(SystemClock),
    })
}
