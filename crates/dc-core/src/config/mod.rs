//! # Client configuration / 客户端配置
//!
//! Pure data: where the cluster is, which program to talk to, which keypair
//! signs, and where file content is placed and retrieved. Loading (files,
//! environment) lives in `dc-infra::config`; nothing here reads ambient state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ids::Address;
use crate::program::SYSTEM_PROGRAM_ID;

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const DEFAULT_COMMITMENT: &str = "processed";
pub const DEFAULT_GATEWAY_URL: &str = "https://ipfs.io";

/// Client configuration DTO, passed explicitly to every adapter that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    pub cluster: ClusterConfig,
    pub program: ProgramConfig,
    pub wallet: WalletConfig,
    pub content: ContentConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// JSON-RPC endpoint.
    pub rpc_url: String,
    /// Commitment used for reads, preflight and confirmation.
    pub commitment: String,
    /// Signature status polls after submission before giving up on confirmation.
    pub confirm_attempts: u32,
    pub confirm_interval_ms: u64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            commitment: DEFAULT_COMMITMENT.to_string(),
            confirm_attempts: 30,
            confirm_interval_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    pub program_id: Address,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id: crate::program::DEFAULT_PROGRAM_ID
                .parse()
                .unwrap_or(SYSTEM_PROGRAM_ID),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WalletConfig {
    /// Solana CLI keypair file (JSON array of 64 bytes).
    pub keypair_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Public gateway used to build retrieval locators.
    pub gateway_url: String,
    /// IPFS HTTP API used for placement; uploads of raw bytes need it.
    pub api_url: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            api_url: None,
        }
    }
}
