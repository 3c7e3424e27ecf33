//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - Merge the optional TOML file and `DCLOUD_*` environment overrides
//! - Map the result onto the [`ClientConfig`](dc_core::ClientConfig) DTO
//!
//! Missing keys fall back to the DTO's serde defaults; nothing is validated
//! here. Addresses and URLs are checked where they are used.

mod loader;

pub use loader::{default_config_path, load_client_config, ConfigError, ENV_PREFIX};
