//! # Configuration Loader / 配置加载器
//!
//! Thin wrapper over `dc_infra::config`: attaches context for the CLI and
//! renders the effective configuration for `dcloud config show`.

use std::path::Path;

use anyhow::{Context, Result};
use dc_core::ClientConfig;

pub fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    dc_infra::config::load_client_config(path).with_context(|| match path {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })
}

pub fn render_config(config: &ClientConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render config as TOML")
}
