use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Map};
use dc_core::ClientConfig;
use thiserror::Error;
use tracing::debug;

/// Prefix of environment overrides, e.g. `DCLOUD_CLUSTER__RPC_URL`.
pub const ENV_PREFIX: &str = "DCLOUD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    Missing(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

/// `<config_dir>/dcloud/config.toml`, when the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dcloud").join("config.toml"))
}

/// Loads configuration from `path` (required when given) or the default
/// location (optional), then applies environment overrides.
pub fn load_client_config(path: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    load_with_env(path, None)
}

pub(crate) fn load_with_env(
    path: Option<&Path>,
    env: Option<Map<String, String>>,
) -> Result<ClientConfig, ConfigError> {
    let mut builder = Config::builder();

    match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::Missing(path.to_path_buf()));
            }
            debug!(path = %path.display(), "Loading config file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        None => {
            if let Some(default) = default_config_path() {
                debug!(path = %default.display(), "Loading default config file if present");
                builder =
                    builder.add_source(File::from(default).format(FileFormat::Toml).required(false));
            }
        }
    }

    let environment = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .source(env);

    let config = builder.add_source(environment).build()?;
    Ok(config.try_deserialize()?)
}
