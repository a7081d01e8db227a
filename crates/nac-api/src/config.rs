//! Server configuration from the environment.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_RANKING_PROFILE: &str = "balanced";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (`NAC_ADDR`)
    pub addr: SocketAddr,
    /// Directory holding the catalog files (`NAC_DATA_DIR`)
    pub data_dir: PathBuf,
    /// Ranking profile name (`NAC_RANKING_PROFILE`)
    pub ranking_profile: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = read_addr_with_default("NAC_ADDR", DEFAULT_ADDR)?;
        let data_dir = read_optional("NAC_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let ranking_profile =
            read_optional("NAC_RANKING_PROFILE").unwrap_or_else(|| DEFAULT_RANKING_PROFILE.to_string());

        Ok(Self {
            addr,
            data_dir,
            ranking_profile,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8787)),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            ranking_profile: DEFAULT_RANKING_PROFILE.to_string(),
        }
    }
}

fn read_addr_with_default(key: &str, default: &str) -> Result<SocketAddr, ConfigError> {
    let value = read_optional(key).unwrap_or_else(|| default.to_string());
    value
        .parse::<SocketAddr>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
