//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variable holding the bind address.
pub const ADDR_VAR: &str = "SUBWAY_ADDR";

/// Environment variable holding the snapshot file path.
pub const SNAPSHOT_VAR: &str = "SUBWAY_SNAPSHOT";

/// Error returned when configuration values are malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var} value {value:?}: {reason}")]
pub struct ConfigError {
    var: &'static str,
    value: String,
    reason: String,
}

/// Configuration parameters for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub addr: SocketAddr,

    /// JSON file to seed the network from at startup and save it to on
    /// shutdown. `None` keeps the network in memory only.
    pub snapshot: Option<PathBuf>,
}

impl ServerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(addr: SocketAddr, snapshot: Option<PathBuf>) -> Self {
        Self { addr, snapshot }
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or empty variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ADDR_VAR).filter(|v| !v.trim().is_empty()) {
            config.addr = raw.trim().parse().map_err(|e: std::net::AddrParseError| ConfigError {
                var: ADDR_VAR,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
        }

        if let Some(raw) = lookup(SNAPSHOT_VAR).filter(|v| !v.trim().is_empty()) {
            config.snapshot = Some(PathBuf::from(raw.trim()));
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            snapshot: None,
        }
    }
}
