//! Server configuration.
//!
//! Loaded from a TOML document. Every key is optional:
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 8080
//! log_filter = "info,rxrules_engine=debug"
//! ```

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use serde::{Deserialize, Serialize};

use rxrules_contracts::error::{RxError, RxResult};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind, as an IP address literal.
    pub host: String,
    /// TCP port; 0 lets the OS choose.
    pub port: u16,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `RxError::ConfigError` if the document is malformed, carries
    /// unknown keys, or names a host that is not an IP address.
    pub fn from_toml_str(s: &str) -> RxResult<Self> {
        let config: ServerConfig = toml::from_str(s).map_err(|e| RxError::ConfigError {
            reason: format!("failed to parse server config TOML: {}", e),
        })?;
        config.socket_addr()?;
        Ok(config)
    }

    /// Read and parse the TOML file at `path`.
    pub fn from_file(path: &Path) -> RxResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| RxError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn socket_addr(&self) -> RxResult<SocketAddr> {
        let ip: IpAddr = self.host.trim().parse().map_err(|_| RxError::ConfigError {
            reason: format!("host '{}' is not an IP address", self.host),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
