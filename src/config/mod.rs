//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `NOTIFCHECK_*` environment
//! variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `NOTIFCHECK_*` overrides on top of
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Default directory of known-genuine reference screenshots, used when a
    /// request does not name one. Default: `./data/real`.
    pub reference_dir: PathBuf,

    /// Path to the VGG16 weights file (safetensors). When absent the embedder
    /// starts in stub mode.
    pub model_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            reference_dir: PathBuf::from("./data/real"),
            model_path: None,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "NOTIFCHECK_PORT";
    const ENV_BIND_ADDR: &'static str = "NOTIFCHECK_BIND_ADDR";
    const ENV_REFERENCE_DIR: &'static str = "NOTIFCHECK_REFERENCE_DIR";
    const ENV_MODEL_PATH: &'static str = "NOTIFCHECK_MODEL_PATH";

    /// Loads configuration from environment variables (falling back to
    /// defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let reference_dir =
            Self::parse_path_from_env(Self::ENV_REFERENCE_DIR, defaults.reference_dir);
        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);

        Ok(Self {
            port,
            bind_addr,
            reference_dir,
            model_path,
        })
    }

    /// Validates paths and basic invariants (does not create directories).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reference_dir.exists() && !self.reference_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.reference_dir.clone(),
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}
