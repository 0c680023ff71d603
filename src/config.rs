//! Daemon configuration.
//!
//! Values come from three layers, highest precedence first: CLI/env
//! overrides, an optional `todod.toml` file in the working directory, and
//! built-in defaults. A missing or unparseable config file is logged and
//! defaulted, never fatal.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 4320;

pub const CONFIG_FILE: &str = "todod.toml";

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_seed() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// HTTP API port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Bind address (use 0.0.0.0 for LAN access).
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Directory of extra static files served at the router fallback.
    /// None = only the embedded index page is served.
    pub static_dir: Option<PathBuf>,
    /// Pre-populate the list with the demo items on startup.
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            static_dir: None,
            seed: default_seed(),
        }
    }
}

impl DaemonConfig {
    /// Load `todod.toml` from the working directory and apply overrides.
    pub fn new(
        port: Option<u16>,
        bind_address: Option<String>,
        static_dir: Option<PathBuf>,
    ) -> Self {
        let mut config = Self::load_file(Path::new(CONFIG_FILE));
        if let Some(port) = port {
            config.port = port;
        }
        if let Some(bind) = bind_address {
            config.bind_address = bind;
        }
        if let Some(dir) = static_dir {
            config.static_dir = Some(dir);
        }
        config
    }

    /// Read a config file, falling back to defaults when it is absent or
    /// malformed.
    pub fn load_file(path: &Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), err = %e, "could not read config file");
                return Self::default();
            }
        };
        match toml::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), err = %e, "invalid config file, using defaults");
                Self::default()
            }
        }
    }

    /// Socket address string the HTTP server binds to.
    pub fn bind(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = DaemonConfig::load_file(&dir.path().join("todod.toml"));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert!(config.seed);
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn loads_partial_file_and_defaults_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todod.toml");
        std::fs::write(&path, "port = 9090\nseed = false\n").unwrap();

        let config = DaemonConfig::load_file(&path);
        assert_eq!(config.port, 9090);
        assert!(!config.seed);
        assert_eq!(config.bind_address, "127.0.0.1");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todod.toml");
        std::fs::write(&path, "port = \"not a number").unwrap();

        let config = DaemonConfig::load_file(&path);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn bind_joins_address_and_port() {
        let config = DaemonConfig {
            port: 8000,
            bind_address: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.bind(), "0.0.0.0:8000");
    }
}
