//! Server configuration types
//!
//! Configuration comes from an optional TOML file (`quartet.toml` or
//! `$QUARTET_CONFIG`) with environment overrides for the common knobs.
//! API keys are never configured here; the collaborator clients read them
//! from the environment themselves.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Command store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database path
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_db_path() -> String {
    "data/quartet.db".to_string()
}

impl AppConfig {
    /// Load configuration from disk and the environment.
    ///
    /// A missing config file is not an error; defaults apply.
    pub fn load() -> Result<Self> {
        let path = std::env::var("QUARTET_CONFIG").unwrap_or_else(|_| "quartet.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config file {path}"))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config file {path}"))?
        } else {
            Self::default()
        };

        if let Ok(port) = std::env::var("QUARTET_PORT") {
            config.server.port = port
                .parse()
                .with_context(|| format!("invalid QUARTET_PORT value '{port}'"))?;
        }
        if let Ok(db_path) = std::env::var("QUARTET_DB_PATH") {
            config.store.path = db_path;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.store.path, "data/quartet.db");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.store.path, "data/quartet.db");
    }
}
