//! Configuration for the gigboard binary
//!
//! Sources, highest precedence first:
//! 1. command-line flags (applied by each command)
//! 2. environment: `DATABASE_URL`, `GIGBOARD_BIND` (a `.env` file counts)
//! 3. `~/.gigboard/config.toml`
//! 4. built-in defaults
//!
//! A missing config file is not an error.

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gigboard_server::http::server::DEFAULT_BIND_ADDR;
use gigboard_server::DEFAULT_MAX_CONNECTIONS;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/gigboard";

/// Resolved configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDR,
            cors_permissive: false,
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl AppConfig {
    /// Config file path: ~/.gigboard/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".gigboard/config.toml")
    }

    /// Load the config file, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read one config file; defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {}", path.display()))
    }

    /// Override file values with `DATABASE_URL` and `GIGBOARD_BIND`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.database.url = url;
        }

        if let Some(bind) = var("GIGBOARD_BIND").filter(|v| !v.trim().is_empty()) {
            self.server.bind = bind
                .trim()
                .parse()
                .with_context(|| format!("GIGBOARD_BIND is not a socket address: {}", bind))?;
        }

        Ok(())
    }

    /// Pretty TOML, as written by `config init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }
}
