//! Runtime configuration for the server and the client gateway.
//!
//! Values are layered: built-in defaults, then an optional YAML file, then
//! environment variables. Command-line flags are applied last by the CLI.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NotekeeperError, Result};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_DATABASE: &str = "notes.db";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub client: ClientConfig,
}

/// Settings for `notekeeper serve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind: String,
    /// Path of the SQLite database file
    pub database: PathBuf,
    /// Browser origin allowed to call the API, if any
    pub cors_origin: Option<String>,
    /// Default tracing filter, overridden by RUST_LOG
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            database: PathBuf::from(DEFAULT_DATABASE),
            cors_origin: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.bind
            .parse()
            .map_err(|e| NotekeeperError::Config(format!("invalid bind address '{}': {}", self.bind, e)))
    }
}

/// Settings for the client gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of a running note store
    pub base_url: String,
    /// Per-request timeout; none means wait for the transport
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load defaults, the optional YAML file, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Apply overrides from environment-style lookups.
    ///
    /// `PORT` only replaces the port of the bind address.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("NOTEKEEPER_BIND") {
            self.server.bind = bind;
        }
        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .trim()
                .parse()
                .map_err(|_| NotekeeperError::Config(format!("invalid PORT '{}'", port)))?;
            self.server.bind = with_port(&self.server.bind, port);
        }
        if let Some(database) = lookup("NOTEKEEPER_DATABASE") {
            self.server.database = PathBuf::from(database);
        }
        if let Some(origin) = lookup("NOTEKEEPER_CORS_ORIGIN") {
            self.server.cors_origin = Some(origin).filter(|o| !o.is_empty());
        }
        if let Some(level) = lookup("NOTEKEEPER_LOG") {
            self.server.log_level = level;
        }
        if let Some(url) = lookup("NOTEKEEPER_URL") {
            self.client.base_url = url;
        }
        Ok(())
    }
}

fn with_port(bind: &str, port: u16) -> String {
    match bind.rsplit_once(':') {
        Some((host, _)) => format!("{host}:{port}"),
        None => format!("{bind}:{port}"),
    }
}
