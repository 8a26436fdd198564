//! # Server Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PLANOGRAM_PORT=8080                                                │
//! │     PLANOGRAM_DB_PATH=/srv/planograma.db                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $PLANOGRAM_CONFIG, or                                              │
//! │     ~/.config/planogram-catalog/planogram.toml (Linux)                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     127.0.0.1:8080, <data dir>/planograma.db                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8080
//! max_upload_bytes = 10485760
//!
//! [database]
//! path = "/srv/planogram/planograma.db"
//! max_connections = 5
//! acquire_timeout_secs = 30
//!
//! [link]
//! host = "192.168.0.20"
//! port = 8080
//!
//! [session]
//! idle_minutes = 120
//! ```

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use planogram_core::RecordLink;
use planogram_db::DbConfig;

/// Name of the config file looked up in the platform config dir.
pub const CONFIG_FILE_NAME: &str = "planogram.toml";

/// Name of the SQLite file in the platform data dir.
pub const DATABASE_FILE_NAME: &str = "planograma.db";

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine the application data directory")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Largest accepted request body, uploads included.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings {
            bind_addr: default_bind_addr(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Database location and pool sizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. `None` means the platform data dir.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// How long a request waits for a pooled connection.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    planogram_db::pool::DEFAULT_MAX_CONNECTIONS
}

fn default_acquire_timeout_secs() -> u64 {
    planogram_db::pool::DEFAULT_ACQUIRE_TIMEOUT.as_secs()
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

/// Host and port printed into record QR codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSettings {
    #[serde(default = "default_link_host")]
    pub host: String,

    /// Falls back to the listener port.
    #[serde(default)]
    pub port: Option<u16>,
}

fn default_link_host() -> String {
    "localhost".to_string()
}

impl Default for LinkSettings {
    fn default() -> Self {
        LinkSettings {
            host: default_link_host(),
            port: None,
        }
    }
}

/// Browser session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Sessions unused for this long are dropped.
    #[serde(default = "default_idle_minutes")]
    pub idle_minutes: u32,
}

fn default_idle_minutes() -> u32 {
    120
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            idle_minutes: default_idle_minutes(),
        }
    }
}

// =============================================================================
// Server Configuration
// =============================================================================

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpSettings,

    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub link: LinkSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl ServerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`PLANOGRAM_CONFIG` or the platform config dir)
    /// 3. Environment variables
    pub fn load() -> ConfigResult<Self> {
        let env = |key: &str| std::env::var(key).ok();

        let path = env("PLANOGRAM_CONFIG")
            .map(PathBuf::from)
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading server config from file");
                Self::from_toml(&std::fs::read_to_string(&path)?)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(env)?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file body.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `PLANOGRAM_*` overrides read through `var`.
    pub fn apply_overrides<F>(&mut self, var: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = var("PLANOGRAM_BIND_ADDR") {
            self.server.bind_addr = addr;
        }

        if let Some(port) = var("PLANOGRAM_PORT") {
            self.server.port = parse_var("PLANOGRAM_PORT", &port)?;
            debug!(port = self.server.port, "Overriding port from environment");
        }

        if let Some(limit) = var("PLANOGRAM_MAX_UPLOAD_BYTES") {
            self.server.max_upload_bytes = parse_var("PLANOGRAM_MAX_UPLOAD_BYTES", &limit)?;
        }

        if let Some(path) = var("PLANOGRAM_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(max) = var("PLANOGRAM_DB_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("PLANOGRAM_DB_MAX_CONNECTIONS", &max)?;
        }

        if let Some(secs) = var("PLANOGRAM_DB_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs =
                parse_var("PLANOGRAM_DB_ACQUIRE_TIMEOUT_SECS", &secs)?;
        }

        if let Some(host) = var("PLANOGRAM_PUBLIC_HOST") {
            self.link.host = host;
        }

        if let Some(port) = var("PLANOGRAM_PUBLIC_PORT") {
            self.link.port = Some(parse_var("PLANOGRAM_PUBLIC_PORT", &port)?);
        }

        if let Some(minutes) = var("PLANOGRAM_SESSION_IDLE_MINUTES") {
            self.session.idle_minutes = parse_var("PLANOGRAM_SESSION_IDLE_MINUTES", &minutes)?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue("server.port".into()));
        }

        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue("server.max_upload_bytes".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue("database.max_connections".into()));
        }

        if self.database.acquire_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue("database.acquire_timeout_secs".into()));
        }

        if self.session.idle_minutes == 0 {
            return Err(ConfigError::InvalidValue("session.idle_minutes".into()));
        }

        if self.link.host.trim().is_empty() {
            return Err(ConfigError::InvalidValue("link.host".into()));
        }

        self.bind_address()?;
        Ok(())
    }

    /// Returns the listener address.
    pub fn bind_address(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.server.bind_addr, self.server.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("server.bind_addr".into()))
    }

    /// Returns the record link advertised in QR codes.
    pub fn record_link(&self) -> RecordLink {
        RecordLink::new(
            self.link.host.clone(),
            self.link.port.unwrap_or(self.server.port),
        )
    }

    /// Resolves the database file, creating the data dir when needed.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }

    /// Pool settings for `Database::new`.
    pub fn db_config(&self) -> ConfigResult<DbConfig> {
        Ok(DbConfig::new(self.database_path()?)
            .max_connections(self.database.max_connections)
            .acquire_timeout(Duration::from_secs(self.database.acquire_timeout_secs)))
    }

    /// Session idle timeout.
    pub fn session_idle(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.session.idle_minutes))
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "planogram", "catalog")
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> ConfigResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}
