//! # Database Handle
//!
//! Opens the `planograma.db` SQLite file, applies the embedded schema and
//! hands out repositories.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Database Lifecycle                               │
//! │                                                                         │
//! │  ServerConfig [database] section                                       │
//! │       │  path, max_connections, acquire_timeout_secs                   │
//! │       ▼                                                                 │
//! │  DbConfig::new(path).max_connections(n).acquire_timeout(t)             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config)  ── open (WAL) ── migrate ──► ready             │
//! │       │                                                                 │
//! │       ├── planograms()        one PlanogramRepository per call         │
//! │       ├── health_check()      SELECT 1, used by /health                │
//! │       ├── migration_status()  embedded vs applied, used by /health     │
//! │       ▼                                                                 │
//! │  close()  on graceful shutdown; later calls fail as ConnectionFailed   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository call borrows one pooled connection for a single statement.
//! WAL journaling lets the list page read while another session writes.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations::{self, MigrationStatus};
use crate::repository::planogram::PlanogramRepository;

/// Pool size used when the config file does not set one.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a request waits for a free connection by default.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Configuration
// =============================================================================

/// Where the catalog lives and how many connections may touch it.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/planogram/planograma.db")
///     .max_connections(8)
///     .acquire_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DbConfig {
    /// File-backed catalog with default pool settings. The file is created on
    /// first connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    /// Private in-memory catalog for tests.
    ///
    /// Every pooled connection to `:memory:` would see its own empty
    /// database, so the pool is pinned to one connection.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared handle to the catalog.
///
/// Clones share one pool. The server keeps a single `Database` in its router
/// state; there is no process-wide connection global.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the catalog and brings its schema up to date.
    ///
    /// ## Errors
    /// * `DbError::ConnectionFailed` - the file cannot be opened or created
    /// * `DbError::MigrationFailed` - the embedded schema could not be applied
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            max_connections = config.max_connections,
            "Opening planogram catalog"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            // May lose the last commit on power loss, never corrupts
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!("Connection pool ready");

        migrations::run_migrations(&pool).await?;

        Ok(Database { pool })
    }

    /// Returns the planogram repository.
    pub fn planograms(&self) -> PlanogramRepository {
        PlanogramRepository::new(self.pool.clone())
    }

    /// True when the database answers `SELECT 1`.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }

    /// Embedded versus applied migrations.
    pub async fn migration_status(&self) -> DbResult<MigrationStatus> {
        migrations::migration_status(&self.pool).await
    }

    /// Closes the pool. Called once on server shutdown.
    pub async fn close(&self) {
        info!("Closing planogram catalog");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
