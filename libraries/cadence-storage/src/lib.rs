//! Cadence Storage
//!
//! `SQLite` persistence for user playlists.
//!
//! Playlists keep a snapshot of each track as the catalog returned it, so a
//! stored playlist can be queued without another catalog round trip.
//!
//! # Architecture
//!
//! - **Vertical slicing**: the `playlists` module owns its queries
//! - **Embedded migrations**: the schema ships inside the binary
//! - **Trait seam**: [`SqlitePlaylistStore`] implements
//!   [`cadence_core::PlaylistStore`] for the server
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_core::{PlaylistStore, UserId};
//! use cadence_storage::{create_pool, run_migrations, SqlitePlaylistStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://./data/cadence.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqlitePlaylistStore::new(pool);
//! let playlists = store.list_playlists(&UserId::new("alice")).await?;
//! assert!(playlists[0].is_default);
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

pub mod playlists;

pub use context::SqlitePlaylistStore;
pub use error::{Result, StorageError};

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Call once at startup, before the pool is handed to a store.
///
/// # Errors
///
/// Returns an error if a migration fails to apply
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    debug!("Database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// The database file and its parent directory are created when missing.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://./data/cadence.db`)
///
/// # Errors
///
/// Returns an error if the URL is malformed or the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::InvalidUrl(format!("{}: {}", database_url, e)))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(30))
        .foreign_keys(true);

    if let Some(parent) = database_file(database_url).and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    info!(url = %database_url, "Database pool created");
    Ok(pool)
}

/// Filesystem path of a file-backed URL; `None` for in-memory databases
fn database_file(database_url: &str) -> Option<&Path> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or(path);

    if path.is_empty() || path.starts_with(":memory:") {
        None
    } else {
        Some(Path::new(path))
    }
}
