use crate::domain::ports::ReservationStoreBox;
use crate::error::Result;
use crate::infrastructure::in_memory::InMemoryReservationStore;
use crate::infrastructure::sqlite::SqliteReservationStore;
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

pub const DEFAULT_DB_PATH: &str = "tripbook.db";

/// Where reservations are kept. The only configuration the tool has.
#[derive(Args, Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file (created if missing)
    #[arg(long, global = true, env = "TRIPBOOK_DB", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Keep reservations in memory only; ignores --db-path
    #[arg(long, global = true)]
    pub in_memory: bool,
}

impl StoreConfig {
    pub fn with_db_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: path.into(),
            in_memory: false,
        }
    }

    /// Builds the configured store adapter.
    pub async fn open_store(&self) -> Result<ReservationStoreBox> {
        if self.in_memory {
            debug!("using in-memory store");
            return Ok(Box::new(InMemoryReservationStore::new()));
        }

        debug!(path = %self.db_path.display(), "using SQLite store");
        let store = SqliteReservationStore::open(&self.db_path).await?;
        Ok(Box::new(store))
    }
}
