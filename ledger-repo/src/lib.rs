//! # Ledger Repository
//!
//! Concrete storage adapters for the ledger.
//! Key-value backends implement the `KeyValueStore` port, and
//! [`JsonRecordStore`] turns any of them into a `RecordStore`.

use async_trait::async_trait;
use ledger_types::{KeyValueStore, StoreError};

pub mod file;
pub mod json_store;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use file::FileStorage;
pub use json_store::JsonRecordStore;
pub use memory::MemoryStorage;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;

/// Unified storage wrapper over every available backend.
pub enum Storage {
    Memory(MemoryStorage),
    File(FileStorage),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStorage),
}

/// Build a storage backend from a URL.
///
/// - `memory:` keeps everything in process memory
/// - `file://<dir>` or a bare path stores one JSON file per key in `<dir>`
/// - `sqlite://<path>` (with the `sqlite` feature) stores keys in a table
///
/// # Examples
///
/// ```ignore
/// let storage = build_storage("file://.ledger").await?;
/// let store = JsonRecordStore::new(storage);
/// ```
pub async fn build_storage(url: &str) -> anyhow::Result<Storage> {
    if url == "memory:" {
        return Ok(Storage::Memory(MemoryStorage::new()));
    }

    if url.starts_with("sqlite:") {
        #[cfg(feature = "sqlite")]
        return Ok(Storage::Sqlite(SqliteStorage::new(url).await?));

        #[cfg(not(feature = "sqlite"))]
        anyhow::bail!("SQLite storage requires the `sqlite` feature: {url}");
    }

    let dir = url.strip_prefix("file://").unwrap_or(url);
    if dir.is_empty() {
        anyhow::bail!("Storage URL has no directory: {url:?}");
    }
    Ok(Storage::File(FileStorage::new(dir)))
}

/// Build the record store used by both screens.
pub async fn build_record_store(url: &str) -> anyhow::Result<JsonRecordStore<Storage>> {
    Ok(JsonRecordStore::new(build_storage(url).await?))
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement KeyValueStore for Storage (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl KeyValueStore for Storage {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Storage::Memory(inner) => inner.get(key).await,
            Storage::File(inner) => inner.get(key).await,
            #[cfg(feature = "sqlite")]
            Storage::Sqlite(inner) => inner.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Storage::Memory(inner) => inner.set(key, value).await,
            Storage::File(inner) => inner.set(key, value).await,
            #[cfg(feature = "sqlite")]
            Storage::Sqlite(inner) => inner.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match self {
            Storage::Memory(inner) => inner.remove(key).await,
            Storage::File(inner) => inner.remove(key).await,
            #[cfg(feature = "sqlite")]
            Storage::Sqlite(inner) => inner.remove(key).await,
        }
    }
}
