//! Key-value storage port.
//!
//! The only durability boundary of the ledger. Adapters (in-memory,
//! JSON files, SQLite) implement this trait.

use crate::error::StoreError;

/// Opaque asynchronous string key-value storage.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
