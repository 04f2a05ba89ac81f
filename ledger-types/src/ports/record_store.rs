//! Record store port.
//!
//! The whole record list is read and written as one unit; there is no
//! per-record update and no locking, so the last write wins.

use crate::domain::TransactionRecord;
use crate::error::StoreError;

/// Storage key holding the serialized record list.
pub const RECORDS_KEY: &str = "transactions";

#[async_trait::async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Returns the full persisted list.
    ///
    /// Missing or unreadable data yields an empty list; only backend
    /// failures are reported as errors.
    async fn load_all(&self) -> Result<Vec<TransactionRecord>, StoreError>;

    /// Replaces the entire persisted list with `records`.
    async fn save_all(&self, records: &[TransactionRecord]) -> Result<(), StoreError>;

    /// Removes the persisted list entirely.
    async fn clear(&self) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    async fn load_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        (**self).load_all().await
    }

    async fn save_all(&self, records: &[TransactionRecord]) -> Result<(), StoreError> {
        (**self).save_all(records).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        (**self).clear().await
    }
}
