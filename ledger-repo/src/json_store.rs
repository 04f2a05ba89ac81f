//! Record store serialized as one JSON array under a single key.

use async_trait::async_trait;
use ledger_types::{KeyValueStore, RECORDS_KEY, RecordStore, StoreError, TransactionRecord};
use tracing::{debug, warn};

/// `RecordStore` over any key-value backend.
pub struct JsonRecordStore<K: KeyValueStore> {
    storage: K,
    key: String,
}

impl<K: KeyValueStore> JsonRecordStore<K> {
    /// Stores records under the standard `transactions` key.
    pub fn new(storage: K) -> Self {
        Self::with_key(storage, RECORDS_KEY)
    }

    pub fn with_key(storage: K, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
        }
    }

    /// Returns a reference to the underlying backend.
    pub fn storage(&self) -> &K {
        &self.storage
    }
}

#[async_trait]
impl<K: KeyValueStore> RecordStore for JsonRecordStore<K> {
    async fn load_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let Some(text) = self.storage.get(&self.key).await? else {
            debug!(key = %self.key, "No stored records yet");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<TransactionRecord>>(&text) {
            Ok(records) => {
                debug!(key = %self.key, count = records.len(), "Loaded records");
                Ok(records)
            }
            Err(e) => {
                warn!(
                    key = %self.key,
                    error = %e,
                    "Stored records are malformed, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, records: &[TransactionRecord]) -> Result<(), StoreError> {
        let text = serde_json::to_string(records)?;
        self.storage.set(&self.key, &text).await?;
        debug!(key = %self.key, count = records.len(), "Saved records");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.storage.remove(&self.key).await
    }
}
