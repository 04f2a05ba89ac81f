//! Transaction Manager Service
//!
//! Full create/update/delete/list surface over the record store.
//! Every mutation rewrites the whole stored list.

use std::cmp::Reverse;

use ledger_types::{
    AppError, ConfirmationPrompt, Prompt, RecordForm, RecordId, RecordStore, TransactionRecord,
};
use tracing::{debug, error, info};

/// Result of a delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was removed and the list rewritten.
    Deleted,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// No record has that id; nothing was written.
    NotFound,
    /// Confirmed, but storage could not be read or rewritten.
    Failed,
}

/// Application service behind the transaction manager screen.
///
/// Keeps its own copy of the record list; storage failures are logged
/// and swallowed, so the copy may run ahead of what is persisted until the
/// next successful write.
pub struct TransactionManager<R: RecordStore, P: ConfirmationPrompt> {
    store: R,
    prompt: P,
    records: Vec<TransactionRecord>,
}

impl<R: RecordStore, P: ConfirmationPrompt> TransactionManager<R, P> {
    /// Creates a manager with an empty list; call [`load`](Self::load) next.
    pub fn new(store: R, prompt: P) -> Self {
        Self {
            store,
            prompt,
            records: Vec::new(),
        }
    }

    /// Creates a manager and loads the stored list.
    pub async fn open(store: R, prompt: P) -> Self {
        let mut manager = Self::new(store, prompt);
        manager.load().await;
        manager
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &R {
        &self.store
    }

    /// Replaces the in-memory list with the stored one.
    ///
    /// A failed read leaves an empty list.
    pub async fn load(&mut self) {
        self.records = match self.store.load_all().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Failed to load transactions");
                Vec::new()
            }
        };
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// All records, newest date first.
    ///
    /// Equal dates keep their stored order; unparsable dates go last.
    pub fn list(&self) -> Vec<TransactionRecord> {
        let mut records = self.records.clone();
        records.sort_by_key(|record| Reverse(record.calendar_date()));
        records
    }

    /// Looks up a record by id.
    pub fn get(&self, id: &RecordId) -> Option<&TransactionRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates `form`, stores it as a new record, and returns the record.
    pub async fn create(&mut self, form: RecordForm) -> Result<TransactionRecord, AppError> {
        let record = form.into_record(RecordId::generate())?;

        self.records.push(record.clone());
        self.persist().await;

        info!(
            id = %record.id,
            date = %record.date,
            kind = %record.record_type,
            "Created transaction"
        );
        Ok(record)
    }

    /// Validates `form` and overwrites every field of the record with `id`.
    ///
    /// Returns `Ok(None)` without writing when no record has that id.
    pub async fn update(
        &mut self,
        id: &RecordId,
        form: RecordForm,
    ) -> Result<Option<TransactionRecord>, AppError> {
        let record = form.into_record(id.clone())?;

        let Some(slot) = self.records.iter_mut().find(|r| &r.id == id) else {
            debug!(%id, "Update skipped, no such transaction");
            return Ok(None);
        };
        *slot = record.clone();
        self.persist().await;

        info!(%id, "Updated transaction");
        Ok(Some(record))
    }

    /// Asks for confirmation, then removes the record with `id`.
    pub async fn delete(&mut self, id: &RecordId) -> DeleteOutcome {
        if self.get(id).is_none() {
            debug!(%id, "Delete skipped, no such transaction");
            return DeleteOutcome::NotFound;
        }

        if !self.prompt.confirm(&Prompt::delete_record()).await {
            return DeleteOutcome::Cancelled;
        }

        self.records.retain(|record| &record.id != id);
        self.persist().await;

        info!(%id, "Deleted transaction");
        DeleteOutcome::Deleted
    }

    /// Removes the stored list entirely.
    ///
    /// Unlike the other mutations this reports storage failures, since the
    /// caller asked for nothing else.
    pub async fn reset(&mut self) -> Result<(), AppError> {
        self.store.clear().await?;
        self.records.clear();
        info!("Cleared all transactions");
        Ok(())
    }

    async fn persist(&self) {
        if let Err(e) = self.store.save_all(&self.records).await {
            error!(error = %e, count = self.records.len(), "Failed to save transactions");
        }
    }
}
