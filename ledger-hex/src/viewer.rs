//! Income/Expense Viewer Service
//!
//! Read-oriented view over the record store: one month at a time, grouped
//! by day, with income and expense totals. The only write it performs is
//! delete.

use ledger_types::{
    AppError, ConfirmationPrompt, DomainError, MonthFilter, Prompt, RecordId, RecordStore,
    TransactionRecord,
};
use tracing::{debug, error, info};

use crate::manager::DeleteOutcome;
use crate::report::{MonthlyReport, build_report};

/// Years offered by the time picker.
pub const AVAILABLE_YEARS: [i32; 5] = [2022, 2023, 2024, 2025, 2026];

/// Months offered by the time picker.
pub const AVAILABLE_MONTHS: std::ops::RangeInclusive<u32> = 1..=12;

/// Application service behind the income/expense screen.
///
/// The active filter drives the report. While the time picker is open the
/// user edits a separate pending filter, which only replaces the active one
/// on confirm.
pub struct IncomeExpenseViewer<R: RecordStore, P: ConfirmationPrompt> {
    store: R,
    prompt: P,
    records: Vec<TransactionRecord>,
    active: MonthFilter,
    pending: Option<MonthFilter>,
    selected: Option<RecordId>,
}

impl<R: RecordStore, P: ConfirmationPrompt> IncomeExpenseViewer<R, P> {
    /// Creates a viewer showing `filter`, with no records loaded yet.
    pub fn new(store: R, prompt: P, filter: MonthFilter) -> Self {
        Self {
            store,
            prompt,
            records: Vec::new(),
            active: filter,
            pending: None,
            selected: None,
        }
    }

    /// Creates a viewer and loads the stored list.
    pub async fn open(store: R, prompt: P, filter: MonthFilter) -> Self {
        let mut viewer = Self::new(store, prompt, filter);
        viewer.reload().await;
        viewer
    }

    /// Re-reads the full stored list. A failed read shows no records.
    pub async fn reload(&mut self) {
        self.records = match self.store.load_all().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, "Failed to load transactions");
                Vec::new()
            }
        };
    }

    /// Report for the active filter, recomputed from the loaded records.
    pub fn report(&self) -> MonthlyReport {
        build_report(&self.records, self.active)
    }

    pub fn active_filter(&self) -> MonthFilter {
        self.active
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Time picker
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens the picker, starting from the active filter.
    pub fn open_time_picker(&mut self) -> MonthFilter {
        *self.pending.insert(self.active)
    }

    /// The filter being edited, if the picker is open.
    pub fn pending_filter(&self) -> Option<MonthFilter> {
        self.pending
    }

    /// Picks a year in the pending filter, opening the picker if needed.
    pub fn pick_year(&mut self, year: i32) -> Result<MonthFilter, AppError> {
        if !AVAILABLE_YEARS.contains(&year) {
            return Err(DomainError::InvalidPeriod(format!("year {year}")).into());
        }
        let pending = self.pending.get_or_insert(self.active);
        pending.year = year;
        Ok(*pending)
    }

    /// Picks a month in the pending filter, opening the picker if needed.
    pub fn pick_month(&mut self, month: u32) -> Result<MonthFilter, AppError> {
        if !AVAILABLE_MONTHS.contains(&month) {
            return Err(DomainError::InvalidPeriod(format!("month {month}")).into());
        }
        let pending = self.pending.get_or_insert(self.active);
        pending.month = month;
        Ok(*pending)
    }

    /// Commits the pending filter and closes the picker.
    pub fn confirm_time_picker(&mut self) -> MonthFilter {
        if let Some(pending) = self.pending.take() {
            debug!(from = %self.active, to = %pending, "Changed period");
            self.active = pending;
        }
        self.active
    }

    /// Closes the picker, leaving the active filter untouched.
    pub fn cancel_time_picker(&mut self) {
        self.pending = None;
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Selection & delete
    // ─────────────────────────────────────────────────────────────────────────────

    /// Selects `id`, or deselects it if it is already selected.
    pub fn toggle_selection(&mut self, id: &RecordId) {
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.clone());
        }
    }

    pub fn selected(&self) -> Option<&RecordId> {
        self.selected.as_ref()
    }

    /// Asks for confirmation, then removes `id` from the full stored list
    /// and reloads.
    pub async fn delete(&mut self, id: &RecordId) -> DeleteOutcome {
        if !self.records.iter().any(|record| &record.id == id) {
            debug!(%id, "Delete skipped, no such transaction");
            return DeleteOutcome::NotFound;
        }

        if !self.prompt.confirm(&Prompt::delete_record()).await {
            return DeleteOutcome::Cancelled;
        }

        let outcome = self.delete_from_store(id).await;
        self.selected = None;
        self.reload().await;
        outcome
    }

    /// Deletes the selected record, if any.
    pub async fn delete_selected(&mut self) -> DeleteOutcome {
        match self.selected.clone() {
            Some(id) => self.delete(&id).await,
            None => DeleteOutcome::NotFound,
        }
    }

    async fn delete_from_store(&self, id: &RecordId) -> DeleteOutcome {
        let mut stored = match self.store.load_all().await {
            Ok(records) => records,
            Err(e) => {
                error!(error = %e, %id, "Failed to read transactions for delete");
                return DeleteOutcome::Failed;
            }
        };

        let before = stored.len();
        stored.retain(|record| &record.id != id);
        if stored.len() == before {
            debug!(%id, "Transaction already gone from storage");
            return DeleteOutcome::NotFound;
        }

        if let Err(e) = self.store.save_all(&stored).await {
            error!(error = %e, %id, "Failed to save transactions after delete");
            return DeleteOutcome::Failed;
        }
        info!(%id, "Deleted transaction");
        DeleteOutcome::Deleted
    }
}
