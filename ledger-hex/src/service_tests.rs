//! TransactionManager and IncomeExpenseViewer unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use ledger_types::{
        AppError, ConfirmationPrompt, MonthFilter, Prompt, PromptAction, RecordForm, RecordId,
        RecordStore, RecordType, StoreError, TransactionRecord,
    };

    use crate::viewer::AVAILABLE_YEARS;
    use crate::{DeleteOutcome, IncomeExpenseViewer, TransactionManager};

    /// In-memory record store that can be told to fail.
    #[derive(Default)]
    pub struct MockStore {
        records: Mutex<Vec<TransactionRecord>>,
        fail_reads: AtomicBool,
        fail_writes: AtomicBool,
        writes: AtomicUsize,
    }

    impl MockStore {
        pub fn with_records(records: Vec<TransactionRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Self::default()
            }
        }

        pub fn stored(&self) -> Vec<TransactionRecord> {
            self.records.lock().unwrap().clone()
        }

        pub fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RecordStore for MockStore {
        async fn load_all(&self) -> Result<Vec<TransactionRecord>, StoreError> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StoreError::Backend("read failed".into()));
            }
            Ok(self.stored())
        }

        async fn save_all(&self, records: &[TransactionRecord]) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Backend("write failed".into()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            *self.records.lock().unwrap() = records.to_vec();
            Ok(())
        }

        async fn clear(&self) -> Result<(), StoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Backend("write failed".into()));
            }
            self.records.lock().unwrap().clear();
            Ok(())
        }
    }

    /// Prompt that answers from a script and records what it was asked.
    #[derive(Default)]
    pub struct ScriptedPrompt {
        answers: Mutex<VecDeque<Option<PromptAction>>>,
        asked: Mutex<Vec<Prompt>>,
    }

    impl ScriptedPrompt {
        pub fn answering(answers: &[Option<PromptAction>]) -> Self {
            Self {
                answers: Mutex::new(answers.iter().copied().collect()),
                asked: Mutex::new(Vec::new()),
            }
        }

        pub fn times_asked(&self) -> usize {
            self.asked.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ConfirmationPrompt for ScriptedPrompt {
        async fn ask(&self, prompt: &Prompt) -> Option<PromptAction> {
            self.asked.lock().unwrap().push(prompt.clone());
            self.answers.lock().unwrap().pop_front().flatten()
        }
    }

    fn dec(text: &str) -> Decimal {
        text.parse().unwrap()
    }

    fn form(date: &str, record_type: RecordType, category: &str, amount: &str) -> RecordForm {
        RecordForm {
            date: date.to_string(),
            record_type,
            category: category.to_string(),
            amount: amount.to_string(),
            description: String::new(),
        }
    }

    fn stored(id: &str, date: &str, record_type: RecordType, amount: &str) -> TransactionRecord {
        TransactionRecord {
            id: RecordId::from(id),
            date: date.to_string(),
            record_type,
            category: "Misc".to_string(),
            amount: dec(amount),
            description: String::new(),
        }
    }

    fn september() -> MonthFilter {
        MonthFilter::new(2025, 9).unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // TransactionManager
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_persists_full_list() {
        let store = Arc::new(MockStore::default());
        let mut manager = TransactionManager::open(store.clone(), ScriptedPrompt::default()).await;

        let record = manager
            .create(form("2025-09-10", RecordType::Expense, "餐饮", "50"))
            .await
            .unwrap();

        assert_eq!(record.amount, dec("50"));
        assert!(!record.id.as_str().is_empty());
        assert_eq!(store.stored(), vec![record]);
        assert_eq!(store.writes(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_amount_without_writing() {
        let store = Arc::new(MockStore::default());
        let mut manager = TransactionManager::open(store.clone(), ScriptedPrompt::default()).await;

        let result = manager
            .create(form("2025-09-10", RecordType::Expense, "Food", "abc"))
            .await;

        match result {
            Err(AppError::Validation(message)) => {
                assert_eq!(message, "Please enter a valid amount")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(store.writes(), 0);
        assert!(manager.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_empty_category() {
        let store = Arc::new(MockStore::default());
        let mut manager = TransactionManager::open(store.clone(), ScriptedPrompt::default()).await;

        let result = manager
            .create(form("2025-09-10", RecordType::Income, "", "10"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields_and_keeps_id() {
        let store = Arc::new(MockStore::with_records(vec![stored(
            "r1",
            "2025-09-10",
            RecordType::Expense,
            "50",
        )]));
        let mut manager = TransactionManager::open(store.clone(), ScriptedPrompt::default()).await;

        let mut edit = RecordForm::from_record(manager.get(&RecordId::from("r1")).unwrap());
        edit.amount = "80".to_string();
        edit.description = "dinner".to_string();
        let updated = manager
            .update(&RecordId::from("r1"), edit)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id.as_str(), "r1");
        assert_eq!(store.stored()[0].amount, dec("80"));
        assert_eq!(store.stored()[0].description, "dinner");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let store = Arc::new(MockStore::with_records(vec![stored(
            "r1",
            "2025-09-10",
            RecordType::Expense,
            "50",
        )]));
        let mut manager = TransactionManager::open(store.clone(), ScriptedPrompt::default()).await;

        let result = manager
            .update(
                &RecordId::from("missing"),
                form("2025-09-10", RecordType::Expense, "Food", "5"),
            )
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_update_validation_leaves_record_untouched() {
        let original = stored("r1", "2025-09-10", RecordType::Expense, "50");
        let store = Arc::new(MockStore::with_records(vec![original.clone()]));
        let mut manager = TransactionManager::open(store.clone(), ScriptedPrompt::default()).await;

        let result = manager
            .update(
                &RecordId::from("r1"),
                form("2025-09-10", RecordType::Expense, "Food", "-1"),
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(manager.get(&RecordId::from("r1")), Some(&original));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let store = Arc::new(MockStore::with_records(vec![stored(
            "r1",
            "2025-09-10",
            RecordType::Expense,
            "50",
        )]));
        let prompt = ScriptedPrompt::answering(&[Some(PromptAction::Cancel), None]);
        let mut manager = TransactionManager::open(store.clone(), prompt).await;

        assert_eq!(
            manager.delete(&RecordId::from("r1")).await,
            DeleteOutcome::Cancelled
        );
        // Dismissed without a choice.
        assert_eq!(
            manager.delete(&RecordId::from("r1")).await,
            DeleteOutcome::Cancelled
        );
        assert_eq!(store.writes(), 0);
        assert_eq!(manager.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_confirmed_rewrites_list() {
        let store = Arc::new(MockStore::with_records(vec![
            stored("r1", "2025-09-10", RecordType::Expense, "50"),
            stored("r2", "2025-09-11", RecordType::Income, "10"),
        ]));
        let prompt = Arc::new(ScriptedPrompt::answering(&[Some(PromptAction::Confirm)]));
        let mut manager = TransactionManager::open(store.clone(), prompt.clone()).await;

        let outcome = manager.delete(&RecordId::from("r1")).await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(prompt.times_asked(), 1);
        let ids: Vec<String> = store.stored().iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["r2".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_does_not_prompt() {
        let prompt = Arc::new(ScriptedPrompt::answering(&[Some(PromptAction::Confirm)]));
        let mut manager =
            TransactionManager::open(Arc::new(MockStore::default()), prompt.clone()).await;

        assert_eq!(
            manager.delete(&RecordId::from("nope")).await,
            DeleteOutcome::NotFound
        );
        assert_eq!(prompt.times_asked(), 0);
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first_with_stable_ties() {
        let store = MockStore::with_records(vec![
            stored("old", "2024-01-05", RecordType::Expense, "1"),
            stored("bad", "someday", RecordType::Expense, "1"),
            stored("tie-a", "2025-09-10", RecordType::Expense, "1"),
            stored("new", "2025-09-12", RecordType::Income, "1"),
            stored("tie-b", "2025-09-10", RecordType::Income, "1"),
        ]);
        let manager = TransactionManager::open(store, ScriptedPrompt::default()).await;

        let ids: Vec<String> = manager.list().iter().map(|r| r.id.to_string()).collect();

        assert_eq!(ids, vec!["new", "tie-a", "tie-b", "old", "bad"]);
    }

    #[tokio::test]
    async fn test_failed_load_starts_empty() {
        let store = MockStore::with_records(vec![stored(
            "r1",
            "2025-09-10",
            RecordType::Expense,
            "50",
        )]);
        store.fail_reads.store(true, Ordering::SeqCst);

        let manager = TransactionManager::open(store, ScriptedPrompt::default()).await;

        assert!(manager.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_is_swallowed() {
        let store = Arc::new(MockStore::default());
        store.fail_writes.store(true, Ordering::SeqCst);
        let mut manager = TransactionManager::open(store.clone(), ScriptedPrompt::default()).await;

        let record = manager
            .create(form("2025-09-10", RecordType::Income, "Salary", "100"))
            .await
            .unwrap();

        // In-memory list is ahead of storage until the next good write.
        assert_eq!(manager.get(&record.id), Some(&record));
        assert!(store.stored().is_empty());

        store.fail_writes.store(false, Ordering::SeqCst);
        manager
            .create(form("2025-09-11", RecordType::Income, "Bonus", "5"))
            .await
            .unwrap();
        assert_eq!(store.stored().len(), 2);
    }

    #[tokio::test]
    async fn test_reset_surfaces_storage_errors() {
        let store = Arc::new(MockStore::with_records(vec![stored(
            "r1",
            "2025-09-10",
            RecordType::Expense,
            "50",
        )]));
        let mut manager = TransactionManager::open(store.clone(), ScriptedPrompt::default()).await;

        store.fail_writes.store(true, Ordering::SeqCst);
        assert!(matches!(manager.reset().await, Err(AppError::Storage(_))));
        assert_eq!(manager.len(), 1);

        store.fail_writes.store(false, Ordering::SeqCst);
        manager.reset().await.unwrap();
        assert!(manager.is_empty());
        assert!(store.stored().is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // IncomeExpenseViewer
    // ─────────────────────────────────────────────────────────────────────────────

    fn viewer_store() -> Arc<MockStore> {
        Arc::new(MockStore::with_records(vec![
            stored("a", "2025-09-10", RecordType::Expense, "50"),
            stored("b", "2025-09-03", RecordType::Income, "200"),
            stored("c", "2025-08-10", RecordType::Expense, "30"),
        ]))
    }

    #[tokio::test]
    async fn test_viewer_report_for_active_filter() {
        let viewer =
            IncomeExpenseViewer::open(viewer_store(), ScriptedPrompt::default(), september())
                .await;

        let report = viewer.report();

        assert_eq!(report.filter, september());
        assert_eq!(report.record_count(), 2);
        assert_eq!(report.summary.total_expense, dec("50"));
        assert_eq!(report.summary.total_income, dec("200"));
        assert_eq!(report.groups[0].day, 10);
        assert_eq!(report.groups[0].records[0].signed_amount, dec("-50"));
    }

    #[tokio::test]
    async fn test_time_picker_cancel_keeps_active_filter() {
        let mut viewer =
            IncomeExpenseViewer::open(viewer_store(), ScriptedPrompt::default(), september())
                .await;

        assert_eq!(viewer.open_time_picker(), september());
        viewer.pick_month(8).unwrap();
        viewer.pick_year(2024).unwrap();

        // Half-made selection does not affect the report.
        assert_eq!(viewer.report().filter, september());

        viewer.cancel_time_picker();
        assert_eq!(viewer.active_filter(), september());
        assert!(viewer.pending_filter().is_none());
    }

    #[tokio::test]
    async fn test_time_picker_confirm_commits_pending() {
        let mut viewer =
            IncomeExpenseViewer::open(viewer_store(), ScriptedPrompt::default(), september())
                .await;

        viewer.open_time_picker();
        viewer.pick_month(8).unwrap();
        let active = viewer.confirm_time_picker();

        assert_eq!(active, MonthFilter::new(2025, 8).unwrap());
        let report = viewer.report();
        assert_eq!(report.record_count(), 1);
        assert_eq!(report.summary.total_expense, dec("30"));
    }

    #[tokio::test]
    async fn test_time_picker_rejects_unlisted_values() {
        let mut viewer =
            IncomeExpenseViewer::open(viewer_store(), ScriptedPrompt::default(), september())
                .await;

        assert!(matches!(viewer.pick_month(13), Err(AppError::Validation(_))));
        assert!(viewer.pick_year(1999).is_err());
        assert!(viewer.pick_year(AVAILABLE_YEARS[0]).is_ok());
    }

    #[tokio::test]
    async fn test_selection_toggles_and_moves() {
        let mut viewer =
            IncomeExpenseViewer::open(viewer_store(), ScriptedPrompt::default(), september())
                .await;
        let a = RecordId::from("a");
        let b = RecordId::from("b");

        viewer.toggle_selection(&a);
        assert_eq!(viewer.selected(), Some(&a));
        viewer.toggle_selection(&b);
        assert_eq!(viewer.selected(), Some(&b));
        viewer.toggle_selection(&b);
        assert_eq!(viewer.selected(), None);
    }

    #[tokio::test]
    async fn test_viewer_delete_rewrites_unfiltered_list() {
        let store = viewer_store();
        let prompt = ScriptedPrompt::answering(&[Some(PromptAction::Confirm)]);
        let mut viewer = IncomeExpenseViewer::open(store.clone(), prompt, september()).await;

        viewer.toggle_selection(&RecordId::from("a"));
        let outcome = viewer.delete_selected().await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(viewer.selected(), None);
        // The August record outside the filter survives.
        let ids: Vec<String> = store.stored().iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(viewer.report().summary.total_expense, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_viewer_delete_cancel_keeps_selection() {
        let store = viewer_store();
        let prompt = ScriptedPrompt::answering(&[Some(PromptAction::Cancel)]);
        let mut viewer = IncomeExpenseViewer::open(store.clone(), prompt, september()).await;

        viewer.toggle_selection(&RecordId::from("a"));
        let outcome = viewer.delete_selected().await;

        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert_eq!(viewer.selected(), Some(&RecordId::from("a")));
        assert_eq!(store.writes(), 0);
    }

    #[tokio::test]
    async fn test_viewer_delete_reports_failed_write() {
        let store = viewer_store();
        let prompt = ScriptedPrompt::answering(&[Some(PromptAction::Confirm)]);
        let mut viewer = IncomeExpenseViewer::open(store.clone(), prompt, september()).await;
        store.fail_writes.store(true, Ordering::SeqCst);

        viewer.toggle_selection(&RecordId::from("a"));
        let outcome = viewer.delete_selected().await;

        assert_eq!(outcome, DeleteOutcome::Failed);
        assert_eq!(store.stored().len(), 3);
        assert_eq!(viewer.report().record_count(), 2);
    }

    #[tokio::test]
    async fn test_viewer_sees_changes_only_after_reload() {
        let store = viewer_store();
        let mut viewer =
            IncomeExpenseViewer::open(store.clone(), ScriptedPrompt::default(), september()).await;
        let mut manager = TransactionManager::open(store.clone(), ScriptedPrompt::default()).await;

        manager
            .create(form("2025-09-20", RecordType::Income, "Gift", "5"))
            .await
            .unwrap();
        assert_eq!(viewer.report().record_count(), 2);

        viewer.reload().await;
        assert_eq!(viewer.report().record_count(), 3);
    }

    #[tokio::test]
    async fn test_viewer_failed_load_shows_nothing() {
        let store = viewer_store();
        store.fail_reads.store(true, Ordering::SeqCst);

        let viewer =
            IncomeExpenseViewer::open(store, ScriptedPrompt::default(), september()).await;

        assert!(viewer.report().is_empty());
    }
}
