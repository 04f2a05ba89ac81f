//! Terminal adapter: line input, the confirmation prompt, and plain-text
//! rendering of the two screens.

use std::fmt::Write as _;
use std::io::Write as _;

use async_trait::async_trait;
use ledger_hex::MonthlyReport;
use ledger_types::{
    ConfirmationPrompt, Prompt, PromptAction, RecordId, RecordType, TransactionRecord,
    format_amount,
};
use rust_decimal::Decimal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tokio::sync::Mutex;

/// Line-oriented console over any async reader (stdin in the binary).
pub struct Console<R> {
    lines: Mutex<Lines<R>>,
}

impl<R: AsyncBufRead + Unpin + Send> Console<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: Mutex::new(reader.lines()),
        }
    }

    /// Prints `label` and reads one trimmed line. `None` on end of input.
    pub async fn read_line(&self, label: &str) -> Option<String> {
        print!("{label}");
        let _ = std::io::stdout().flush();

        match self.lines.lock().await.next_line().await {
            Ok(Some(line)) => Some(line.trim().to_string()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read input");
                None
            }
        }
    }

    /// Reads a line, falling back to `default` when the user enters nothing.
    pub async fn read_with_default(&self, label: &str, default: &str) -> Option<String> {
        let line = self.read_line(&format!("{label} [{default}]: ")).await?;
        if line.is_empty() {
            Some(default.to_string())
        } else {
            Some(line)
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> ConfirmationPrompt for Console<R> {
    async fn ask(&self, prompt: &Prompt) -> Option<PromptAction> {
        println!("{}", prompt.title);
        println!("{}", prompt.message);
        let options: Vec<String> = prompt
            .choices
            .iter()
            .enumerate()
            .map(|(i, choice)| format!("[{}] {}", i + 1, choice.label))
            .collect();

        let answer = self.read_line(&format!("{} > ", options.join("  "))).await?;
        pick_choice(prompt, &answer)
    }
}

/// Prompt that confirms without asking, for `--yes`.
pub struct AutoConfirm;

#[async_trait]
impl ConfirmationPrompt for AutoConfirm {
    async fn ask(&self, _prompt: &Prompt) -> Option<PromptAction> {
        Some(PromptAction::Confirm)
    }
}

/// Matches an answer against the prompt's choices by number or label.
fn pick_choice(prompt: &Prompt, answer: &str) -> Option<PromptAction> {
    if let Ok(n) = answer.parse::<usize>() {
        return prompt
            .choices
            .get(n.checked_sub(1)?)
            .map(|choice| choice.action);
    }
    prompt
        .choices
        .iter()
        .find(|choice| choice.label.eq_ignore_ascii_case(answer))
        .map(|choice| choice.action)
}

// ─────────────────────────────────────────────────────────────────────────────
// Rendering
// ─────────────────────────────────────────────────────────────────────────────

/// `+¥50.00` for income, `-¥50.00` for expense.
pub fn format_signed(record_type: RecordType, amount: Decimal) -> String {
    let sign = match record_type {
        RecordType::Income => '+',
        RecordType::Expense => '-',
    };
    format!("{sign}¥{}", format_amount(amount))
}

/// Manager list: one numbered line per record, in the given order.
pub fn render_record_list(records: &[TransactionRecord]) -> String {
    if records.is_empty() {
        return "No transactions yet. Use `add` to record one.\n".to_string();
    }

    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        let _ = write!(
            out,
            "[{}] {}  {:<7}  {}  {}",
            i + 1,
            record.date,
            record.record_type.label(),
            record.category,
            format_signed(record.record_type, record.amount),
        );
        if !record.description.is_empty() {
            let _ = write!(out, "  ({})", record.description);
        }
        let _ = writeln!(out, "  #{}", record.id);
    }
    out
}

/// Viewer screen: period header, totals, then day groups with numbered
/// rows. The selected row is marked with `>`.
pub fn render_report(report: &MonthlyReport, selected: Option<&RecordId>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.filter.label());
    let _ = writeln!(
        out,
        "Expense: {}    Income: {}",
        format_amount(report.summary.total_expense),
        format_amount(report.summary.total_income),
    );

    if report.is_empty() {
        let _ = writeln!(out, "No transactions in this month.");
        return out;
    }

    let mut n = 0;
    for group in &report.groups {
        let _ = writeln!(out, "-- Day {} --", group.day);
        for entry in &group.records {
            n += 1;
            let record = &entry.record;
            let marker = if selected == Some(&record.id) { '>' } else { ' ' };
            let note = if record.description.is_empty() {
                "no note"
            } else {
                record.description.as_str()
            };
            let _ = writeln!(
                out,
                "{marker}[{n}] {}  {}  {}  {}",
                record.category,
                note,
                format_signed(record.record_type, record.amount),
                record.record_type.label(),
            );
        }
    }
    out
}

/// Record ids in the order `render_report` numbers them.
pub fn report_order(report: &MonthlyReport) -> Vec<RecordId> {
    report
        .groups
        .iter()
        .flat_map(|group| group.records.iter().map(|entry| entry.record.id.clone()))
        .collect()
}
