//! Monthly income/expense report.
//!
//! Pure functions: the viewer feeds them the full record list and its
//! active filter and renders whatever comes back.

use std::collections::BTreeMap;

use ledger_types::{MonthFilter, TransactionRecord};
use rust_decimal::Decimal;
use serde::Serialize;

/// A record together with its derived signed amount.
///
/// The signed amount exists only for display and totals; it is never
/// written back to storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignedRecord {
    pub record: TransactionRecord,
    #[serde(with = "rust_decimal::serde::float")]
    pub signed_amount: Decimal,
    pub day: u32,
}

/// Records sharing a day of the month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub day: u32,
    pub records: Vec<SignedRecord>,
}

/// Income and expense totals, both non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
}

impl Summary {
    /// Income minus expense.
    pub fn net(&self) -> Decimal {
        self.total_income - self.total_expense
    }
}

/// Everything the income/expense screen shows for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub filter: MonthFilter,
    pub groups: Vec<DayGroup>,
    pub summary: Summary,
}

impl MonthlyReport {
    /// Number of records in the month.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Keeps records dated within `filter`, attaching their signed amounts.
///
/// Records whose date does not parse are dropped.
pub fn filter_by_month(records: &[TransactionRecord], filter: MonthFilter) -> Vec<SignedRecord> {
    records
        .iter()
        .filter_map(|record| {
            let date = record.calendar_date()?;
            filter.contains(date).then(|| SignedRecord {
                record: record.clone(),
                signed_amount: record.signed_amount(),
                day: chrono::Datelike::day(&date),
            })
        })
        .collect()
}

/// Partitions records by day of month, latest day first.
///
/// Records keep their input order inside a group.
pub fn group_by_day(records: Vec<SignedRecord>) -> Vec<DayGroup> {
    let mut by_day: BTreeMap<u32, Vec<SignedRecord>> = BTreeMap::new();
    for record in records {
        by_day.entry(record.day).or_default().push(record);
    }

    by_day
        .into_iter()
        .rev()
        .map(|(day, records)| DayGroup { day, records })
        .collect()
}

/// Sums expenses (as magnitudes) and income separately.
///
/// A zero amount counts towards neither total. Totals saturate at
/// `Decimal::MAX`, since stored data may hold amounts entry would reject.
pub fn summarize(records: &[SignedRecord]) -> Summary {
    records
        .iter()
        .fold(Summary::default(), |mut summary, record| {
            if record.signed_amount < Decimal::ZERO {
                summary.total_expense = summary
                    .total_expense
                    .saturating_add(record.signed_amount.abs());
            } else if record.signed_amount > Decimal::ZERO {
                summary.total_income = summary.total_income.saturating_add(record.signed_amount);
            }
            summary
        })
}

/// Filter, sign, summarize and group in one go.
pub fn build_report(records: &[TransactionRecord], filter: MonthFilter) -> MonthlyReport {
    let filtered = filter_by_month(records, filter);
    let summary = summarize(&filtered);
    MonthlyReport {
        filter,
        groups: group_by_day(filtered),
        summary,
    }
}
