//! Transaction record domain model.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Storage format of [`TransactionRecord::date`].
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque identifier for a TransactionRecord.
///
/// New ids are time-ordered UUIDs, but any string loaded from storage is
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a fresh, time-based id.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a record brings money in or takes it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Income,
    Expense,
}

impl RecordType {
    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            RecordType::Income => "Income",
            RecordType::Expense => "Expense",
        }
    }

    /// Applies this type's sign to an unsigned amount.
    pub fn apply_sign(&self, amount: Decimal) -> Decimal {
        match self {
            RecordType::Income => amount,
            RecordType::Expense => -amount,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordType::Income => write!(f, "income"),
            RecordType::Expense => write!(f, "expense"),
        }
    }
}

impl std::str::FromStr for RecordType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(RecordType::Income),
            "expense" => Ok(RecordType::Expense),
            other => Err(DomainError::InvalidRecordType(other.to_string())),
        }
    }
}

/// One income or expense entry, exactly as persisted.
///
/// `amount` is always stored unsigned; the direction comes from
/// `record_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: RecordId,
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub category: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

impl TransactionRecord {
    /// Parses `date`, returning `None` when the stored text is not a valid
    /// calendar date.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date).ok()
    }

    /// Day of month (1-31), if the date parses.
    pub fn day_of_month(&self) -> Option<u32> {
        self.calendar_date().map(|date| date.day())
    }

    /// Amount carrying the sign of the record type: positive for income,
    /// negative for expense.
    pub fn signed_amount(&self) -> Decimal {
        self.record_type.apply_sign(self.amount)
    }
}

/// Parses a `YYYY-MM-DD` date string.
pub fn parse_date(text: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| DomainError::InvalidDate(text.to_string()))
}
