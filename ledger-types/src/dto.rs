//! Data Transfer Objects for the create/edit form.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{RecordId, RecordType, TransactionRecord, parse_amount, parse_date};
use crate::error::DomainError;

/// The editable fields of a record, as typed by the user.
///
/// `amount` stays text until validation so that a bad entry can be
/// reported instead of silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordForm {
    pub date: String,
    pub record_type: RecordType,
    pub category: String,
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

impl RecordForm {
    /// Blank form for a new record: dated `today`, typed as expense.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format(crate::domain::record::DATE_FORMAT).to_string(),
            record_type: RecordType::Expense,
            category: String::new(),
            amount: String::new(),
            description: String::new(),
        }
    }

    /// Form prefilled from an existing record, for the edit path.
    pub fn from_record(record: &TransactionRecord) -> Self {
        Self {
            date: record.date.clone(),
            record_type: record.record_type,
            category: record.category.clone(),
            amount: record.amount.normalize().to_string(),
            description: record.description.clone(),
        }
    }

    /// Checks the form, returning the parsed date and amount.
    ///
    /// Rules apply in order: required fields, then amount, then date.
    pub fn validate(&self) -> Result<(NaiveDate, Decimal), DomainError> {
        if self.category.trim().is_empty() || self.amount.trim().is_empty() {
            return Err(DomainError::MissingFields);
        }
        let amount = parse_amount(&self.amount)?;
        let date = parse_date(&self.date)?;
        Ok((date, amount))
    }

    /// Validates and builds the record stored under `id`.
    pub fn into_record(self, id: RecordId) -> Result<TransactionRecord, DomainError> {
        let (date, amount) = self.validate()?;
        Ok(TransactionRecord {
            id,
            date: date.format(crate::domain::record::DATE_FORMAT).to_string(),
            record_type: self.record_type,
            category: self.category,
            amount,
            description: self.description,
        })
    }
}
