//! # Ledger Types
//!
//! Domain types and port traits for the personal income/expense ledger.
//! This crate has no IO dependencies - only data structures, validation
//! rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate is the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (TransactionRecord, RecordType, MonthFilter)
//! - `ports/` - Traits that storage and prompt adapters implement
//! - `dto/` - The editable record form used by create/update
//! - `error/` - Domain, storage and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{MonthFilter, RecordId, RecordType, TransactionRecord, format_amount};
pub use dto::RecordForm;
pub use error::{AppError, DomainError, StoreError};
pub use ports::{
    ChoiceStyle, ConfirmationPrompt, KeyValueStore, Prompt, PromptAction, PromptChoice,
    RECORDS_KEY, RecordStore,
};
