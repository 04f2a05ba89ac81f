//! # Ledger Hex
//!
//! Application layer for the personal ledger.
//!
//! ## Architecture
//!
//! - `manager` - Transaction manager (create, update, delete, list)
//! - `viewer` - Income/expense viewer (month filter, day groups, totals)
//! - `report` - Pure filter/group/summarize functions used by the viewer
//! - `shell` - Navigation between the home, viewer and manager screens
//!
//! The services are generic over `R: RecordStore` and
//! `P: ConfirmationPrompt`, so any storage adapter and any front end can be
//! injected.

pub mod manager;
pub mod report;
pub mod shell;
pub mod viewer;

#[cfg(test)]
mod service_tests;

pub use manager::{DeleteOutcome, TransactionManager};
pub use report::{DayGroup, MonthlyReport, SignedRecord, Summary};
pub use shell::{Screen, Shell};
pub use viewer::IncomeExpenseViewer;
