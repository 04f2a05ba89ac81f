//! Domain models for the ledger.

pub mod amount;
pub mod period;
pub mod record;

pub use amount::{format_amount, parse_amount};
pub use period::MonthFilter;
pub use record::{RecordId, RecordType, TransactionRecord, parse_date};
