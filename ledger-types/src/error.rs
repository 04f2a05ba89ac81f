//! Error types for the ledger.

/// Domain-level errors (validation rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Category and amount are required")]
    MissingFields,

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Invalid record type: {0:?}")]
    InvalidRecordType(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
}

/// Storage-level errors (key-value backend failures).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Application-level errors, shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = match err {
            DomainError::MissingFields => "Please fill in all required fields".to_string(),
            DomainError::InvalidAmount(_) => "Please enter a valid amount".to_string(),
            DomainError::InvalidDate(_) => "Please enter a valid date (YYYY-MM-DD)".to_string(),
            DomainError::InvalidRecordType(_) => "Type must be income or expense".to_string(),
            DomainError::InvalidPeriod(period) => format!("Unsupported period: {period}"),
        };
        AppError::Validation(message)
    }
}
