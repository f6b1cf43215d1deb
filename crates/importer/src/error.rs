use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImporterError>;

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("CSV is empty")]
    EmptyInput,

    #[error("Invalid CSV header. Required columns: username, displayName, prize, bet")]
    InvalidHeader,

    #[error("Invalid CSV header: duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("CSV has no valid rows")]
    NoRows,

    #[error("Duplicate username in CSV: '{0}'")]
    DuplicateUsername(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::error::StorageError),
}
