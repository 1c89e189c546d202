#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Bulk import is not supported for entity '{0}'")]
    UnknownEntity(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Template rendering failed: {0}")]
    Template(String),
}

/// A single CSV row could not be converted into a typed record.
///
/// Recoverable: the row is dropped and the run continues.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransformError {
    #[error("missing required value in column '{column}'")]
    MissingField { column: String },

    #[error("invalid number in column '{column}': '{value}'")]
    InvalidNumber { column: String, value: String },

    #[error("invalid integer in column '{column}': '{value}'")]
    InvalidInteger { column: String, value: String },

    #[error("invalid boolean in column '{column}': '{value}'")]
    InvalidBoolean { column: String, value: String },

    #[error("invalid date in column '{column}' (expected YYYY-MM-DD): '{value}'")]
    InvalidDate { column: String, value: String },

    #[error("invalid value in column '{column}': {message}")]
    Invalid { column: String, message: String },
}

/// The uploaded file could not be parsed. Fatal: the run aborts before any
/// insert is attempted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CsvError {
    #[error("file is not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("file has no header row")]
    MissingHeader,

    #[error("malformed CSV at line {line}: {message}")]
    Malformed { line: u64, message: String },
}

/// A bulk insert was refused by the store.
///
/// Recoverable at batch level: every record in the batch is counted as failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("insert rejected: {0}")]
    Rejected(String),

    #[error("record of type '{found}' cannot be inserted into '{table}'")]
    MismatchedRecord { table: String, found: String },

    #[error("unknown table '{0}'")]
    UnknownTable(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
