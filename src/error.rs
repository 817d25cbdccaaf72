use rusqlite::ErrorCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Error, Debug)]
pub enum ImportError {
    /// A source record is missing a required field or carries an unparsable value.
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// The header row lacks columns every record needs.
    #[error("source is missing required columns: {0}")]
    MissingColumns(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ImportError {
    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    /// Whether the failure only concerns the current record, so the run can continue.
    pub fn is_record_level(&self) -> bool {
        match self {
            Self::MalformedRecord { .. } => true,
            Self::Csv(e) => !e.is_io_error(),
            Self::Store(e) => e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation),
            Self::MissingColumns(_) | Self::Io(_) | Self::Config(_) => false,
        }
    }
}
