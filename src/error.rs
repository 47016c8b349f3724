//! Error types for tempocol
//!
//! Two levels:
//! - `Error`: invocation level, aborts one transform call
//! - `FormatError` / `RowError`: row level, turned into null rows by dispatch

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Invocation-level error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input column element type does not match what the transform reads
    #[error("Illegal column {column} of first argument of function {function}")]
    IllegalColumn {
        column: &'static str,
        function: &'static str,
    },

    /// Wrong number of argument positions for a block-level call
    #[error("Function {function} expects {expected} arguments, got {got}")]
    ArgumentCount {
        function: &'static str,
        expected: usize,
        got: usize,
    },

    /// Format argument is not a non-empty string column
    #[error("Illegal column {column} of second argument of function {function}")]
    IllegalFormatColumn {
        column: &'static str,
        function: &'static str,
    },

    /// Format-driven transform called without a null map
    #[error("Function {function} requires a null map")]
    NullMapRequired { function: &'static str },

    /// Column position outside the row batch
    #[error("Column position {0} is out of range")]
    ColumnOutOfRange(usize),

    /// Constructor rejected a field value
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// UTC offset outside +/-24h
    #[error("Invalid UTC offset: {0} seconds")]
    InvalidOffset(i32),
}

impl Error {
    pub fn illegal_column(column: &'static str, function: &'static str) -> Self {
        Error::IllegalColumn { column, function }
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Error::InvalidValue(msg.into())
    }
}

/// Failure to render one value through a format spec
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    #[error("format spec is {len} bytes, limit is {limit}", limit = crate::config::MAX_FORMAT_SPEC_LEN)]
    SpecTooLong { len: usize },

    #[error("rendered output does not fit the format buffer")]
    OutputOverflow,

    #[error("directive %{directive} cannot be resolved for this value")]
    UnresolvableField { directive: char },
}

/// Per-row failure inside a string-producing transform
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("epoch value {0} is out of range")]
    EpochOutOfRange(i64),

    #[error("epoch value cannot be represented as a calendar value")]
    Unrepresentable,
}
