//! Health analysis error types.

use thiserror::Error;

/// Reasons an input table cannot be analysed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("table has no rows")]
    EmptyTable,

    #[error("no date column found")]
    NoDateColumn,

    #[error("date column '{0}' not found")]
    DateColumnNotFound(String),

    #[error("no usable rows: {dropped} of {total} rows lack a parseable date")]
    NoUsableRows { total: usize, dropped: usize },

    #[error("no numeric metric column with valid values")]
    NoMetricColumns,

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
}

/// Health analysis errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The table is unusable; analysis is aborted with no partial result.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    /// An internal invariant was violated by an upstream stage.
    #[error("Assembly error: {0}")]
    Assembly(String),
}

impl AnalysisError {
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the table rather than configuration or a defect.
    pub fn is_input_error(&self) -> bool {
        matches!(self, AnalysisError::InvalidInput(_))
    }
}

/// Result type for health analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
