use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use thiserror::Error;

/// Raised by `on_load`. Fatal: the function is not registered.
#[derive(Debug, Error)]
pub enum InitError {
    /// For functions whose `on_load` needs a setting the host did not supply.
    #[error("missing required setting: {0}")]
    MissingSetting(String),

    #[error("invalid setting {key}: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("function failed to load: {0}")]
    Failed(String),
}

/// Raised when a call cannot produce a complete, schema-consistent table.
#[derive(Debug, Error)]
pub enum InvocationError {
    #[error("requested column is not part of the schema: {0}")]
    UnknownColumn(String),

    #[error("result contains a column not declared in the schema: {0}")]
    UnexpectedColumn(String),

    #[error("result contains column {0} more than once")]
    DuplicateColumn(String),

    #[error("column {column} has type {actual}, schema declares {expected}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    #[error("function {0} has not been loaded")]
    NotLoaded(&'static str),

    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
}
