//! Error types for the acqschema library.

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::{ConstraintKind, DataKind};

/// Main error type for acqschema operations.
#[derive(Debug, Error)]
pub enum AcqSchemaError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A constraint kind that the data kind does not allow.
    #[error("Constraint '{constraint}' is not allowed for data kind '{data_kind}'")]
    IncompatibleConstraint {
        constraint: ConstraintKind,
        data_kind: DataKind,
    },

    /// A constant field or variable column that does not exist.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A field name already used as a constant or a variable column.
    #[error("Field '{0}' is already defined in this acquisition")]
    DuplicateField(String),

    /// Variable row index outside the table.
    #[error("Series index {index} out of range ({len} series)")]
    SeriesOutOfRange { index: usize, len: usize },

    /// Acquisition name not present in the samples.
    #[error("Unknown acquisition: {0}")]
    UnknownAcquisition(String),

    /// Selected fields missing from the sampled data.
    #[error("Selected fields missing from samples: {0:?}")]
    MissingFields(Vec<String>),

    /// Field data rejected at the editing boundary.
    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// A value the compiler could only degrade, reported in strict mode.
    #[error("Cannot compile field '{field}': {message}")]
    Compile { field: String, message: String },

    /// Error raised by an injected compliance service.
    #[error("Compliance service error: {0}")]
    Service(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for acqschema operations.
pub type Result<T> = std::result::Result<T, AcqSchemaError>;
