//! Error types for Vellum operations.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::kind::Kind;

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Vellum operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a type mismatch error for an operation applied to the wrong kind.
    #[must_use]
    pub fn type_mismatch(operation: impl Into<String>, actual: Kind) -> Self {
        Self::new(ErrorKind::TypeMismatch {
            operation: operation.into(),
            actual,
        })
    }

    /// Creates a malformed-input error (bad wire data, unparsable text).
    #[must_use]
    pub fn format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format(message.into()))
    }

    /// Creates a schema validation error.
    #[must_use]
    pub fn validation(severity: Severity, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation {
            severity,
            message: message.into(),
        })
    }

    /// Creates an unsupported-operation error.
    #[must_use]
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported(message.into()))
    }

    /// Creates an index out of range error.
    #[must_use]
    pub fn index_out_of_range(index: usize, size: usize) -> Self {
        Self::new(ErrorKind::IndexOutOfRange { index, size })
    }

    /// Creates a missing key error.
    #[must_use]
    pub fn missing_key(key: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingKey(key.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Operation applied to a variant of the wrong kind.
    #[error("attempt to {operation} a variant of kind {actual}")]
    TypeMismatch {
        /// The operation that was attempted, including any class detail.
        operation: String,
        /// The kind it was attempted on.
        actual: Kind,
    },

    /// Malformed input: bad wire data or unparsable canonical text.
    #[error("malformed input: {0}")]
    Format(String),

    /// Schema validation reported an issue.
    #[error("validation {severity}: {message}")]
    Validation {
        /// How serious the issue is.
        severity: Severity,
        /// Description of the issue.
        message: String,
    },

    /// Operation is not supported for this value or stream.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Index out of range.
    #[error("index {index} out of range (size {size})")]
    IndexOutOfRange {
        /// The index that was accessed.
        index: usize,
        /// The size of the collection.
        size: usize,
    },

    /// Key not present in a mapping.
    #[error("key not found: {0}")]
    MissingKey(String),

    /// Underlying I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Severity of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The document deviates from the schema but is still usable.
    Warning,
    /// The document violates the schema.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}
