//! Core error types.
//!
//! There is no not-found variant: lookups return `Option` and
//! update/remove calls return `bool`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the entry model, the codec, and the data store.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A field failed validation at construction or mutation time.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A task with the same id is already in the collection.
    #[error("duplicate entry id: {0}")]
    DuplicateId(String),

    /// A persisted line could not be decoded.
    #[error("malformed {kind} record{}: {reason}", line_suffix(.line))]
    MalformedRecord {
        kind: &'static str,
        line: Option<usize>,
        reason: String,
    },

    /// A data file could not be created, read, or written.
    #[error("storage error at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A numeric value (a 1-10 level, or an age) was outside its range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A required text field was empty or whitespace.
    #[error("{0} is required")]
    EmptyField(&'static str),

    /// Age must be a positive integer.
    #[error("age must be positive, got {0}")]
    NonPositiveAge(i64),
}

fn line_suffix(line: &Option<usize>) -> String {
    line.map(|n| format!(" at line {n}")).unwrap_or_default()
}

impl CoreError {
    pub(crate) fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        CoreError::MalformedRecord {
            kind,
            line: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CoreError::Storage {
            path: path.into(),
            source,
        }
    }

    /// Attach a 1-based line number to a malformed-record error.
    pub(crate) fn at_line(self, n: usize) -> Self {
        match self {
            CoreError::MalformedRecord { kind, reason, .. } => CoreError::MalformedRecord {
                kind,
                line: Some(n),
                reason,
            },
            other => other,
        }
    }

    /// Returns `true` for errors the caller can fix by changing its input.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }
}

/// Result alias used throughout `burnwatch-core`.
pub type Result<T> = std::result::Result<T, CoreError>;
