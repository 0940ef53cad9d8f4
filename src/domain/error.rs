//! Domain Error Types
//!
//! Pure domain errors that don't depend on the messaging or HTTP layers.

use thiserror::Error;

/// Field-level invariant violation at Command or record construction.
///
/// These are surfaced immediately to the caller; an invalid command or
/// record is never silently coerced into a valid one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Amount was zero or negative
    #[error("amount must be positive (got {0})")]
    NonPositiveAmount(rust_decimal::Decimal),

    /// A required text field was empty or whitespace-only
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
}

impl ValidationError {
    pub fn empty_field(field: &'static str) -> Self {
        Self::EmptyField { field }
    }
}

/// Business-rule rejection during handling.
///
/// Returned by the processing handler as a tagged result; the consumer
/// pattern-matches on it to decide persist-vs-dead-letter. A
/// `ProcessingError` always causes dead-lettering and is never retried
/// in-process.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcessingError {
    /// The record's description or classifier contains the error keyword
    #[error("record {id} rejected: error keyword present in description or {field}")]
    ErrorKeyword { id: String, field: &'static str },

    /// Re-validation of the record derived from the command failed
    #[error("failed to process record {id}: {source}")]
    Validation {
        id: String,
        #[source]
        source: ValidationError,
    },
}

impl ProcessingError {
    /// Identifier of the record that failed processing.
    pub fn record_id(&self) -> &str {
        match self {
            Self::ErrorKeyword { id, .. } => id,
            Self::Validation { id, .. } => id,
        }
    }
}
