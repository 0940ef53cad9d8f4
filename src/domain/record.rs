//! Financial record
//!
//! Validated, stateful internal representation of one financial event.
//! Expense and income share this single shape; what differs between them
//! is captured by [`RecordKind`] and the classifier field it labels.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::amount::Amount;
use super::error::ValidationError;

/// Substring that marks a record as unprocessable. "error" also matches,
/// since it contains "erro". Exists specifically so the failure path can
/// be exercised end-to-end.
const ERROR_KEYWORD: &str = "erro";

/// The two kinds of financial event the pipeline routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Expense,
    Income,
}

impl RecordKind {
    /// Wire name used as `messageType` in dead-letter envelopes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "EXPENSE",
            Self::Income => "INCOME",
        }
    }

    /// Name of the kind-specific classifier field on the wire.
    pub fn classifier_field(&self) -> &'static str {
        match self {
            Self::Expense => "category",
            Self::Income => "source",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Processing status of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordStatus {
    Pending,
    Processed,
    Failed,
}

/// A validated financial event with processing status.
///
/// Created `Pending` from a command inside the handler. Status transitions
/// produce a new record; the receiver is never mutated in place, so records
/// can be shared safely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecord {
    kind: RecordKind,
    id: String,
    description: String,
    amount: Amount,
    classifier: String,
    occurred_at: DateTime<Utc>,
    status: RecordStatus,
}

impl FinancialRecord {
    /// Build a `Pending` record from raw fields.
    ///
    /// Validation is applied here independently of command construction,
    /// since records can also be built directly (e.g. in tests).
    ///
    /// # Errors
    /// - `ValidationError::NonPositiveAmount` if amount <= 0
    /// - `ValidationError::EmptyField` if description or the classifier is
    ///   empty or whitespace-only
    pub fn new(
        kind: RecordKind,
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        classifier: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        let classifier = classifier.into();

        let amount = Amount::new(amount)?;
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        if classifier.trim().is_empty() {
            return Err(ValidationError::empty_field(kind.classifier_field()));
        }

        Ok(Self {
            kind,
            id: id.into(),
            description,
            amount,
            classifier,
            occurred_at,
            status: RecordStatus::Pending,
        })
    }

    /// True iff the lowercase description or classifier contains the error
    /// keyword. This is the one business rule deciding success vs. failure.
    pub fn contains_error_keyword(&self) -> bool {
        self.description.to_lowercase().contains(ERROR_KEYWORD)
            || self.classifier.to_lowercase().contains(ERROR_KEYWORD)
    }

    /// Copy of this record with status `Processed`.
    pub fn mark_as_processed(&self) -> Self {
        Self {
            status: RecordStatus::Processed,
            ..self.clone()
        }
    }

    /// Copy of this record with status `Failed`.
    pub fn mark_as_failed(&self) -> Self {
        Self {
            status: RecordStatus::Failed,
            ..self.clone()
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }
}

// Identity is the identifier alone; field values do not participate.
impl PartialEq for FinancialRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FinancialRecord {}

impl Hash for FinancialRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
