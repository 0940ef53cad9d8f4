//! Command definitions
//!
//! Commands are immutable, externally-supplied instructions to record one
//! financial event. They carry a caller-assigned identifier, travel as
//! JSON over the inbound queues and are deserialized by the consumers.
//!
//! The two wire variants differ only in their classifier field name
//! (`category` vs `source`); the [`FinancialCommand`] trait lets the rest
//! of the pipeline stay generic over the kind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::error::ValidationError;
use super::record::{FinancialRecord, RecordKind};

/// Capability shared by the expense and income commands, so handlers and
/// consumers are written once and instantiated per kind.
pub trait FinancialCommand:
    Serialize + DeserializeOwned + fmt::Debug + Clone + Send + Sync + 'static
{
    /// Kind this command records; also selects queue routing.
    const KIND: RecordKind;

    fn id(&self) -> &str;
    fn description(&self) -> &str;
    fn amount(&self) -> Amount;
    fn classifier(&self) -> &str;
    fn date_time(&self) -> DateTime<Utc>;

    /// Materialize the `Pending` domain record for this command, applying
    /// record-level validation independently of command construction.
    fn to_record(&self) -> Result<FinancialRecord, ValidationError> {
        FinancialRecord::new(
            Self::KIND,
            self.id(),
            self.description(),
            self.amount().value(),
            self.classifier(),
            self.date_time(),
        )
    }
}

/// Command to record one expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordExpense {
    pub id: String,
    pub description: String,
    pub amount: Amount,
    pub category: String,
    pub date_time: DateTime<Utc>,
}

impl RecordExpense {
    /// Construct a validated command.
    ///
    /// # Errors
    /// `ValidationError` if amount <= 0 or description/category is empty.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        date_time: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        let category = category.into();

        let amount = Amount::new(amount)?;
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        if category.trim().is_empty() {
            return Err(ValidationError::empty_field("category"));
        }

        Ok(Self {
            id: id.into(),
            description,
            amount,
            category,
            date_time,
        })
    }
}

impl FinancialCommand for RecordExpense {
    const KIND: RecordKind = RecordKind::Expense;

    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn classifier(&self) -> &str {
        &self.category
    }

    fn date_time(&self) -> DateTime<Utc> {
        self.date_time
    }
}

/// Command to record one income.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordIncome {
    pub id: String,
    pub description: String,
    pub amount: Amount,
    pub source: String,
    pub date_time: DateTime<Utc>,
}

impl RecordIncome {
    /// Construct a validated command.
    ///
    /// # Errors
    /// `ValidationError` if amount <= 0 or description/source is empty.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        amount: Decimal,
        source: impl Into<String>,
        date_time: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let description = description.into();
        let source = source.into();

        let amount = Amount::new(amount)?;
        if description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        if source.trim().is_empty() {
            return Err(ValidationError::empty_field("source"));
        }

        Ok(Self {
            id: id.into(),
            description,
            amount,
            source,
            date_time,
        })
    }
}

impl FinancialCommand for RecordIncome {
    const KIND: RecordKind = RecordKind::Income;

    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn classifier(&self) -> &str {
        &self.source
    }

    fn date_time(&self) -> DateTime<Utc> {
        self.date_time
    }
}
