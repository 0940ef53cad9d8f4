//! Domain layer
//!
//! Commands, records and validation rules, independent of messaging and HTTP.

pub mod amount;
pub mod commands;
pub mod error;
pub mod record;

pub use amount::Amount;
pub use commands::{FinancialCommand, RecordExpense, RecordIncome};
pub use error::{ProcessingError, ValidationError};
pub use record::{FinancialRecord, RecordKind, RecordStatus};
