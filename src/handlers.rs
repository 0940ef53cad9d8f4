//! Processing handler
//!
//! Converts a command into a domain record, applies business validation
//! and persists the result. One generic handler covers both event kinds;
//! the command type selects the kind at the call site.

use crate::domain::{FinancialCommand, FinancialRecord, ProcessingError};
use crate::repository::InMemoryRecordStore;

/// Handler for the command -> record -> persist sequence.
///
/// Outcomes are a tagged result: `Ok(record)` means the `Processed` record
/// was saved in full; `Err` means nothing was saved for that identifier.
/// There is no partial persistence.
#[derive(Debug, Clone)]
pub struct ProcessingHandler {
    store: InMemoryRecordStore,
}

impl ProcessingHandler {
    pub fn new(store: InMemoryRecordStore) -> Self {
        Self { store }
    }

    /// Process one command.
    ///
    /// # Errors
    /// - `ProcessingError::Validation` if record-level re-validation fails
    /// - `ProcessingError::ErrorKeyword` if the description or classifier
    ///   contains the error keyword
    pub async fn process<C: FinancialCommand>(
        &self,
        command: &C,
    ) -> Result<FinancialRecord, ProcessingError> {
        tracing::info!(id = command.id(), kind = %C::KIND, "processing command");

        let record = command
            .to_record()
            .map_err(|source| ProcessingError::Validation {
                id: command.id().to_string(),
                source,
            })?;

        self.validate(&record)?;

        let processed = record.mark_as_processed();
        self.store.save(processed.clone()).await;

        tracing::info!(id = processed.id(), kind = %C::KIND, "command processed successfully");
        Ok(processed)
    }

    fn validate(&self, record: &FinancialRecord) -> Result<(), ProcessingError> {
        if record.contains_error_keyword() {
            return Err(ProcessingError::ErrorKeyword {
                id: record.id().to_string(),
                field: record.kind().classifier_field(),
            });
        }

        tracing::debug!(id = record.id(), "validation passed");
        Ok(())
    }

    pub fn store(&self) -> &InMemoryRecordStore {
        &self.store
    }
}
