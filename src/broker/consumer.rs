//! Queue consumers
//!
//! [`Consumer`] drains an inbound queue: each payload is deserialized into
//! a command, delegated to the processing handler, and on any failure the
//! original raw payload plus the failure is routed to the dead-letter
//! publisher. [`DeadLetterObserver`] drains a dead-letter queue and only
//! records what arrived there.

use std::marker::PhantomData;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::{FinancialCommand, FinancialRecord, ProcessingError, RecordKind};
use crate::handlers::ProcessingHandler;

use super::dead_letter::{DeadLetterEnvelope, DeadLetterPublisher};

/// Why a received message could not be delivered.
#[derive(Debug, Error)]
pub enum ConsumeError {
    /// Payload did not deserialize into a well-formed command
    #[error("malformed payload: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The handler rejected the command
    #[error(transparent)]
    Process(#[from] ProcessingError),
}

impl ConsumeError {
    /// Failure kind name recorded as `errorType` in the envelope.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Deserialize(_) => "DeserializationError",
            Self::Process(_) => "ProcessingError",
        }
    }
}

/// Consumer for one event kind's inbound queue.
///
/// Per message the outcome is either delivered (handler completed, record
/// persisted) or dead-lettered; nothing is retried in-process and no
/// deduplication happens at this layer.
#[derive(Debug, Clone)]
pub struct Consumer<C> {
    handler: ProcessingHandler,
    dead_letters: DeadLetterPublisher,
    _command: PhantomData<fn() -> C>,
}

impl<C: FinancialCommand> Consumer<C> {
    pub fn new(handler: ProcessingHandler, dead_letters: DeadLetterPublisher) -> Self {
        Self {
            handler,
            dead_letters,
            _command: PhantomData,
        }
    }

    /// Drain the inbound queue until it closes. Each message runs to
    /// completion before the next is received.
    pub async fn run(self, mut inbound: mpsc::Receiver<String>) {
        tracing::info!(kind = %C::KIND, "consumer started");
        while let Some(payload) = inbound.recv().await {
            self.consume(&payload).await;
        }
        tracing::info!(kind = %C::KIND, "inbound queue closed, consumer stopping");
    }

    /// Handle one delivery. Failures are terminal here: they are reported
    /// to the dead-letter publisher, never propagated.
    pub async fn consume(&self, payload: &str) {
        tracing::info!(kind = %C::KIND, payload, "received message");

        match self.try_consume(payload).await {
            Ok(record) => {
                tracing::info!(kind = %C::KIND, id = record.id(), "message processed successfully");
            }
            Err(failure) => {
                tracing::error!(kind = %C::KIND, error = %failure, "failed to process message");
                self.dead_letters.publish(C::KIND, payload, &failure).await;
            }
        }
    }

    async fn try_consume(&self, payload: &str) -> Result<FinancialRecord, ConsumeError> {
        let command: C = serde_json::from_str(payload)?;
        let record = self.handler.process(&command).await?;
        Ok(record)
    }
}

/// Observer for a dead-letter queue.
///
/// Records that a message arrived and performs no recovery action; a
/// placeholder seam for manual review or reprocessing tooling.
#[derive(Debug, Clone)]
pub struct DeadLetterObserver {
    kind: RecordKind,
}

impl DeadLetterObserver {
    pub fn new(kind: RecordKind) -> Self {
        Self { kind }
    }

    pub async fn run(self, mut dead_letters: mpsc::Receiver<String>) {
        tracing::info!(kind = %self.kind, "dead-letter observer started");
        while let Some(payload) = dead_letters.recv().await {
            self.observe(&payload);
        }
        tracing::info!(kind = %self.kind, "dead-letter queue closed, observer stopping");
    }

    fn observe(&self, payload: &str) {
        tracing::warn!(kind = %self.kind, payload, "message arrived in dead-letter queue");

        match serde_json::from_str::<DeadLetterEnvelope>(payload) {
            Ok(envelope) => tracing::info!(
                kind = %self.kind,
                error_type = envelope.error_type,
                retry_count = envelope.retry_count,
                "dead-lettered message recorded for manual review"
            ),
            Err(e) => tracing::error!(kind = %self.kind, error = %e, "unreadable dead-letter payload"),
        }
    }
}
