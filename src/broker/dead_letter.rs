//! Dead-letter publisher
//!
//! Wraps an undeliverable message and its failure into a structured
//! envelope and republishes it to the kind-specific dead-letter queue.
//! Delivery is best-effort: this publisher is only ever invoked on a
//! failure path, so it must never raise back into the consumer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::RecordKind;

use super::consumer::ConsumeError;
use super::queue::QueueSender;

/// Structured wrapper around a failed message.
///
/// `original_message` is the exact raw payload the consumer received,
/// byte-for-byte, never a re-serialization of a partially-built command.
/// `retry_count` is initialized to 0; no retry loop currently increments
/// it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadLetterEnvelope {
    pub original_message: String,
    pub error_message: String,
    pub error_type: String,
    pub message_type: RecordKind,
    pub timestamp: DateTime<Utc>,
    pub retry_count: u32,
}

impl DeadLetterEnvelope {
    pub fn new(kind: RecordKind, original_message: &str, failure: &ConsumeError) -> Self {
        Self {
            original_message: original_message.to_string(),
            error_message: failure.to_string(),
            error_type: failure.error_type().to_string(),
            message_type: kind,
            timestamp: Utc::now(),
            retry_count: 0,
        }
    }
}

/// Publisher onto the per-kind dead-letter queues.
#[derive(Debug, Clone)]
pub struct DeadLetterPublisher {
    expense_dlq: QueueSender,
    income_dlq: QueueSender,
}

impl DeadLetterPublisher {
    pub fn new(expense_dlq: QueueSender, income_dlq: QueueSender) -> Self {
        Self {
            expense_dlq,
            income_dlq,
        }
    }

    /// Build and emit an envelope for one failed delivery attempt.
    ///
    /// Both failure tiers are swallowed: a serialization failure is logged
    /// and the publish abandoned; a send failure likewise. Silent loss of
    /// the diagnostic record is accepted on this path.
    pub async fn publish(&self, kind: RecordKind, original_message: &str, failure: &ConsumeError) {
        tracing::warn!(
            kind = %kind,
            error = %failure,
            "publishing message to dead-letter queue after processing failure"
        );

        let envelope = DeadLetterEnvelope::new(kind, original_message, failure);
        let payload = match serde_json::to_string(&envelope) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(kind = %kind, error = %e, "failed to serialize dead-letter envelope");
                return;
            }
        };

        let queue = match kind {
            RecordKind::Expense => &self.expense_dlq,
            RecordKind::Income => &self.income_dlq,
        };

        match queue.publish(payload).await {
            Ok(()) => {
                tracing::info!(queue = queue.name(), "message published to dead-letter queue")
            }
            Err(e) => {
                tracing::error!(queue = queue.name(), error = %e, "failed to publish to dead-letter queue")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broker::queue::Queue;
    use crate::domain::ProcessingError;

    fn keyword_failure(id: &str) -> ConsumeError {
        ConsumeError::Process(ProcessingError::ErrorKeyword {
            id: id.to_string(),
            field: "category",
        })
    }

    #[test]
    fn test_envelope_preserves_original_payload_verbatim() {
        let raw = r#"{"id":"e2","description":"erro de sistema","amount":5.00"#; // truncated on purpose
        let failure = keyword_failure("e2");
        let envelope = DeadLetterEnvelope::new(RecordKind::Expense, raw, &failure);

        assert_eq!(envelope.original_message, raw);
        assert_eq!(envelope.error_type, "ProcessingError");
        assert_eq!(envelope.message_type, RecordKind::Expense);
        assert_eq!(envelope.retry_count, 0);
    }

    #[test]
    fn test_envelope_wire_format() {
        let failure = keyword_failure("e2");
        let envelope = DeadLetterEnvelope::new(RecordKind::Income, "raw", &failure);
        let json: serde_json::Value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["messageType"], "INCOME");
        assert_eq!(json["retryCount"], 0);
        assert!(json.get("originalMessage").is_some());
        assert!(json.get("errorMessage").is_some());
        assert!(json.get("errorType").is_some());
        assert!(json.get("timestamp").is_some());
    }

    #[tokio::test]
    async fn test_publish_routes_to_kind_specific_queue() {
        let mut expense_dlq = Queue::declare("finance.expense.dlq", 4);
        let mut income_dlq = Queue::declare("finance.income.dlq", 4);
        let publisher =
            DeadLetterPublisher::new(expense_dlq.sender.clone(), income_dlq.sender.clone());

        publisher
            .publish(RecordKind::Income, "raw income", &keyword_failure("i1"))
            .await;

        let payload = income_dlq.receiver.recv().await.unwrap();
        let envelope: DeadLetterEnvelope = serde_json::from_str(&payload).unwrap();
        assert_eq!(envelope.original_message, "raw income");
        assert!(expense_dlq.receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_swallows_send_failure() {
        let expense_dlq = Queue::declare("finance.expense.dlq", 4);
        let income_dlq = Queue::declare("finance.income.dlq", 4);
        let publisher =
            DeadLetterPublisher::new(expense_dlq.sender.clone(), income_dlq.sender.clone());

        // Closed queue; the publish must not panic or propagate
        drop(expense_dlq.receiver);
        publisher
            .publish(RecordKind::Expense, "raw", &keyword_failure("e1"))
            .await;
    }
}
