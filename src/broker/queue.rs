//! In-process queue topology
//!
//! Bounded mpsc channels stand in for the broker: each event kind gets a
//! main queue and a dead-letter queue, declared from configuration. The
//! topology is declarative; routing logic lives in the consumer and the
//! dead-letter publisher.

use thiserror::Error;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::domain::RecordKind;

/// Transport failure while sending to a queue.
#[derive(Debug, Error)]
pub enum PublishError {
    /// All receivers are gone; the queue can never deliver again
    #[error("queue {queue} is closed")]
    Closed { queue: String },
}

/// Sending half of a declared queue. Cloneable; payloads are opaque
/// serialized strings, one message per send.
#[derive(Debug, Clone)]
pub struct QueueSender {
    name: String,
    tx: mpsc::Sender<String>,
}

impl QueueSender {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Enqueue one payload, waiting for capacity if the queue is full.
    ///
    /// # Errors
    /// `PublishError::Closed` if the consuming side has been dropped.
    pub async fn publish(&self, payload: String) -> Result<(), PublishError> {
        self.tx.send(payload).await.map_err(|_| PublishError::Closed {
            queue: self.name.clone(),
        })
    }
}

/// A declared queue: sender plus the single receiving end.
#[derive(Debug)]
pub struct Queue {
    pub sender: QueueSender,
    pub receiver: mpsc::Receiver<String>,
}

impl Queue {
    /// Declare a bounded queue with the given name and capacity.
    pub fn declare(name: impl Into<String>, capacity: usize) -> Self {
        let name = name.into();
        let (tx, receiver) = mpsc::channel(capacity);
        tracing::debug!(queue = %name, capacity, "queue declared");
        Self {
            sender: QueueSender { name, tx },
            receiver,
        }
    }
}

/// Main queue and dead-letter queue for one event kind.
#[derive(Debug)]
pub struct KindQueues {
    pub inbound: Queue,
    pub dead_letter: Queue,
}

/// The full provisioned topology: one queue pair per event kind.
#[derive(Debug)]
pub struct Topology {
    pub expense: KindQueues,
    pub income: KindQueues,
}

impl Topology {
    /// Provision all queues from configuration.
    pub fn provision(config: &Config) -> Self {
        Self {
            expense: KindQueues {
                inbound: Queue::declare(&config.expense_queue, config.queue_capacity),
                dead_letter: Queue::declare(&config.expense_dlq, config.queue_capacity),
            },
            income: KindQueues {
                inbound: Queue::declare(&config.income_queue, config.queue_capacity),
                dead_letter: Queue::declare(&config.income_dlq, config.queue_capacity),
            },
        }
    }

    pub fn kind(&self, kind: RecordKind) -> &KindQueues {
        match kind {
            RecordKind::Expense => &self.expense,
            RecordKind::Income => &self.income,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_and_receive() {
        let mut queue = Queue::declare("finance.expense", 4);
        queue.sender.publish("payload".to_string()).await.unwrap();

        let received = queue.receiver.recv().await.unwrap();
        assert_eq!(received, "payload");
    }

    #[tokio::test]
    async fn test_publish_to_closed_queue_fails() {
        let queue = Queue::declare("finance.expense", 4);
        let sender = queue.sender.clone();
        drop(queue.receiver);

        let err = sender.publish("payload".to_string()).await.unwrap_err();
        assert!(matches!(err, PublishError::Closed { .. }));
        assert!(err.to_string().contains("finance.expense"));
    }

    #[test]
    fn test_topology_provisions_all_four_queues() {
        let config = Config::for_tests();
        let topology = Topology::provision(&config);
        assert_eq!(topology.expense.inbound.sender.name(), config.expense_queue);
        assert_eq!(
            topology.kind(RecordKind::Income).dead_letter.sender.name(),
            config.income_dlq
        );
    }
}
