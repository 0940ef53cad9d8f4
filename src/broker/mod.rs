//! Messaging layer
//!
//! Queue topology, consumers and the dead-letter publisher.

pub mod consumer;
pub mod dead_letter;
pub mod queue;

pub use consumer::{ConsumeError, Consumer, DeadLetterObserver};
pub use dead_letter::{DeadLetterEnvelope, DeadLetterPublisher};
pub use queue::{KindQueues, PublishError, Queue, QueueSender, Topology};
