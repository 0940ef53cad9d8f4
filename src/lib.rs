//! finance_dlq Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod broker;
pub mod domain;
pub mod handlers;
pub mod repository;

// Private modules (used only by main.rs binary)
pub mod config;
mod error;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use broker::{Consumer, DeadLetterEnvelope, DeadLetterObserver, DeadLetterPublisher, Topology};
pub use domain::{Amount, FinancialRecord, ProcessingError, RecordKind, RecordStatus, ValidationError};
pub use handlers::ProcessingHandler;
pub use repository::InMemoryRecordStore;
