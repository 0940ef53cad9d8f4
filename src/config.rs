//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Bounded capacity applied to every declared queue
    pub queue_capacity: usize,

    /// Expense main queue name
    pub expense_queue: String,

    /// Expense dead-letter queue name
    pub expense_dlq: String,

    /// Income main queue name
    pub income_queue: String,

    /// Income dead-letter queue name
    pub income_dlq: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT"))?;

        let queue_capacity = env::var("QUEUE_CAPACITY")
            .unwrap_or_else(|_| "256".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("QUEUE_CAPACITY"))?;
        if queue_capacity == 0 {
            return Err(ConfigError::InvalidValue("QUEUE_CAPACITY"));
        }

        let expense_queue =
            env::var("EXPENSE_QUEUE").unwrap_or_else(|_| "finance.expense".to_string());
        let expense_dlq =
            env::var("EXPENSE_DLQ").unwrap_or_else(|_| "finance.expense.dlq".to_string());
        let income_queue =
            env::var("INCOME_QUEUE").unwrap_or_else(|_| "finance.income".to_string());
        let income_dlq =
            env::var("INCOME_DLQ").unwrap_or_else(|_| "finance.income.dlq".to_string());

        Ok(Self {
            host,
            port,
            queue_capacity,
            expense_queue,
            expense_dlq,
            income_queue,
            income_dlq,
        })
    }

    /// Fixed configuration for tests, independent of the environment.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            queue_capacity: 16,
            expense_queue: "finance.expense".to_string(),
            expense_dlq: "finance.expense.dlq".to_string(),
            income_queue: "finance.income".to_string(),
            income_dlq: "finance.income.dlq".to_string(),
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
