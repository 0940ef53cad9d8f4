//! API Routes
//!
//! HTTP ingress: a thin adapter that validates request shape, assigns a
//! fresh identifier and timestamp, and enqueues the command. Processing
//! happens asynchronously behind the queue.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::broker::QueueSender;
use crate::domain::{RecordExpense, RecordIncome};
use crate::error::AppError;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseRequest {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IncomeRequest {
    pub description: String,
    pub amount: Decimal,
    pub source: String,
}

/// Acknowledgement that a command was enqueued; processing is async.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordAccepted {
    pub id: String,
}

// =========================================================================
// Shared state
// =========================================================================

/// Queue senders handed to the ingress handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub expense_queue: QueueSender,
    pub income_queue: QueueSender,
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/api/expenses", post(record_expense))
        .route("/api/expenses/health", get(health))
        .route("/api/incomes", post(record_income))
        .route("/api/incomes/health", get(health))
}

// =========================================================================
// POST /api/expenses
// =========================================================================

/// Accept an expense, assign an identifier and enqueue the command
async fn record_expense(
    State(state): State<AppState>,
    Json(request): Json<ExpenseRequest>,
) -> Result<(StatusCode, Json<RecordAccepted>), AppError> {
    tracing::info!(?request, "received expense request");

    let id = Uuid::new_v4().to_string();
    let command = RecordExpense::new(
        id.clone(),
        request.description,
        request.amount,
        request.category,
        Utc::now(),
    )?;

    let payload = serde_json::to_string(&command)?;
    state.expense_queue.publish(payload).await?;

    tracing::info!(id, "expense command sent to queue");
    Ok((StatusCode::ACCEPTED, Json(RecordAccepted { id })))
}

// =========================================================================
// POST /api/incomes
// =========================================================================

/// Accept an income, assign an identifier and enqueue the command
async fn record_income(
    State(state): State<AppState>,
    Json(request): Json<IncomeRequest>,
) -> Result<(StatusCode, Json<RecordAccepted>), AppError> {
    tracing::info!(?request, "received income request");

    let id = Uuid::new_v4().to_string();
    let command = RecordIncome::new(
        id.clone(),
        request.description,
        request.amount,
        request.source,
        Utc::now(),
    )?;

    let payload = serde_json::to_string(&command)?;
    state.income_queue.publish(payload).await?;

    tracing::info!(id, "income command sent to queue");
    Ok((StatusCode::ACCEPTED, Json(RecordAccepted { id })))
}

/// Liveness probe
async fn health() -> &'static str {
    "OK"
}
