//! finance_dlq - Financial event pipeline with dead-letter routing
//!
//! Accepts expense/income records over HTTP, routes them through bounded
//! in-process queues, validates and persists them, and diverts
//! unprocessable messages to per-kind dead-letter queues enriched with
//! failure metadata.

use std::net::SocketAddr;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finance_dlq::api::{self, AppState};
use finance_dlq::broker::{Consumer, DeadLetterObserver, DeadLetterPublisher, Topology};
use finance_dlq::domain::{RecordExpense, RecordIncome, RecordKind};
use finance_dlq::handlers::ProcessingHandler;
use finance_dlq::repository::InMemoryRecordStore;
use finance_dlq::Config;

/// Initialize tracing/logging
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finance_dlq=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the application router
fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(api::create_router().with_state(state))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("Starting finance_dlq server");

    // Provision queue topology
    let topology = Topology::provision(&config);
    let dead_letters = DeadLetterPublisher::new(
        topology.expense.dead_letter.sender.clone(),
        topology.income.dead_letter.sender.clone(),
    );

    // One store per event kind, explicitly injected into its handler
    let expense_store = InMemoryRecordStore::new();
    let income_store = InMemoryRecordStore::new();

    // Spawn consumers and dead-letter observers
    tokio::spawn(
        Consumer::<RecordExpense>::new(
            ProcessingHandler::new(expense_store),
            dead_letters.clone(),
        )
        .run(topology.expense.inbound.receiver),
    );
    tokio::spawn(
        Consumer::<RecordIncome>::new(
            ProcessingHandler::new(income_store),
            dead_letters.clone(),
        )
        .run(topology.income.inbound.receiver),
    );
    tokio::spawn(
        DeadLetterObserver::new(RecordKind::Expense).run(topology.expense.dead_letter.receiver),
    );
    tokio::spawn(
        DeadLetterObserver::new(RecordKind::Income).run(topology.income.dead_letter.receiver),
    );

    let state = AppState {
        expense_queue: topology.expense.inbound.sender.clone(),
        income_queue: topology.income.inbound.sender.clone(),
    };

    tracing::info!("Listening on http://{}", addr);

    // Build router and start server
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down. Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
