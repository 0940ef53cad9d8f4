//! API module
//!
//! HTTP ingress for recording financial events.

pub mod routes;

pub use routes::{create_router, AppState};
