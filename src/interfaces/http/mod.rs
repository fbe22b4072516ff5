//! JSON-over-HTTP surface of the payment backend.

pub mod error;
pub mod payment;

use crate::application::payments::PaymentService;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler.
///
/// Built once per process; tests build a fresh one per case.
#[derive(Clone)]
pub struct AppState {
    pub payments: Arc<PaymentService>,
}

impl AppState {
    pub fn new(payments: PaymentService) -> Self {
        Self {
            payments: Arc::new(payments),
        }
    }
}

/// Assemble the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(payment::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
