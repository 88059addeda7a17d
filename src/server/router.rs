//! Router builder utilities

use crate::payments::handlers::{AppState, get_payment, process_payment};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Build payment routes
///
/// - POST /payment - Process a payment
/// - GET /payment/{id} - Retrieve a processed payment
pub fn build_payment_routes(state: AppState) -> Router {
    Router::new()
        .route("/payment", post(process_payment))
        .route("/payment/{id}", get(get_payment))
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "payment-gateway"
    }))
}
