//! HTTP surface for payments
//!
//! Thin plumbing over [`PaymentProcessor`](crate::core::processor::PaymentProcessor):
//! body extraction, id parsing and the mapping of outcomes to status codes.

pub mod handlers;

pub use handlers::{AppState, RejectedPaymentResponse, get_payment, process_payment};
