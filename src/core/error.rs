//! Typed error handling for the payment gateway
//!
//! Validation failures are not errors: a rejected payment is a normal
//! [`PaymentOutcome`](crate::core::payment::PaymentOutcome). Bank failures are
//! not errors either, the bank client turns them into declines. What is left
//! is covered here.
//!
//! # Error Categories
//!
//! - [`PaymentError`]: lookups of processed payments
//! - [`RequestError`]: malformed HTTP input outside the payment body
//! - [`ConfigError`]: configuration loading and validation
//! - [`StorageError`]: payment store failures
//!
//! # Example
//!
//! ```rust,ignore
//! match processor.get_by_id(&id).await {
//!     Ok(record) => println!("{} is {}", record.id, record.status),
//!     Err(GatewayError::Payment(PaymentError::NotFound { id })) => {
//!         println!("payment {} not found", id);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the gateway
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Payment lookup errors
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl GatewayError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Payment(e) => e.status_code(),
            GatewayError::Request(e) => e.status_code(),
            GatewayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::Payment(e) => e.error_code(),
            GatewayError::Request(e) => e.error_code(),
            GatewayError::Config(_) => "CONFIG_ERROR",
            GatewayError::Storage(_) => "STORAGE_ERROR",
            GatewayError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    ///
    /// Server-side failures get a generic message; their details only go to the log.
    pub fn to_response(&self) -> ErrorResponse {
        let message = if self.status_code().is_server_error() {
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        ErrorResponse { message }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<anyhow::Error> for GatewayError {
    fn from(err: anyhow::Error) -> Self {
        GatewayError::Internal(err.to_string())
    }
}

// =============================================================================
// Payment Errors
// =============================================================================

/// Errors related to processed payments
#[derive(Debug, Error)]
pub enum PaymentError {
    /// No payment was stored under this id
    #[error("payment not found")]
    NotFound { id: Uuid },
}

impl PaymentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PaymentError::NotFound { .. } => "PAYMENT_NOT_FOUND",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Path segment is not a canonical payment id
    #[error("invalid payment id")]
    InvalidPaymentId { value: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidPaymentId { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidPaymentId { .. } => "INVALID_PAYMENT_ID",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error(
        "Failed to parse config{}: {message}",
        .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default()
    )]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found or unreadable
    #[error("Failed to read configuration file '{path}': {message}")]
    Io { path: String, message: String },
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the payment store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Store operation failed
    #[error("Storage {operation} failed: {message}")]
    OperationFailed { operation: String, message: String },
}
