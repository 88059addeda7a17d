//! # Payment Gateway
//!
//! An HTTP payment gateway that sits between merchants and an acquiring bank.
//!
//! ## Features
//!
//! - **Validation**: every field of a submission is checked, and all violations
//!   are reduced to a single rejection reason
//! - **Bank authorization**: validated payments are forwarded to the bank
//!   simulator; every bank failure becomes a decline
//! - **Retrieval**: authorized and declined payments are stored and can be
//!   looked up by id, exposing only the last four card digits
//! - **Configuration**: YAML file plus `PAYMENT_GATEWAY_*` environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payment_gateway::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = GatewayConfig::default().apply_env_overrides()?;
//!     let addr = config.bind_address();
//!
//!     ServerBuilder::new()
//!         .with_config(config)
//!         .with_store(InMemoryPaymentStore::new())
//!         .serve(&addr)
//!         .await
//! }
//! ```

pub mod bank;
pub mod config;
pub mod core;
pub mod payments;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        clock::{Clock, FixedClock, SystemClock},
        error::{GatewayError, PaymentError},
        payment::{
            AuthorizationStatus, Currency, PaymentOutcome, PaymentRecord, PaymentRequest,
            ValidatedPayment,
        },
        processor::PaymentProcessor,
        service::BankAuthorizer,
        store::PaymentStore,
        validation::{Field, RejectionReason, Violation, validate_request},
    };

    // === Bank ===
    pub use crate::bank::BankSimulatorClient;

    // === Storage ===
    pub use crate::storage::InMemoryPaymentStore;

    // === Config ===
    pub use crate::config::{BankConfig, GatewayConfig, ServerConfig};

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use uuid::Uuid;
}
