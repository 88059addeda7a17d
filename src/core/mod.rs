//! Core module containing the payment domain: types, validation and orchestration

pub mod clock;
pub mod error;
pub mod payment;
pub mod processor;
pub mod service;
pub mod store;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, GatewayError, PaymentError, RequestError, StorageError};
pub use payment::{
    AuthorizationStatus, Currency, PaymentOutcome, PaymentRecord, PaymentRequest, ValidatedPayment,
};
pub use processor::PaymentProcessor;
pub use service::BankAuthorizer;
pub use store::PaymentStore;
pub use validation::{RejectionReason, Violation, validate_request};
