//! Bank authorization clients
//!
//! Implementations of [`BankAuthorizer`](crate::core::service::BankAuthorizer)
//! that talk to an external acquiring bank.

pub mod simulator;

pub use simulator::{BankAuthorizationRequest, BankAuthorizationResponse, BankSimulatorClient};
