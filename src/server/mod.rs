//! Server module for building the gateway's HTTP server
//!
//! This module provides a `ServerBuilder` that wires the payment processor to
//! its collaborators and registers:
//! - Payment routes (`POST /payment`, `GET /payment/{id}`)
//! - Health check routes

pub mod builder;
pub mod router;

pub use builder::ServerBuilder;
