//! ServerBuilder for fluent API to build the HTTP server

use super::router::{build_health_routes, build_payment_routes};
use crate::bank::BankSimulatorClient;
use crate::config::GatewayConfig;
use crate::core::clock::Clock;
use crate::core::processor::PaymentProcessor;
use crate::core::service::BankAuthorizer;
use crate::core::store::PaymentStore;
use crate::payments::handlers::AppState;
use crate::storage::InMemoryPaymentStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the gateway's HTTP server
///
/// Anything not set explicitly falls back to the configuration: an in-memory
/// store and a bank simulator client pointed at `bank.url`.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(GatewayConfig::default())
///     .with_store(InMemoryPaymentStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: GatewayConfig,
    store: Option<Arc<dyn PaymentStore>>,
    authorizer: Option<Arc<dyn BankAuthorizer>>,
    clock: Option<Arc<dyn Clock>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            config: GatewayConfig::default(),
            store: None,
            authorizer: None,
            clock: None,
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the payment store
    pub fn with_store(mut self, store: impl PaymentStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set the bank authorizer, replacing the configured bank simulator client
    pub fn with_authorizer(mut self, authorizer: impl BankAuthorizer + 'static) -> Self {
        self.authorizer = Some(Arc::new(authorizer));
        self
    }

    /// Set the clock used for card expiry checks
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Build the payment processor from the registered components
    pub fn build_processor(&mut self) -> Result<PaymentProcessor> {
        self.config.validate()?;

        let store: Arc<dyn PaymentStore> = match self.store.take() {
            Some(store) => store,
            None => Arc::new(InMemoryPaymentStore::new()),
        };

        let authorizer: Arc<dyn BankAuthorizer> = match self.authorizer.take() {
            Some(authorizer) => authorizer,
            None => Arc::new(BankSimulatorClient::from_config(&self.config.bank)?),
        };

        let mut processor = PaymentProcessor::new(store, authorizer);
        if let Some(clock) = self.clock.take() {
            processor = processor.with_clock(clock);
        }

        Ok(processor)
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let processor = self.build_processor()?;
        let state = AppState {
            processor: Arc::new(processor),
        };

        let app = build_health_routes().merge(build_payment_routes(state));

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let bank_url = self.config.bank.url.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!(bank_url = %bank_url, "Payment gateway listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::payment::{AuthorizationStatus, ValidatedPayment};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    struct AlwaysAuthorize;

    #[async_trait]
    impl BankAuthorizer for AlwaysAuthorize {
        async fn authorize(&self, _payment: &ValidatedPayment) -> AuthorizationStatus {
            AuthorizationStatus::Authorized
        }
    }

    #[test]
    fn test_build_with_defaults() {
        assert!(ServerBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = GatewayConfig::default();
        config.bank.url = "bank.local".to_string();

        let result = ServerBuilder::new().with_config(config).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_fluent_chaining_full_pipeline() {
        let result = ServerBuilder::new()
            .with_config(GatewayConfig::default())
            .with_store(InMemoryPaymentStore::new())
            .with_authorizer(AlwaysAuthorize)
            .with_clock(FixedClock(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()))
            .build();
        assert!(result.is_ok(), "full fluent pipeline should succeed");
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = ServerBuilder::new().with_authorizer(AlwaysAuthorize).build().unwrap();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
