//! HTTP client for the bank simulator
//!
//! Every failure collapses into a decline: non-200 statuses, connection errors,
//! timeouts and undecodable bodies all produce [`AuthorizationStatus::Declined`].
//! There is no retry; each submission is decided by a single call.

use crate::config::BankConfig;
use crate::core::error::ConfigError;
use crate::core::payment::{AuthorizationStatus, Currency, ValidatedPayment};
use crate::core::service::BankAuthorizer;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Body sent to the bank simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAuthorizationRequest {
    pub card_number: String,
    /// `MM/YY`
    pub expiry_date: String,
    pub currency: Currency,
    pub amount: u64,
    pub cvv: String,
}

impl From<&ValidatedPayment> for BankAuthorizationRequest {
    fn from(payment: &ValidatedPayment) -> Self {
        Self {
            card_number: payment.card_number().to_string(),
            expiry_date: payment.expiry_date(),
            currency: payment.currency(),
            amount: payment.amount(),
            cvv: payment.cvv().to_string(),
        }
    }
}

/// Body returned by the bank simulator on success
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAuthorizationResponse {
    pub authorized: bool,
    #[serde(default)]
    pub authorization_code: Option<String>,
}

/// Why a bank call did not produce a verdict
#[derive(Debug, Error)]
enum BankCallError {
    #[error("bank responded with status {0}")]
    Status(StatusCode),

    #[error("bank call failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Bank authorizer backed by the bank simulator's HTTP API
#[derive(Clone)]
pub struct BankSimulatorClient {
    http: reqwest::Client,
    url: String,
}

impl BankSimulatorClient {
    /// Client without a request timeout
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Client configured from the `bank` configuration section
    pub fn from_config(config: &BankConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        let http = builder.build().map_err(|e| ConfigError::InvalidValue {
            field: "bank".to_string(),
            value: config.url.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, payment: &ValidatedPayment) -> Result<AuthorizationStatus, BankCallError> {
        let response = self
            .http
            .post(&self.url)
            .json(&BankAuthorizationRequest::from(payment))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BankCallError::Status(status));
        }

        let body: BankAuthorizationResponse = response.json().await?;
        Ok(if body.authorized {
            AuthorizationStatus::Authorized
        } else {
            AuthorizationStatus::Declined
        })
    }
}

#[async_trait]
impl BankAuthorizer for BankSimulatorClient {
    async fn authorize(&self, payment: &ValidatedPayment) -> AuthorizationStatus {
        tracing::debug!(
            card_last_four = payment.last_four(),
            url = %self.url,
            "Calling bank simulator"
        );

        match self.call(payment).await {
            Ok(status) => {
                tracing::debug!(%status, "Bank simulator answered");
                status
            }
            Err(BankCallError::Status(status)) if status == StatusCode::BAD_REQUEST => {
                tracing::warn!("Bank simulator rejected the request format (400), declining");
                AuthorizationStatus::Declined
            }
            Err(BankCallError::Status(status)) if status == StatusCode::SERVICE_UNAVAILABLE => {
                tracing::info!("Bank simulator unavailable (503), declining");
                AuthorizationStatus::Declined
            }
            Err(err) => {
                tracing::error!(error = %err, "Bank simulator call failed, declining");
                AuthorizationStatus::Declined
            }
        }
    }
}
