//! Payment orchestration
//!
//! ```text
//! Received -> [validation] -> Rejected                (not stored)
//! Received -> [validation OK] -> [bank] -> Authorized (stored)
//!                                       -> Declined   (stored)
//! ```
//!
//! No intermediate state is ever stored. A rejected submission never calls the
//! bank, never touches the store and never consumes an id.

use crate::core::clock::{Clock, SystemClock};
use crate::core::error::{GatewayError, PaymentError, StorageError};
use crate::core::payment::{PaymentOutcome, PaymentRecord, PaymentRequest};
use crate::core::service::BankAuthorizer;
use crate::core::store::PaymentStore;
use crate::core::validation::{RejectionReason, validate_request};
use std::sync::Arc;
use uuid::Uuid;

/// Sequences validation, authorization and persistence of payments
#[derive(Clone)]
pub struct PaymentProcessor {
    store: Arc<dyn PaymentStore>,
    authorizer: Arc<dyn BankAuthorizer>,
    clock: Arc<dyn Clock>,
}

impl PaymentProcessor {
    pub fn new(store: Arc<dyn PaymentStore>, authorizer: Arc<dyn BankAuthorizer>) -> Self {
        Self {
            store,
            authorizer,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for expiry checks
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Process one submission to a terminal outcome
    ///
    /// Only a store failure surfaces as an error; validation failures become
    /// [`PaymentOutcome::Rejected`] and bank failures become declines.
    pub async fn process(&self, request: &PaymentRequest) -> Result<PaymentOutcome, GatewayError> {
        let payment = match validate_request(request, self.clock.today()) {
            Ok(payment) => payment,
            Err(violations) => {
                let reason = RejectionReason::from_violations(violations).ok_or_else(|| {
                    GatewayError::Internal("validation failed without violations".to_string())
                })?;
                tracing::info!(reason = %reason, "Payment rejected");
                return Ok(PaymentOutcome::Rejected(reason));
            }
        };

        let id = Uuid::new_v4();
        tracing::debug!(
            payment_id = %id,
            card_last_four = payment.last_four(),
            "Validation passed, requesting authorization"
        );

        let status = self.authorizer.authorize(&payment).await;
        let record = PaymentRecord::new(id, status, &payment);

        self.store
            .put(record.clone())
            .await
            .map_err(|e| StorageError::OperationFailed {
                operation: "put".to_string(),
                message: e.to_string(),
            })?;

        tracing::info!(payment_id = %id, %status, "Payment processed");
        Ok(PaymentOutcome::from_record(record))
    }

    /// Look up a processed payment
    pub async fn get_by_id(&self, id: &Uuid) -> Result<PaymentRecord, GatewayError> {
        tracing::debug!(payment_id = %id, "Retrieving payment");

        let record = self
            .store
            .get(id)
            .await
            .map_err(|e| StorageError::OperationFailed {
                operation: "get".to_string(),
                message: e.to_string(),
            })?;

        match record {
            Some(record) => Ok(record),
            None => {
                tracing::info!(payment_id = %id, "Attempted to retrieve non-existent payment");
                Err(PaymentError::NotFound { id: *id }.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::payment::{AuthorizationStatus, ValidatedPayment};
    use crate::storage::InMemoryPaymentStore;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::{Value, json};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingAuthorizer {
        verdict: AuthorizationStatus,
        calls: AtomicUsize,
    }

    impl CountingAuthorizer {
        fn new(verdict: AuthorizationStatus) -> Arc<Self> {
            Arc::new(Self {
                verdict,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BankAuthorizer for CountingAuthorizer {
        async fn authorize(&self, _payment: &ValidatedPayment) -> AuthorizationStatus {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
        }
    }

    fn processor(
        authorizer: Arc<CountingAuthorizer>,
    ) -> (PaymentProcessor, Arc<InMemoryPaymentStore>) {
        let store = Arc::new(InMemoryPaymentStore::new());
        let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        let processor =
            PaymentProcessor::new(store.clone(), authorizer).with_clock(Arc::new(clock));
        (processor, store)
    }

    fn request(value: Value) -> PaymentRequest {
        serde_json::from_value(value).unwrap()
    }

    fn valid_request() -> PaymentRequest {
        request(json!({
            "card_number": "4111111111111111",
            "expiry_month": 1,
            "expiry_year": 99,
            "currency": "USD",
            "amount": 1000,
            "cvv": "123"
        }))
    }

    #[tokio::test]
    async fn test_authorized_payment_is_stored() {
        let authorizer = CountingAuthorizer::new(AuthorizationStatus::Authorized);
        let (processor, store) = processor(authorizer.clone());

        let outcome = processor.process(&valid_request()).await.unwrap();
        let PaymentOutcome::Authorized(record) = outcome else {
            panic!("expected Authorized, got {:?}", outcome);
        };

        assert_eq!(record.card_number_last_four, "1111");
        assert_eq!(authorizer.calls(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(processor.get_by_id(&record.id).await.unwrap(), record);
    }

    #[tokio::test]
    async fn test_declined_payment_is_stored() {
        let authorizer = CountingAuthorizer::new(AuthorizationStatus::Declined);
        let (processor, _) = processor(authorizer);

        let outcome = processor.process(&valid_request()).await.unwrap();
        let PaymentOutcome::Declined(record) = outcome else {
            panic!("expected Declined, got {:?}", outcome);
        };
        assert_eq!(record.status, AuthorizationStatus::Declined);
        assert!(processor.get_by_id(&record.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_rejected_payment_skips_bank_and_store() {
        let authorizer = CountingAuthorizer::new(AuthorizationStatus::Authorized);
        let (processor, store) = processor(authorizer.clone());

        let outcome = processor
            .process(&request(json!({"card_number": "4111111111111111"})))
            .await
            .unwrap();

        let reason = outcome.rejection().expect("rejected");
        assert_eq!(reason.as_str(), "malformed request");
        assert_eq!(authorizer.calls(), 0);
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let (processor, _) = processor(CountingAuthorizer::new(AuthorizationStatus::Authorized));

        let err = processor.get_by_id(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::Payment(PaymentError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_each_submission_gets_a_new_id() {
        let (processor, store) = processor(CountingAuthorizer::new(AuthorizationStatus::Authorized));

        let first = processor.process(&valid_request()).await.unwrap();
        let second = processor.process(&valid_request()).await.unwrap();

        assert_ne!(first.record().unwrap().id, second.record().unwrap().id);
        assert_eq!(store.count().await.unwrap(), 2);
    }
}
