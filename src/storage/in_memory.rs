//! In-memory implementation of PaymentStore
//!
//! Records live for the lifetime of the process; there is no eviction.

use crate::core::payment::PaymentRecord;
use crate::core::store::PaymentStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory payment store
///
/// Uses RwLock for thread-safe access from concurrent submissions.
#[derive(Clone)]
pub struct InMemoryPaymentStore {
    payments: Arc<RwLock<HashMap<Uuid, PaymentRecord>>>,
}

impl InMemoryPaymentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            payments: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryPaymentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentStore for InMemoryPaymentStore {
    async fn put(&self, record: PaymentRecord) -> Result<()> {
        let mut payments = self
            .payments
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        payments.insert(record.id, record);

        Ok(())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<PaymentRecord>> {
        let payments = self
            .payments
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(payments.get(id).cloned())
    }

    async fn count(&self) -> Result<usize> {
        let payments = self
            .payments
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(payments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payment::{AuthorizationStatus, Currency};

    fn record(last_four: &str) -> PaymentRecord {
        PaymentRecord {
            id: Uuid::new_v4(),
            status: AuthorizationStatus::Authorized,
            card_number_last_four: last_four.to_string(),
            expiry_month: 12,
            expiry_year: 30,
            currency: Currency::EUR,
            amount: 250,
        }
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = InMemoryPaymentStore::new();
        let record = record("4242");

        store.put(record.clone()).await.unwrap();

        assert_eq!(store.get(&record.id).await.unwrap(), Some(record));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = InMemoryPaymentStore::default();
        assert!(store.get(&Uuid::new_v4()).await.unwrap().is_none());
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryPaymentStore::new();
        let handle = store.clone();
        let record = record("0005");

        handle.put(record.clone()).await.unwrap();

        assert!(store.get(&record.id).await.unwrap().is_some());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_of_distinct_keys() {
        let store = InMemoryPaymentStore::new();

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let record = record(&format!("{:04}", i));
                    store.put(record.clone()).await.unwrap();
                    record.id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }

        assert_eq!(store.count().await.unwrap(), 32);
        for id in ids {
            assert!(store.get(&id).await.unwrap().is_some());
        }
    }
}
