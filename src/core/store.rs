//! Store trait for processed payments

use crate::core::payment::PaymentRecord;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Keyed storage for processed payments
///
/// Implementations must be safe to call from many in-flight submissions at
/// once. Records are never updated or removed once written.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Store a record under its own id
    async fn put(&self, record: PaymentRecord) -> Result<()>;

    /// Get a record by id
    async fn get(&self, id: &Uuid) -> Result<Option<PaymentRecord>>;

    /// Number of stored records
    async fn count(&self) -> Result<usize>;
}
