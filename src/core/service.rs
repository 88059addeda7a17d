//! Service trait for the external authorization bank

use crate::core::payment::{AuthorizationStatus, ValidatedPayment};
use async_trait::async_trait;

/// Authorizes validated payments against an acquiring bank
///
/// Implementations absorb every transport or protocol failure and answer
/// [`AuthorizationStatus::Declined`]. A payment is only authorized when the
/// bank affirmatively said so.
#[async_trait]
pub trait BankAuthorizer: Send + Sync {
    /// Ask the bank for a verdict; called at most once per submission
    async fn authorize(&self, payment: &ValidatedPayment) -> AuthorizationStatus;
}
