//! Payment domain types
//!
//! A submission travels through three shapes:
//!
//! - [`PaymentRequest`]: raw, loosely-typed input exactly as the client sent it
//! - [`ValidatedPayment`]: the same data once every validator has accepted it
//! - [`PaymentRecord`]: the persisted result of a bank round-trip
//!
//! [`PaymentOutcome`] is what the orchestrator hands back to the transport layer.

use crate::core::validation::RejectionReason;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Currencies accepted by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    USD,
    GBP,
    EUR,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::USD, Currency::GBP, Currency::EUR];

    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::EUR => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ();

    /// Case-sensitive: "usd" is not a supported currency
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code() == s)
            .ok_or(())
    }
}

/// Bank verdict for a structurally valid payment
///
/// This is also the status of every stored [`PaymentRecord`]. Rejected
/// submissions never reach the store, so there is no `Rejected` variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    Authorized,
    Declined,
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorizationStatus::Authorized => f.write_str("Authorized"),
            AuthorizationStatus::Declined => f.write_str("Declined"),
        }
    }
}

/// Raw payment submission
///
/// Every field is kept as an untyped JSON value so that missing and malformed
/// input can be reported as violations instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    #[serde(default)]
    pub card_number: Option<Value>,
    #[serde(default)]
    pub expiry_month: Option<Value>,
    #[serde(default)]
    pub expiry_year: Option<Value>,
    #[serde(default)]
    pub currency: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub cvv: Option<Value>,
}

/// A payment that passed every validator
///
/// Fields are private: the only way to obtain one is
/// [`validate_request`](crate::core::validation::validate_request).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPayment {
    pub(crate) card_number: String,
    pub(crate) expiry_month: u32,
    pub(crate) expiry_year: u32,
    pub(crate) currency: Currency,
    pub(crate) amount: u64,
    pub(crate) cvv: String,
}

impl ValidatedPayment {
    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn expiry_month(&self) -> u32 {
        self.expiry_month
    }

    /// Two-digit year, 0..=99
    pub fn expiry_year(&self) -> u32 {
        self.expiry_year
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Amount in minor currency units
    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    /// Last four digits of the card number
    pub fn last_four(&self) -> &str {
        // card numbers are 14-19 ASCII digits once validated
        &self.card_number[self.card_number.len() - 4..]
    }

    /// Expiry formatted as `MM/YY`
    pub fn expiry_date(&self) -> String {
        format!("{:02}/{:02}", self.expiry_month, self.expiry_year)
    }
}

/// Persisted result of a processed payment
///
/// Created once by the orchestrator after the bank answered, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: Uuid,
    pub status: AuthorizationStatus,
    pub card_number_last_four: String,
    pub expiry_month: u32,
    pub expiry_year: u32,
    pub currency: Currency,
    pub amount: u64,
}

impl PaymentRecord {
    pub fn new(id: Uuid, status: AuthorizationStatus, payment: &ValidatedPayment) -> Self {
        Self {
            id,
            status,
            card_number_last_four: payment.last_four().to_string(),
            expiry_month: payment.expiry_month,
            expiry_year: payment.expiry_year,
            currency: payment.currency,
            amount: payment.amount,
        }
    }
}

/// Terminal state of a submission
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Bank authorized the payment; the record is stored
    Authorized(PaymentRecord),
    /// Bank declined, or could not be reached; the record is stored
    Declined(PaymentRecord),
    /// Validation failed; nothing was stored and the bank was never called
    Rejected(RejectionReason),
}

impl PaymentOutcome {
    pub(crate) fn from_record(record: PaymentRecord) -> Self {
        match record.status {
            AuthorizationStatus::Authorized => PaymentOutcome::Authorized(record),
            AuthorizationStatus::Declined => PaymentOutcome::Declined(record),
        }
    }

    /// The stored record, if the submission got that far
    pub fn record(&self) -> Option<&PaymentRecord> {
        match self {
            PaymentOutcome::Authorized(record) | PaymentOutcome::Declined(record) => Some(record),
            PaymentOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            PaymentOutcome::Rejected(reason) => Some(reason),
            _ => None,
        }
    }

    /// Status label as exposed over HTTP
    pub fn status_label(&self) -> &'static str {
        match self {
            PaymentOutcome::Authorized(_) => "Authorized",
            PaymentOutcome::Declined(_) => "Declined",
            PaymentOutcome::Rejected(_) => "Rejected",
        }
    }
}
