//! Payment validation
//!
//! Validation is an explicit, ordered list of independent validator functions
//! (see [`validators`]). Each returns either the typed field value or exactly one
//! [`Violation`]. [`validate_request`] runs all of them and either assembles a
//! [`ValidatedPayment`] or returns every violation found, which the
//! [`RejectionReason`] aggregator then reduces to a single user-facing message.

pub mod rejection;
pub mod validators;

pub use rejection::RejectionReason;

use crate::core::payment::{PaymentRequest, ValidatedPayment};
use chrono::NaiveDate;
use std::borrow::Cow;
use std::fmt;

/// Message shared by every presence violation, whatever the field
pub const MALFORMED_REQUEST: &str = "malformed request";

/// Message for a card whose expiry is not after the current month
pub const EXPIRED_CARD: &str = "expired card";

/// Fields of a payment submission, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    CardNumber,
    ExpiryMonth,
    ExpiryYear,
    Currency,
    Amount,
    Cvv,
}

impl Field {
    /// Name used in rejection messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Field::CardNumber => "cardNumber",
            Field::ExpiryMonth => "expiryMonth",
            Field::ExpiryYear => "expiryYear",
            Field::Currency => "currency",
            Field::Amount => "amount",
            Field::Cvv => "cvv",
        }
    }

    fn format_message(&self) -> Cow<'static, str> {
        match self {
            Field::Currency => Cow::Borrowed("currency is not supported"),
            field => Cow::Owned(format!("{} is malformed/incorrect", field.display_name())),
        }
    }
}

/// A single reason a submission fails validation
///
/// Variant order is also the order in which the aggregator reports messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Violation {
    /// Field absent, null or blank
    Missing(Field),
    /// Field present but fails its syntactic rule (or, for currency, is not supported)
    Malformed(Field),
    /// Expiry month/year is not strictly after the current month
    ExpiredCard,
}

impl Violation {
    pub fn message(&self) -> Cow<'static, str> {
        match self {
            Violation::Missing(_) => Cow::Borrowed(MALFORMED_REQUEST),
            Violation::Malformed(field) => field.format_message(),
            Violation::ExpiredCard => Cow::Borrowed(EXPIRED_CARD),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Violation::Missing(_))
    }

    /// Format violation on expiry month or year
    pub fn is_expiry_format(&self) -> bool {
        matches!(
            self,
            Violation::Malformed(Field::ExpiryMonth) | Violation::Malformed(Field::ExpiryYear)
        )
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Run every validator against a raw request
///
/// `today` supplies the current year-month for the expiry check. On failure the
/// returned list holds each violation once, in validator order.
pub fn validate_request(
    request: &PaymentRequest,
    today: NaiveDate,
) -> Result<ValidatedPayment, Vec<Violation>> {
    let card_number = validators::card_number(request.card_number.as_ref());
    let expiry_month = validators::expiry_month(request.expiry_month.as_ref());
    let expiry_year = validators::expiry_year(request.expiry_year.as_ref());
    let currency = validators::currency(request.currency.as_ref());
    let amount = validators::amount(request.amount.as_ref());
    let cvv = validators::cvv(request.cvv.as_ref());
    let expiry = validators::expiry_date(
        request.expiry_month.as_ref(),
        request.expiry_year.as_ref(),
        today,
    );

    match (card_number, expiry_month, expiry_year, currency, amount, cvv, expiry) {
        (
            Ok(card_number),
            Ok(expiry_month),
            Ok(expiry_year),
            Ok(currency),
            Ok(amount),
            Ok(cvv),
            None,
        ) => Ok(ValidatedPayment {
            card_number,
            expiry_month,
            expiry_year,
            currency,
            amount,
            cvv,
        }),
        (card_number, expiry_month, expiry_year, currency, amount, cvv, expiry) => Err([
            card_number.err(),
            expiry_month.err(),
            expiry_year.err(),
            currency.err(),
            amount.err(),
            cvv.err(),
            expiry,
        ]
        .into_iter()
        .flatten()
        .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::payment::Currency;
    use serde_json::{Value, json};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn request(value: Value) -> PaymentRequest {
        serde_json::from_value(value).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "card_number": "4111111111111111",
            "expiry_month": 1,
            "expiry_year": 99,
            "currency": "USD",
            "amount": 1000,
            "cvv": "123"
        })
    }

    #[test]
    fn test_valid_request_produces_validated_payment() {
        let payment = validate_request(&request(valid_body()), today()).unwrap();
        assert_eq!(payment.card_number(), "4111111111111111");
        assert_eq!(payment.expiry_month(), 1);
        assert_eq!(payment.expiry_year(), 99);
        assert_eq!(payment.currency(), Currency::USD);
        assert_eq!(payment.amount(), 1000);
        assert_eq!(payment.cvv(), "123");
    }

    #[test]
    fn test_missing_fields_reported_per_field() {
        let violations = validate_request(&PaymentRequest::default(), today()).unwrap_err();
        assert_eq!(
            violations,
            vec![
                Violation::Missing(Field::CardNumber),
                Violation::Missing(Field::ExpiryMonth),
                Violation::Missing(Field::ExpiryYear),
                Violation::Missing(Field::Currency),
                Violation::Missing(Field::Amount),
                Violation::Missing(Field::Cvv),
            ]
        );
    }

    #[test]
    fn test_expiry_check_skipped_when_month_missing() {
        let mut body = valid_body();
        body["expiry_month"] = Value::Null;
        body["expiry_year"] = json!(1);

        let violations = validate_request(&request(body), today()).unwrap_err();
        assert_eq!(violations, vec![Violation::Missing(Field::ExpiryMonth)]);
    }

    #[test]
    fn test_out_of_range_month_also_fails_expiry() {
        let mut body = valid_body();
        body["expiry_month"] = json!(13);

        let violations = validate_request(&request(body), today()).unwrap_err();
        assert!(violations.contains(&Violation::Malformed(Field::ExpiryMonth)));
        assert!(violations.contains(&Violation::ExpiredCard));
    }

    #[test]
    fn test_expired_card_alone() {
        let mut body = valid_body();
        body["expiry_month"] = json!(9);
        body["expiry_year"] = json!(26);

        let violations = validate_request(&request(body), today()).unwrap_err();
        assert_eq!(violations, vec![Violation::ExpiredCard]);
    }

    #[test]
    fn test_violation_messages() {
        assert_eq!(Violation::Missing(Field::Cvv).message(), "malformed request");
        assert_eq!(
            Violation::Malformed(Field::CardNumber).message(),
            "cardNumber is malformed/incorrect"
        );
        assert_eq!(
            Violation::Malformed(Field::Currency).message(),
            "currency is not supported"
        );
        assert_eq!(Violation::ExpiredCard.to_string(), "expired card");
    }

    #[test]
    fn test_format_messages_name_their_field() {
        for field in [
            Field::CardNumber,
            Field::ExpiryMonth,
            Field::ExpiryYear,
            Field::Currency,
            Field::Amount,
            Field::Cvv,
        ] {
            assert!(
                Violation::Malformed(field)
                    .message()
                    .starts_with(field.display_name())
            );
        }
    }

    #[test]
    fn test_expiry_format_classification() {
        assert!(Violation::Malformed(Field::ExpiryMonth).is_expiry_format());
        assert!(Violation::Malformed(Field::ExpiryYear).is_expiry_format());
        assert!(!Violation::Missing(Field::ExpiryYear).is_expiry_format());
        assert!(!Violation::Malformed(Field::CardNumber).is_expiry_format());
        assert!(!Violation::ExpiredCard.is_expiry_format());
    }
}
