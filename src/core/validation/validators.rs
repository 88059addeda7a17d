//! Per-field validators
//!
//! Each validator looks at one raw JSON value and yields either the typed value
//! or a single [`Violation`]. Absent, `null` and blank values are presence
//! violations; everything else that fails the field's rule is a format violation.

use super::{Field, Violation};
use crate::core::payment::Currency;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

/// Card number: 14 to 19 ASCII digits
pub fn card_number(value: Option<&Value>) -> Result<String, Violation> {
    static CARD_NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CARD_NUMBER_REGEX.get_or_init(|| Regex::new(r"^[0-9]{14,19}$").unwrap());
    matching_text(Field::CardNumber, value, regex)
}

/// Expiry month: integer in 1..=12
pub fn expiry_month(value: Option<&Value>) -> Result<u32, Violation> {
    bounded_integer(Field::ExpiryMonth, value, 1, 12)
}

/// Expiry year: two-digit integer in 0..=99
///
/// Four-digit years such as 2026 are rejected, not normalized.
pub fn expiry_year(value: Option<&Value>) -> Result<u32, Violation> {
    bounded_integer(Field::ExpiryYear, value, 0, 99)
}

/// Currency: one of the supported ISO codes, case-sensitive
pub fn currency(value: Option<&Value>) -> Result<Currency, Violation> {
    let code = present_text(Field::Currency, value)?;
    code.parse()
        .map_err(|_| Violation::Malformed(Field::Currency))
}

/// Amount: non-negative integer in minor units, no sign, no decimals
pub fn amount(value: Option<&Value>) -> Result<u64, Violation> {
    static AMOUNT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = AMOUNT_REGEX.get_or_init(|| Regex::new(r"^[0-9]+$").unwrap());
    let digits = matching_text(Field::Amount, value, regex)?;
    digits
        .parse()
        .map_err(|_| Violation::Malformed(Field::Amount))
}

/// CVV: 3 or 4 ASCII digits
pub fn cvv(value: Option<&Value>) -> Result<String, Violation> {
    static CVV_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CVV_REGEX.get_or_init(|| Regex::new(r"^[0-9]{3,4}$").unwrap());
    matching_text(Field::Cvv, value, regex)
}

/// Cross-field expiry check
///
/// Only runs when both month and year are present; presence is reported by the
/// field validators. Years below 100 are read as 20YY. Anything that cannot be
/// turned into a calendar month counts as expired, so an out-of-range month
/// never escapes as an error.
pub fn expiry_date(
    month: Option<&Value>,
    year: Option<&Value>,
    today: NaiveDate,
) -> Option<Violation> {
    let (Some(month), Some(year)) = (text(month), text(year)) else {
        return None;
    };

    let expiry = month
        .trim()
        .parse::<u32>()
        .ok()
        .zip(year.trim().parse::<i32>().ok())
        .and_then(|(month, year)| {
            let year = if year < 100 { year + 2000 } else { year };
            NaiveDate::from_ymd_opt(year, month, 1)
        });

    match expiry {
        Some(expiry) if (expiry.year(), expiry.month()) > (today.year(), today.month()) => None,
        _ => Some(Violation::ExpiredCard),
    }
}

/// Textual form of a loosely-typed value; `None` when absent, null or blank
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn present_text(field: Field, value: Option<&Value>) -> Result<String, Violation> {
    text(value).ok_or(Violation::Missing(field))
}

fn matching_text(field: Field, value: Option<&Value>, regex: &Regex) -> Result<String, Violation> {
    let text = present_text(field, value)?;
    if regex.is_match(&text) {
        Ok(text)
    } else {
        Err(Violation::Malformed(field))
    }
}

fn bounded_integer(field: Field, value: Option<&Value>, min: u32, max: u32) -> Result<u32, Violation> {
    let text = present_text(field, value)?;
    let digits = text.trim();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Violation::Malformed(field));
    }
    digits
        .parse::<u32>()
        .ok()
        .filter(|n| (min..=max).contains(n))
        .ok_or(Violation::Malformed(field))
}
