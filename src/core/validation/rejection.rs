//! Rejection reason aggregation
//!
//! Reduces the violations of one submission to the single string returned to
//! the caller. Precedence, applied in order:
//!
//! 1. any presence violation: the reason is exactly `"malformed request"`
//! 2. an expiry month/year format violation suppresses `"expired card"`
//! 3. remaining messages are joined with `", "`
//!
//! Only expiry format violations suppress the expired-card message; a bad card
//! number or currency does not.

use super::{MALFORMED_REQUEST, Violation};
use std::collections::BTreeSet;
use std::fmt;

/// Aggregated, precedence-reduced reason for a rejected submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionReason {
    violations: Vec<Violation>,
    message: String,
}

impl RejectionReason {
    /// Reduce a set of violations, or `None` if there are none
    pub fn from_violations<I>(violations: I) -> Option<Self>
    where
        I: IntoIterator<Item = Violation>,
    {
        let violations: BTreeSet<Violation> = violations.into_iter().collect();
        if violations.is_empty() {
            return None;
        }

        if violations.iter().any(Violation::is_missing) {
            return Some(Self {
                violations: violations.into_iter().filter(Violation::is_missing).collect(),
                message: MALFORMED_REQUEST.to_string(),
            });
        }

        let suppress_expired = violations.iter().any(Violation::is_expiry_format);
        let violations: Vec<Violation> = violations
            .into_iter()
            .filter(|v| !(suppress_expired && *v == Violation::ExpiredCard))
            .collect();

        let message = violations
            .iter()
            .map(Violation::message)
            .collect::<Vec<_>>()
            .join(", ");

        Some(Self {
            violations,
            message,
        })
    }

    /// Structurally incomplete request (HTTP 400 rather than 422)
    pub fn is_malformed_request(&self) -> bool {
        self.violations.iter().any(Violation::is_missing)
    }

    /// Violations that survived the precedence rules
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn as_str(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
