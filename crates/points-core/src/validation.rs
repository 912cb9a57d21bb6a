//! # Validation Module
//!
//! Field parsers used when turning a raw receipt payload into a
//! [`ReceiptRecord`](crate::types::ReceiptRecord).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      What Gets Checked                                  │
//! │                                                                         │
//! │  total / price   ──► must parse as an exact decimal, must be >= 0       │
//! │                      failure = ValidationError (receipt rejected)       │
//! │                                                                         │
//! │  purchase time   ──► parsed leniently                                   │
//! │                      failure = None (receipt accepted, day/time         │
//! │                      rules skipped, calculator emits a diagnostic)      │
//! │                                                                         │
//! │  retailer / descriptions ──► never checked, any text is scored          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Date/time layouts accepted for a combined timestamp, besides RFC 3339
/// style `2022-01-01T13:01:00[.fff]`.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

// =============================================================================
// Amounts
// =============================================================================

/// Parses a monetary amount, keeping its scale.
///
/// ## Example
/// ```rust
/// use points_core::validation::parse_amount;
///
/// let total = parse_amount("total", " 35.35 ").unwrap();
/// assert_eq!(total.to_string(), "35.35");
///
/// assert!(parse_amount("total", "").is_err());
/// assert!(parse_amount("total", "3.5x").is_err());
/// assert!(parse_amount("total", "-1.00").is_err());
/// ```
pub fn parse_amount(field: &str, raw: &str) -> ValidationResult<Decimal> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let amount = Decimal::from_str(raw).map_err(|e| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: e.to_string(),
    })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(amount)
}

// =============================================================================
// Date/Time
// =============================================================================

/// Parses a combined local timestamp such as `2022-01-01T13:01:00`.
///
/// Returns `None` for anything unparseable; timezone offsets are rejected
/// rather than converted.
pub fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(parsed) = raw.parse::<NaiveDateTime>() {
        return Some(parsed);
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

/// Parses a split date (`2022-01-01`) and time (`13:01` or `13:01:00`).
pub fn parse_date_and_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(time.trim(), format).ok())?;

    Some(date.and_time(time))
}

/// Resolves the purchase time from whichever fields the payload carries.
///
/// A combined timestamp wins over the split pair. Missing or unparseable
/// values yield `None`.
pub fn resolve_purchase_date_time(
    date_time: Option<&str>,
    date: Option<&str>,
    time: Option<&str>,
) -> Option<NaiveDateTime> {
    if let Some(parsed) = date_time.and_then(parse_date_time) {
        return Some(parsed);
    }

    match (date, time) {
        (Some(date), Some(time)) => parse_date_and_time(date, time),
        _ => None,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
