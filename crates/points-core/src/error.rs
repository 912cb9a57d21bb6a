//! # Error Types
//!
//! Domain-specific error types for points-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  points-core errors (this file)                                        │
//! │  ├── CoreError        - Payload decoding failures                      │
//! │  └── ValidationError  - Field-level parse/validation failures          │
//! │                                                                         │
//! │  points-cli errors (app)                                               │
//! │  └── ConfigError      - Bad environment configuration                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow (binary boundary)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scoring itself never fails. A receipt that made it into a
//! [`ReceiptRecord`](crate::types::ReceiptRecord) always produces a score;
//! these errors only cover turning raw input into that record.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning raw input into a receipt record.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The payload is not valid JSON or does not match the receipt shape.
    #[error("Malformed receipt payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Only the numeric fields are validated. A bad purchase date/time is not an
/// error: it disables the date-based rules instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., "12.x5" for a price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must not be below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
