//! # points-core: Pure Scoring Logic for Receipt Points
//!
//! This crate turns a purchase receipt into a loyalty-points score and a
//! human-readable breakdown. Every function is pure; the only side channel is
//! an injected [`DiagnosticSink`](points::DiagnosticSink).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Receipt Points Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Callers (points-cli, HTTP layers, ...)               │   │
//! │  │     read JSON ──► ReceiptPayload ──► render PointsBreakdown     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ points-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  payload  │  │   types   │  │  points   │  │   money   │  │   │
//! │  │   │  JSON in  │─►│  Receipt  │─►│   rules   │◄─│  Decimal  │  │   │
//! │  │   │ validate  │  │ Breakdown │  │   sink    │  │  helpers  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ReceiptRecord, Item, PointsBreakdown, Rule)
//! - [`money`] - Exact-decimal helpers (no floating point!)
//! - [`points`] - The scoring rules and the calculator
//! - [`payload`] - Wire-shaped receipt input
//! - [`validation`] - Field parsers behind the payload conversion
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use points_core::{PointsCalculator, NoopSink, ReceiptPayload};
//!
//! let record = ReceiptPayload::parse_record(r#"{
//!     "retailer": "M&M Corner Market",
//!     "purchaseDate": "2022-03-20",
//!     "purchaseTime": "14:33",
//!     "items": [
//!         { "shortDescription": "Gatorade", "price": "2.25" },
//!         { "shortDescription": "Gatorade", "price": "2.25" },
//!         { "shortDescription": "Gatorade", "price": "2.25" },
//!         { "shortDescription": "Gatorade", "price": "2.25" }
//!     ],
//!     "total": "9.00"
//! }"#).unwrap();
//!
//! let breakdown = PointsCalculator::with_sink(NoopSink).calculate(&record);
//! // 14 + 50 + 25 + 10; the 20th is an even day, so no day/time points
//! assert_eq!(breakdown.total_points, 99);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod payload;
pub mod points;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use payload::{ItemPayload, ReceiptPayload};
pub use points::{calculate, Diagnostic, DiagnosticSink, NoopSink, PointsCalculator, TracingSink};
pub use types::*;
