//! # Domain Types
//!
//! Core domain types used throughout Receipt Points.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────────────┐        │
//! │  │   ReceiptRecord     │        │      PointsBreakdown        │        │
//! │  │  ─────────────────  │        │  ─────────────────────────  │        │
//! │  │  retailer           │ score  │  total_points (u64)         │        │
//! │  │  total (Decimal)    │──────► │  contributions[]            │        │
//! │  │  purchase_date_time │        │  breakdown_lines[]          │        │
//! │  │  items[] ──► Item   │        └──────────────┬──────────────┘        │
//! │  └─────────────────────┘                       │                        │
//! │                                  ┌─────────────▼───────────────┐       │
//! │                                  │     RuleContribution        │       │
//! │                                  │  rule ──► Rule (enum)       │       │
//! │                                  │  points, detail             │       │
//! │                                  └─────────────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Receipt
// =============================================================================

/// A parsed purchase receipt, ready for scoring.
///
/// Built by the caller (usually via
/// [`ReceiptPayload`](crate::payload::ReceiptPayload)) and never mutated
/// by the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
    /// Retailer name exactly as printed; any characters allowed.
    pub retailer: String,

    /// Receipt total with its original scale.
    pub total: Decimal,

    /// Local purchase time, no timezone attached.
    ///
    /// `None` when the source value was missing or unparseable.
    pub purchase_date_time: Option<NaiveDateTime>,

    /// Purchased items in receipt order.
    pub items: Vec<Item>,
}

impl ReceiptRecord {
    /// Number of line items on the receipt.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// A single line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Free-text description; only its trimmed length is scored.
    pub short_description: String,

    /// Item price with its original scale.
    pub price: Decimal,
}

impl Item {
    /// Length of the description after trimming surrounding whitespace,
    /// counted in characters.
    pub fn trimmed_description_len(&self) -> usize {
        self.short_description.trim().chars().count()
    }
}

// =============================================================================
// Rules
// =============================================================================

/// The scoring rules, in the order they are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// One point per ASCII letter or digit in the retailer name.
    RetailerName,
    /// 50 points when the total has no cents.
    RoundDollar,
    /// 25 points when the total is a multiple of 0.25.
    QuarterMultiple,
    /// 5 points for every two items.
    ItemPairs,
    /// `ceil(price * 0.2)` for items whose trimmed description length is a
    /// multiple of 3.
    ItemDescription,
    /// 6 points when the purchase day is odd.
    OddDay,
    /// 10 points for a weekday purchase strictly between 14:00 and 16:00.
    AfternoonWindow,
}

impl Rule {
    /// Short human name for the rule.
    pub fn label(&self) -> &'static str {
        match self {
            Rule::RetailerName => "retailer name",
            Rule::RoundDollar => "round dollar",
            Rule::QuarterMultiple => "quarter multiple",
            Rule::ItemPairs => "item pairs",
            Rule::ItemDescription => "item description",
            Rule::OddDay => "odd day",
            Rule::AfternoonWindow => "afternoon window",
        }
    }
}

// =============================================================================
// Breakdown
// =============================================================================

/// Points awarded by one rule firing.
///
/// The description rule fires once per qualifying item, so it may appear
/// several times in a breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RuleContribution {
    /// Which rule fired.
    pub rule: Rule,

    /// Points awarded (always > 0; rules awarding nothing are omitted).
    #[ts(type = "number")]
    pub points: u64,

    /// Human-readable explanation, e.g.
    /// `retailer name has 6 alphanumeric characters`.
    pub detail: String,
}

impl RuleContribution {
    /// Renders the contribution as a breakdown line.
    pub fn to_line(&self) -> String {
        format!("{} points - {}", self.points, self.detail)
    }
}

/// Separator placed between the rule lines and the total line.
pub const BREAKDOWN_SEPARATOR: &str = " + ---------";

/// Result of scoring one receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PointsBreakdown {
    /// Sum of all contributions.
    #[ts(type = "number")]
    pub total_points: u64,

    /// Every rule that awarded points, in evaluation order.
    pub contributions: Vec<RuleContribution>,

    /// One line per contribution, then a separator and a `= N points` line.
    pub breakdown_lines: Vec<String>,
}

impl PointsBreakdown {
    /// Assembles a breakdown from contributions, deriving the total and the
    /// rendered lines so the two can never disagree.
    pub fn from_contributions(contributions: Vec<RuleContribution>) -> Self {
        let total_points = contributions
            .iter()
            .fold(0u64, |acc, c| acc.saturating_add(c.points));

        let mut breakdown_lines: Vec<String> =
            contributions.iter().map(RuleContribution::to_line).collect();
        breakdown_lines.push(BREAKDOWN_SEPARATOR.to_string());
        breakdown_lines.push(format!(" = {} points", total_points));

        PointsBreakdown {
            total_points,
            contributions,
            breakdown_lines,
        }
    }

    /// Total points contributed by a single rule.
    pub fn points_for(&self, rule: Rule) -> u64 {
        self.contributions
            .iter()
            .filter(|c| c.rule == rule)
            .map(|c| c.points)
            .sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
