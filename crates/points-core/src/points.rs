//! # Points Module
//!
//! Scores a [`ReceiptRecord`] against the fixed loyalty rules.
//!
//! ## Rule Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReceiptRecord                                                          │
//! │       │                                                                 │
//! │       ├──► retailer name      1 pt per [A-Za-z0-9]                      │
//! │       ├──► round dollar       +50 if total has no cents                 │
//! │       ├──► quarter multiple   +25 if total % 0.25 == 0                  │
//! │       ├──► item pairs         +5 per two items                          │
//! │       ├──► item description   ceil(price × 0.2) per item, len % 3 == 0  │
//! │       └──► day/time gate      +6 odd day AND +10 weekday 14:00-16:00    │
//! │                  │                                                      │
//! │                  └── gate fails? ──► DiagnosticSink (no points)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PointsBreakdown { total_points, contributions, breakdown_lines }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The odd-day and afternoon rules are awarded together or not at all: a
//! purchase on the 1st at 10:00 earns neither the 6 nor the 10 points.
//!
//! ## Usage
//! ```rust
//! use points_core::points::{NoopSink, PointsCalculator};
//! use points_core::types::ReceiptRecord;
//! use rust_decimal::Decimal;
//!
//! let receipt = ReceiptRecord {
//!     retailer: "M&M Corner Market".to_string(),
//!     total: Decimal::new(900, 2),
//!     purchase_date_time: None,
//!     items: vec![],
//! };
//!
//! let breakdown = PointsCalculator::with_sink(NoopSink).calculate(&receipt);
//! // 14 (retailer) + 50 (round) + 25 (quarter)
//! assert_eq!(breakdown.total_points, 89);
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use rust_decimal::Decimal;
use tracing::warn;

use crate::money::{ceil_points, format_amount, is_multiple_of, is_round_dollar, quarter, saturating_mul};
use crate::types::{Item, PointsBreakdown, ReceiptRecord, Rule, RuleContribution};

// =============================================================================
// Rule Constants
// =============================================================================

/// Points for a total with no cents.
pub const ROUND_DOLLAR_POINTS: u64 = 50;

/// Points for a total that is a multiple of 0.25.
pub const QUARTER_MULTIPLE_POINTS: u64 = 25;

/// Points per pair of items.
pub const POINTS_PER_ITEM_PAIR: u64 = 5;

/// Trimmed description lengths divisible by this qualify for price points.
pub const DESCRIPTION_LENGTH_DIVISOR: usize = 3;

/// Points for an odd purchase day.
pub const ODD_DAY_POINTS: u64 = 6;

/// Points for a purchase inside the weekday afternoon window.
pub const AFTERNOON_WINDOW_POINTS: u64 = 10;

/// Window start (exclusive), seconds after midnight: 14:00.
const WINDOW_START_SECS: u32 = 14 * 3600;

/// Window end (exclusive), seconds after midnight: 16:00.
const WINDOW_END_SECS: u32 = 16 * 3600;

/// `0.2`, the price multiplier for qualifying descriptions.
#[inline]
fn description_multiplier() -> Decimal {
    Decimal::new(2, 1)
}

// =============================================================================
// Diagnostics
// =============================================================================

/// Reasons the date-based rules were skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The receipt carried no usable purchase date/time.
    MissingPurchaseDateTime,

    /// The purchase did not satisfy both the odd-day and afternoon checks.
    OutsidePurchaseWindow {
        purchased_at: NaiveDateTime,
        odd_day: bool,
        afternoon_window: bool,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingPurchaseDateTime => {
                write!(f, "purchase date/time missing or unparseable, skipping day/time rules")
            }
            Diagnostic::OutsidePurchaseWindow {
                purchased_at,
                odd_day,
                afternoon_window,
            } => write!(
                f,
                "purchase at {} not eligible for day/time rules (odd day: {}, afternoon window: {})",
                purchased_at, odd_day, afternoon_window
            ),
        }
    }
}

/// Receives diagnostics emitted while scoring.
///
/// Implemented for closures, so tests can collect diagnostics with
/// `|d: &Diagnostic| seen.borrow_mut().push(d.clone())`.
pub trait DiagnosticSink {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Discards every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}

/// Forwards diagnostics to `tracing` at WARN level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::MissingPurchaseDateTime => {
                warn!("{}", diagnostic);
            }
            Diagnostic::OutsidePurchaseWindow {
                purchased_at,
                odd_day,
                afternoon_window,
            } => {
                warn!(
                    %purchased_at,
                    odd_day,
                    afternoon_window,
                    "Purchase date/time not eligible for day/time rules"
                );
            }
        }
    }
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic),
{
    fn emit(&self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Scores receipts. Holds nothing but the diagnostic sink.
#[derive(Debug, Clone, Default)]
pub struct PointsCalculator<S = TracingSink> {
    sink: S,
}

impl PointsCalculator<TracingSink> {
    /// Calculator that reports diagnostics through `tracing`.
    pub fn new() -> Self {
        PointsCalculator { sink: TracingSink }
    }
}

impl<S: DiagnosticSink> PointsCalculator<S> {
    /// Calculator with a caller-supplied diagnostic sink.
    pub fn with_sink(sink: S) -> Self {
        PointsCalculator { sink }
    }

    /// Scores a receipt.
    ///
    /// Never fails. A missing or ineligible purchase time only removes the
    /// day/time points and emits one [`Diagnostic`].
    pub fn calculate(&self, receipt: &ReceiptRecord) -> PointsBreakdown {
        let mut contributions = Vec::new();

        contributions.extend(retailer_contribution(&receipt.retailer));
        contributions.extend(round_dollar_contribution(receipt.total));
        contributions.extend(quarter_multiple_contribution(receipt.total));
        contributions.extend(item_pairs_contribution(receipt.item_count()));
        contributions.extend(receipt.items.iter().filter_map(description_contribution));

        match receipt.purchase_date_time {
            Some(purchased_at) => {
                let odd_day = is_odd_day(&purchased_at);
                let afternoon_window = is_afternoon_window(&purchased_at);

                if odd_day && afternoon_window {
                    contributions.push(RuleContribution {
                        rule: Rule::OddDay,
                        points: ODD_DAY_POINTS,
                        detail: "purchase day is odd".to_string(),
                    });
                    contributions.push(RuleContribution {
                        rule: Rule::AfternoonWindow,
                        points: AFTERNOON_WINDOW_POINTS,
                        detail: "time of purchase is after 2:00 pm and before 4:00 pm".to_string(),
                    });
                } else {
                    self.sink.emit(&Diagnostic::OutsidePurchaseWindow {
                        purchased_at,
                        odd_day,
                        afternoon_window,
                    });
                }
            }
            None => self.sink.emit(&Diagnostic::MissingPurchaseDateTime),
        }

        PointsBreakdown::from_contributions(contributions)
    }
}

/// Scores a receipt, reporting diagnostics through `tracing`.
pub fn calculate(receipt: &ReceiptRecord) -> PointsBreakdown {
    PointsCalculator::new().calculate(receipt)
}

// =============================================================================
// Rules
// =============================================================================

/// Counts ASCII letters and digits; everything else is ignored.
pub fn alphanumeric_count(retailer: &str) -> usize {
    retailer.chars().filter(char::is_ascii_alphanumeric).count()
}

fn retailer_contribution(retailer: &str) -> Option<RuleContribution> {
    let count = alphanumeric_count(retailer);
    (count > 0).then(|| RuleContribution {
        rule: Rule::RetailerName,
        points: count as u64,
        detail: format!("retailer name has {} alphanumeric characters", count),
    })
}

fn round_dollar_contribution(total: Decimal) -> Option<RuleContribution> {
    is_round_dollar(total).then(|| RuleContribution {
        rule: Rule::RoundDollar,
        points: ROUND_DOLLAR_POINTS,
        detail: "total is a round dollar amount with no cents".to_string(),
    })
}

fn quarter_multiple_contribution(total: Decimal) -> Option<RuleContribution> {
    is_multiple_of(total, quarter()).then(|| RuleContribution {
        rule: Rule::QuarterMultiple,
        points: QUARTER_MULTIPLE_POINTS,
        detail: "total is a multiple of 0.25".to_string(),
    })
}

/// `floor(item_count / 2) * 5`.
pub fn item_pair_points(item_count: usize) -> u64 {
    (item_count / 2) as u64 * POINTS_PER_ITEM_PAIR
}

fn item_pairs_contribution(item_count: usize) -> Option<RuleContribution> {
    let points = item_pair_points(item_count);
    (points > 0).then(|| RuleContribution {
        rule: Rule::ItemPairs,
        points,
        detail: format!(
            "{} items ({} pairs @ {} points each)",
            item_count,
            item_count / 2,
            POINTS_PER_ITEM_PAIR
        ),
    })
}

/// Price points for one item, zero unless its trimmed description length is
/// a multiple of 3. An empty description counts as a multiple of 3.
pub fn description_points(item: &Item) -> u64 {
    if item.trimmed_description_len() % DESCRIPTION_LENGTH_DIVISOR != 0 {
        return 0;
    }
    ceil_points(saturating_mul(item.price, description_multiplier()))
}

fn description_contribution(item: &Item) -> Option<RuleContribution> {
    let points = description_points(item);
    (points > 0).then(|| {
        let trimmed = item.short_description.trim();
        RuleContribution {
            rule: Rule::ItemDescription,
            points,
            detail: format!(
                "\"{}\" is {} characters (a multiple of {}), item price of {} * 0.2 = {}, rounded up is {} points",
                trimmed,
                item.trimmed_description_len(),
                DESCRIPTION_LENGTH_DIVISOR,
                format_amount(item.price),
                format_amount(saturating_mul(item.price, description_multiplier())),
                points
            ),
        }
    })
}

/// Day of month is odd.
pub fn is_odd_day(purchased_at: &NaiveDateTime) -> bool {
    purchased_at.day() % 2 != 0
}

/// Monday to Friday, strictly after 14:00 and strictly before 16:00.
pub fn is_afternoon_window(purchased_at: &NaiveDateTime) -> bool {
    if matches!(purchased_at.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    let secs = purchased_at.num_seconds_from_midnight();
    let after_start = secs > WINDOW_START_SECS
        || (secs == WINDOW_START_SECS && purchased_at.nanosecond() > 0);
    let before_end = secs < WINDOW_END_SECS;

    after_start && before_end
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn item(description: &str, price: &str) -> Item {
        Item {
            short_description: description.to_string(),
            price: dec(price),
        }
    }

    fn receipt(retailer: &str, total: &str, when: Option<NaiveDateTime>, items: Vec<Item>) -> ReceiptRecord {
        ReceiptRecord {
            retailer: retailer.to_string(),
            total: dec(total),
            purchase_date_time: when,
            items,
        }
    }

    fn score(receipt: &ReceiptRecord) -> PointsBreakdown {
        PointsCalculator::with_sink(NoopSink).calculate(receipt)
    }

    // -------------------------------------------------------------------------
    // Individual rules
    // -------------------------------------------------------------------------

    #[test]
    fn test_retailer_ignores_non_alphanumeric() {
        assert_eq!(alphanumeric_count("M&M Corner Market"), 14);
        assert_eq!(alphanumeric_count("MMCornerMarket"), 14);
        assert_eq!(alphanumeric_count("Target"), 6);
        assert_eq!(alphanumeric_count("  &-!  "), 0);
        // Non-ASCII letters do not count
        assert_eq!(alphanumeric_count("Café"), 3);
    }

    #[test]
    fn test_round_and_quarter_rules() {
        let round = score(&receipt("", "100.00", None, vec![]));
        assert_eq!(round.points_for(Rule::RoundDollar), 50);
        assert_eq!(round.points_for(Rule::QuarterMultiple), 25);
        assert_eq!(round.total_points, 75);

        let neither = score(&receipt("", "100.10", None, vec![]));
        assert_eq!(neither.total_points, 0);

        let quarter_only = score(&receipt("", "12.75", None, vec![]));
        assert_eq!(quarter_only.points_for(Rule::RoundDollar), 0);
        assert_eq!(quarter_only.points_for(Rule::QuarterMultiple), 25);
    }

    #[test]
    fn test_item_pair_points() {
        assert_eq!(item_pair_points(0), 0);
        assert_eq!(item_pair_points(1), 0);
        assert_eq!(item_pair_points(2), 5);
        assert_eq!(item_pair_points(3), 5);
        assert_eq!(item_pair_points(4), 10);
        assert_eq!(item_pair_points(5), 10);
    }

    #[test]
    fn test_description_points_rounding() {
        // "Emils Cheese Pizza" is 18 characters
        assert_eq!(description_points(&item("Emils Cheese Pizza", "12.25")), 3);
        assert_eq!(description_points(&item("Emils Cheese Pizza", "10.00")), 2);
        // Surrounding whitespace is trimmed: 24 characters
        assert_eq!(description_points(&item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00")), 3);
        // 17 characters
        assert_eq!(description_points(&item("Mountain Dew 12PK", "6.49")), 0);
    }

    #[test]
    fn test_empty_description_counts_as_multiple_of_three() {
        assert_eq!(description_points(&item("", "5.00")), 1);
        assert_eq!(description_points(&item("    ", "5.01")), 2);
    }

    #[test]
    fn test_zero_price_description_adds_no_line() {
        let breakdown = score(&receipt("", "0.01", None, vec![item("abc", "0.00")]));
        assert_eq!(breakdown.total_points, 0);
        assert!(breakdown.contributions.is_empty());
    }

    #[test]
    fn test_afternoon_window_bounds() {
        // 2022-03-21 is a Monday
        assert!(!is_afternoon_window(&at(2022, 3, 21, 14, 0, 0)));
        assert!(is_afternoon_window(&at(2022, 3, 21, 14, 0, 1)));
        assert!(is_afternoon_window(&at(2022, 3, 21, 14, 33, 0)));
        assert!(is_afternoon_window(&at(2022, 3, 21, 15, 59, 59)));
        assert!(!is_afternoon_window(&at(2022, 3, 21, 16, 0, 0)));
        assert!(!is_afternoon_window(&at(2022, 3, 21, 13, 59, 59)));

        let just_after = NaiveDate::from_ymd_opt(2022, 3, 21)
            .unwrap()
            .and_hms_milli_opt(14, 0, 0, 1)
            .unwrap();
        assert!(is_afternoon_window(&just_after));
    }

    #[test]
    fn test_afternoon_window_excludes_weekends() {
        // 2022-03-19 is a Saturday, 2022-03-20 a Sunday
        assert!(!is_afternoon_window(&at(2022, 3, 19, 15, 0, 0)));
        assert!(!is_afternoon_window(&at(2022, 3, 20, 15, 0, 0)));
    }

    #[test]
    fn test_odd_day() {
        assert!(is_odd_day(&at(2022, 1, 1, 0, 0, 0)));
        assert!(is_odd_day(&at(2022, 1, 31, 0, 0, 0)));
        assert!(!is_odd_day(&at(2022, 1, 2, 0, 0, 0)));
    }

    // -------------------------------------------------------------------------
    // Day/time gate
    // -------------------------------------------------------------------------

    #[test]
    fn test_gate_awards_both_rules_together() {
        // Thursday 2022-03-03, odd day, inside the window
        let breakdown = score(&receipt("", "0.01", Some(at(2022, 3, 3, 14, 33, 0)), vec![]));
        assert_eq!(breakdown.points_for(Rule::OddDay), 6);
        assert_eq!(breakdown.points_for(Rule::AfternoonWindow), 10);
        assert_eq!(breakdown.total_points, 16);
    }

    #[test]
    fn test_gate_odd_day_outside_window_awards_nothing() {
        let seen = RefCell::new(Vec::new());
        let sink = |d: &Diagnostic| seen.borrow_mut().push(d.clone());
        let when = at(2022, 3, 3, 10, 0, 0);

        let breakdown = PointsCalculator::with_sink(&sink).calculate(&receipt("", "0.01", Some(when), vec![]));

        assert_eq!(breakdown.total_points, 0);
        assert_eq!(breakdown.points_for(Rule::OddDay), 0);
        assert_eq!(
            seen.into_inner(),
            vec![Diagnostic::OutsidePurchaseWindow {
                purchased_at: when,
                odd_day: true,
                afternoon_window: false,
            }]
        );
    }

    #[test]
    fn test_gate_even_day_inside_window_awards_nothing() {
        // Wednesday 2022-03-02
        let breakdown = score(&receipt("", "0.01", Some(at(2022, 3, 2, 15, 0, 0)), vec![]));
        assert_eq!(breakdown.points_for(Rule::AfternoonWindow), 0);
        assert_eq!(breakdown.total_points, 0);
    }

    #[test]
    fn test_missing_date_time_emits_diagnostic_and_keeps_score() {
        let seen = RefCell::new(Vec::new());
        let sink = |d: &Diagnostic| seen.borrow_mut().push(d.clone());

        let breakdown =
            PointsCalculator::with_sink(&sink).calculate(&receipt("Target", "1.00", None, vec![]));

        assert_eq!(breakdown.total_points, 6 + 50 + 25);
        assert_eq!(seen.into_inner(), vec![Diagnostic::MissingPurchaseDateTime]);
    }

    #[test]
    fn test_eligible_purchase_emits_no_diagnostic() {
        let seen = RefCell::new(Vec::new());
        let sink = |d: &Diagnostic| seen.borrow_mut().push(d.clone());

        PointsCalculator::with_sink(&sink)
            .calculate(&receipt("", "0.01", Some(at(2022, 3, 3, 14, 33, 0)), vec![]));

        assert!(seen.into_inner().is_empty());
    }

    // -------------------------------------------------------------------------
    // End to end
    // -------------------------------------------------------------------------

    #[test]
    fn test_target_receipt() {
        // Tuesday 2022-03-01, odd day, inside the window
        let receipt = receipt(
            "Target",
            "35.35",
            Some(at(2022, 3, 1, 14, 33, 0)),
            vec![
                item("Mountain Dew 12PK", "6.49"),
                item("Emils Cheese Pizza", "12.25"),
                item("Knorr Creamy Chicken", "1.26"),
                item("Doritos Nacho Cheese", "3.35"),
                item("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
            ],
        );

        let breakdown = score(&receipt);

        assert_eq!(breakdown.points_for(Rule::RetailerName), 6);
        assert_eq!(breakdown.points_for(Rule::RoundDollar), 0);
        assert_eq!(breakdown.points_for(Rule::QuarterMultiple), 0);
        assert_eq!(breakdown.points_for(Rule::ItemPairs), 10);
        assert_eq!(breakdown.points_for(Rule::ItemDescription), 3 + 3);
        assert_eq!(breakdown.points_for(Rule::OddDay), 6);
        assert_eq!(breakdown.points_for(Rule::AfternoonWindow), 10);
        assert_eq!(breakdown.total_points, 6 + 10 + 6 + 16);

        // retailer, pairs, two descriptions, odd day, window + 2 summary lines
        assert_eq!(breakdown.contributions.len(), 6);
        assert_eq!(breakdown.breakdown_lines.len(), 8);
        assert_eq!(breakdown.breakdown_lines.last().unwrap(), " = 38 points");
    }

    #[test]
    fn test_corner_market_receipt() {
        // Sunday 2022-03-20 is even and a weekend anyway
        let receipt = receipt(
            "M&M Corner Market",
            "9.00",
            Some(at(2022, 3, 20, 14, 33, 0)),
            vec![
                item("Gatorade", "2.25"),
                item("Gatorade", "2.25"),
                item("Gatorade", "2.25"),
                item("Gatorade", "2.25"),
            ],
        );

        let breakdown = score(&receipt);

        // 14 + 50 + 25 + 10, "Gatorade" is 8 characters
        assert_eq!(breakdown.total_points, 99);
    }

    #[test]
    fn test_total_equals_sum_of_contributions() {
        let receipt = receipt(
            "Walgreens #042",
            "2.65",
            Some(at(2022, 1, 3, 15, 1, 0)),
            vec![item("Pepsi - 12-oz", "1.25"), item("Dasani", "1.40")],
        );

        let breakdown = score(&receipt);
        let sum: u64 = breakdown.contributions.iter().map(|c| c.points).sum();

        assert_eq!(breakdown.total_points, sum);
        assert!(breakdown.contributions.iter().all(|c| c.points > 0));
    }

    #[test]
    fn test_breakdown_line_wording() {
        let breakdown = score(&receipt("Target", "35.35", None, vec![item("Emils Cheese Pizza", "12.25")]));
        assert_eq!(breakdown.breakdown_lines[0], "6 points - retailer name has 6 alphanumeric characters");
        assert_eq!(
            breakdown.breakdown_lines[1],
            "3 points - \"Emils Cheese Pizza\" is 18 characters (a multiple of 3), item price of 12.25 * 0.2 = 2.45, rounded up is 3 points"
        );
    }

    #[test]
    fn test_calculator_is_reusable() {
        let calculator = PointsCalculator::with_sink(NoopSink);
        let first = calculator.calculate(&receipt("abc", "1.00", None, vec![]));
        let second = calculator.calculate(&receipt("abc", "1.00", None, vec![]));
        assert_eq!(first, second);
    }
}
