//! # Receipt Payload
//!
//! The JSON shape receipts arrive in, and its conversion into a
//! [`ReceiptRecord`].
//!
//! ```json
//! {
//!   "retailer": "Target",
//!   "purchaseDate": "2022-01-01",
//!   "purchaseTime": "13:01",
//!   "items": [
//!     { "shortDescription": "Mountain Dew 12PK", "price": "6.49" }
//!   ],
//!   "total": "6.49"
//! }
//! ```
//!
//! A single `purchaseDateTime` (`2022-01-01T13:01:00`) may be sent instead of
//! the date/time pair.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::types::{Item, ReceiptRecord};
use crate::validation::{parse_amount, resolve_purchase_date_time};

/// Receipt as submitted by a client. Amounts stay strings until validated so
/// no precision is lost in transit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptPayload {
    #[serde(default)]
    pub retailer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub purchase_date_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub purchase_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub purchase_time: Option<String>,

    #[serde(default)]
    pub items: Vec<ItemPayload>,

    #[serde(default)]
    pub total: String,
}

/// Line item as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    #[serde(default)]
    pub short_description: String,

    pub price: String,
}

impl ReceiptPayload {
    /// Decodes a payload from JSON text.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes and validates in one step.
    pub fn parse_record(json: &str) -> CoreResult<ReceiptRecord> {
        let payload = Self::from_json(json)?;
        Ok(ReceiptRecord::try_from(payload)?)
    }
}

impl TryFrom<ItemPayload> for Item {
    type Error = ValidationError;

    fn try_from(payload: ItemPayload) -> Result<Self, Self::Error> {
        Ok(Item {
            price: parse_amount("price", &payload.price)?,
            short_description: payload.short_description,
        })
    }
}

impl TryFrom<ReceiptPayload> for ReceiptRecord {
    type Error = ValidationError;

    fn try_from(payload: ReceiptPayload) -> Result<Self, Self::Error> {
        let total = parse_amount("total", &payload.total)?;

        let purchase_date_time = resolve_purchase_date_time(
            payload.purchase_date_time.as_deref(),
            payload.purchase_date.as_deref(),
            payload.purchase_time.as_deref(),
        );

        let items = payload
            .items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                Item::try_from(item).map_err(|err| with_item_index(err, index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReceiptRecord {
            retailer: payload.retailer,
            total,
            purchase_date_time,
            items,
        })
    }
}

/// Qualifies an item field name with its position, e.g. `items[2].price`.
fn with_item_index(err: ValidationError, index: usize) -> ValidationError {
    let qualify = |field: String| format!("items[{}].{}", index, field);
    match err {
        ValidationError::Required { field } => ValidationError::Required {
            field: qualify(field),
        },
        ValidationError::InvalidFormat { field, reason } => ValidationError::InvalidFormat {
            field: qualify(field),
            reason,
        },
        ValidationError::Negative { field } => ValidationError::Negative {
            field: qualify(field),
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
