//! Green bean inventory models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default for variety and process when the roaster leaves them blank
pub const UNKNOWN: &str = "Unknown";

/// A batch of green coffee on the shelf
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeanRecord {
    pub id: Uuid,
    pub name: String,
    pub origin: String,
    pub variety: String,
    pub process: String,
    pub cupping_score: Option<Decimal>,
    pub quantity_pounds: Decimal,
    pub cost_per_pound: Option<Decimal>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub purchase_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Why a bean's quantity was changed by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    Purchase,
    Correction,
}

impl AdjustmentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentReason::Purchase => "purchase",
            AdjustmentReason::Correction => "correction",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "purchase" => Some(AdjustmentReason::Purchase),
            "correction" => Some(AdjustmentReason::Correction),
            _ => None,
        }
    }
}

/// A signed change to a bean's quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryAdjustment {
    pub id: Uuid,
    pub bean_id: Uuid,
    pub amount_pounds: Decimal,
    pub reason: AdjustmentReason,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
