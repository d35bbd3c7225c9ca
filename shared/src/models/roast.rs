//! Completed roast models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roast levels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RoastLevel {
    Light,
    Medium,
    Dark,
}

impl RoastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoastLevel::Light => "light",
            RoastLevel::Medium => "medium",
            RoastLevel::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "light" => Some(RoastLevel::Light),
            "medium" => Some(RoastLevel::Medium),
            "dark" => Some(RoastLevel::Dark),
            _ => None,
        }
    }
}

impl std::fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoastLevel::Light => write!(f, "Light"),
            RoastLevel::Medium => write!(f, "Medium"),
            RoastLevel::Dark => write!(f, "Dark"),
        }
    }
}

/// One finished roast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoastRecord {
    pub id: Uuid,
    /// Not checked against the bean table once stored
    pub bean_id: Uuid,
    pub roast_date: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub green_weight_grams: Decimal,
    pub roasted_weight_grams: Decimal,

    pub first_crack_time: Option<DateTime<Utc>>,
    pub development_start_time: Option<DateTime<Utc>>,
    pub cooling_start_time: Option<DateTime<Utc>>,
    pub cooling_end_time: Option<DateTime<Utc>>,

    pub ambient_temp_f: Option<Decimal>,
    pub humidity_percent: Option<Decimal>,

    pub drop_temp_f: Option<Decimal>,
    pub first_crack_temp_f: Option<Decimal>,
    pub end_temp_f: Option<Decimal>,

    pub roast_level: Option<RoastLevel>,
    pub notes: Option<String>,
    pub personal_rating: Option<i32>,

    pub created_at: DateTime<Utc>,
}

impl RoastRecord {
    /// Seconds from the start of the roast to the drop
    pub fn total_roast_time_seconds(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }

    /// Seconds from first crack to the drop, 0 when first crack was not logged
    pub fn development_time_seconds(&self) -> i64 {
        self.first_crack_time
            .map(|first_crack| (self.end_time - first_crack).num_seconds())
            .unwrap_or(0)
    }

    pub fn weight_loss_percent(&self) -> Decimal {
        calculate_weight_loss(self.green_weight_grams, self.roasted_weight_grams)
    }

    pub fn yield_percent(&self) -> Decimal {
        calculate_yield(self.green_weight_grams, self.roasted_weight_grams)
    }

    pub fn development_ratio_percent(&self) -> Decimal {
        calculate_dtr(self.development_time_seconds(), self.total_roast_time_seconds())
    }

    pub fn metrics(&self) -> RoastMetrics {
        RoastMetrics {
            total_roast_time_seconds: self.total_roast_time_seconds(),
            development_time_seconds: self.development_time_seconds(),
            weight_loss_percent: self.weight_loss_percent(),
            yield_percent: self.yield_percent(),
            development_ratio_percent: self.development_ratio_percent(),
        }
    }
}

/// Values derived from a roast record; never stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoastMetrics {
    pub total_roast_time_seconds: i64,
    pub development_time_seconds: i64,
    pub weight_loss_percent: Decimal,
    pub yield_percent: Decimal,
    pub development_ratio_percent: Decimal,
}

/// Calculate weight loss percentage
/// Formula: ((green_weight - roasted_weight) / green_weight) × 100
pub fn calculate_weight_loss(green_weight: Decimal, roasted_weight: Decimal) -> Decimal {
    if green_weight <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        ((green_weight - roasted_weight) / green_weight) * Decimal::from(100)
    }
}

/// Calculate roast yield percentage
/// Formula: (roasted_weight / green_weight) × 100
pub fn calculate_yield(green_weight: Decimal, roasted_weight: Decimal) -> Decimal {
    if green_weight <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        (roasted_weight / green_weight) * Decimal::from(100)
    }
}

/// Calculate development time ratio (DTR)
/// Formula: (development_time / total_time) × 100
pub fn calculate_dtr(development_time: i64, total_time: i64) -> Decimal {
    if total_time <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(development_time) / Decimal::from(total_time)) * Decimal::from(100)
}
