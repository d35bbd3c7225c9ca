//! WebAssembly module for the Roasted web app
//!
//! Lets the browser compute timer labels and roast metrics offline, using
//! the same code the server uses.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::{RoastRecord, TimerDisplayColor};

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

/// Format elapsed seconds as MM:SS
#[wasm_bindgen]
pub fn format_elapsed_time(seconds: i32) -> String {
    shared::format_elapsed(i64::from(seconds))
}

/// Display color name for a phase; unknown phases are white
#[wasm_bindgen]
pub fn timer_display_color(phase: &str) -> String {
    TimerDisplayColor::for_phase_str(phase).as_str().to_string()
}

/// Human description of a phase; unknown phases give an empty string
#[wasm_bindgen]
pub fn phase_description(phase: &str) -> String {
    shared::phase_description_str(phase).to_string()
}

/// Calculate roast weight loss percentage
#[wasm_bindgen]
pub fn calculate_roast_weight_loss(green_weight: f64, roasted_weight: f64) -> f64 {
    to_f64(shared::calculate_weight_loss(
        to_decimal(green_weight),
        to_decimal(roasted_weight),
    ))
}

/// Calculate development time ratio as a percentage
#[wasm_bindgen]
pub fn calculate_development_ratio(development_seconds: i32, total_seconds: i32) -> f64 {
    to_f64(shared::calculate_dtr(
        i64::from(development_seconds),
        i64::from(total_seconds),
    ))
}

/// Convert grams to pounds, rounded to 3 decimal places
#[wasm_bindgen]
pub fn grams_to_pounds(grams: f64) -> f64 {
    to_f64(shared::normalize_pounds(shared::grams_to_pounds(to_decimal(grams))))
}

/// Derived metrics for a roast record given as JSON
#[wasm_bindgen]
pub fn roast_metrics(roast_json: &str) -> Result<String, JsValue> {
    let roast: RoastRecord = serde_json::from_str(roast_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid roast JSON: {}", e)))?;

    serde_json::to_string(&roast.metrics())
        .map_err(|e| JsValue::from_str(&format!("Failed to encode metrics: {}", e)))
}
