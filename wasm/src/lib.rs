//! WebAssembly module for the Henco inventory & pricing platform
//!
//! Provides client-side computation for:
//! - Live price previews while editing markups
//! - Line-item partial cost and mix total previews
//! - Minimum-weight eligibility checks for gated tiers
//! - Report price formatting

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::pricing::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

/// Preview a line item's partial cost (`quantity_kg * cost_per_kg`, rounded
/// to cents). Returns 0 for non-positive quantities.
#[wasm_bindgen]
pub fn preview_partial_cost(quantity_kg: f64, cost_per_kg: f64) -> f64 {
    match shared::pricing::partial_cost(to_decimal(quantity_kg), to_decimal(cost_per_kg)) {
        Ok(cost) => to_f64(cost),
        Err(_) => 0.0,
    }
}

/// Preview a final price for a base cost and markup percent
#[wasm_bindgen]
pub fn preview_final_price(base_cost: f64, markup_percent: f64) -> f64 {
    to_f64(shared::pricing::final_price(
        to_decimal(base_cost),
        to_decimal(markup_percent),
    ))
}

/// Sum partial costs into a mix total, as JSON array of numbers
#[wasm_bindgen]
pub fn preview_mix_total(partial_costs_json: &str) -> Result<f64, JsValue> {
    let costs: Vec<f64> = serde_json::from_str(partial_costs_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid costs JSON: {}", e)))?;

    let decimals: Vec<Decimal> = costs.into_iter().map(to_decimal).collect();
    Ok(to_f64(shared::pricing::total_cost(&decimals)))
}

/// Whether a mix with the given weight qualifies for a gated tier
#[wasm_bindgen]
pub fn meets_minimum_weight(
    requires_minimum_weight: bool,
    minimum_weight_kg: f64,
    total_weight_kg: f64,
) -> bool {
    shared::pricing::is_eligible(
        requires_minimum_weight,
        to_decimal(minimum_weight_kg),
        to_decimal(total_weight_kg),
    )
}

/// Whether a tier name carries the wholesale hint that seeds the gate
#[wasm_bindgen]
pub fn name_implies_gate(name: &str) -> bool {
    shared::pricing::name_implies_minimum_weight(name)
}

/// Per-minimum-unit display price for products under a gated tier
#[wasm_bindgen]
pub fn preview_minimum_unit_price(per_kg: f64, minimum_weight_kg: f64) -> f64 {
    to_f64(shared::pricing::minimum_unit_price(
        to_decimal(per_kg),
        to_decimal(minimum_weight_kg),
    ))
}

/// Format a price for the printed report ("es" locale uses decimal comma)
#[wasm_bindgen]
pub fn format_report_price(price: f64, locale: &str) -> String {
    shared::types::format_price_for_report(
        to_decimal(price),
        shared::types::DecimalSeparator::from_locale(locale),
    )
}
