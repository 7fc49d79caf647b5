//! Mix (product blend) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A composite product blended from base products by weight
///
/// `total_cost` is derived: the sum of the `partial_cost` of every line
/// item, recomputed synchronously after any line-item mutation. An empty
/// mix has a total cost of 0.00.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mix {
    pub id: Uuid,
    pub name: String,
    pub total_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A line item of a mix: one constituent product and its quantity
///
/// `partial_cost` is snapshotted as `round2(quantity_kg * cost_per_kg)` when
/// the line item is created or its quantity updated. Later edits to the
/// product's cost do not retroactively change it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixProduct {
    pub id: Uuid,
    pub mix_id: Uuid,
    pub product_id: Uuid,
    pub quantity_kg: Decimal,
    pub partial_cost: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Markup row for a (mix, price tier) pair
///
/// Same uniqueness and derivation invariants as the product counterpart,
/// with `mix.total_cost` as the base cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixPriceType {
    pub id: Uuid,
    pub mix_id: Uuid,
    pub price_type_id: Uuid,
    pub markup_percent: Decimal,
    pub final_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
