//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductType {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A base product sold by weight
///
/// `cost_per_kg` is supplied at creation time (the UI derives it from
/// `total_price_paid / total_quantity_kg`) and persisted independently
/// afterwards. Editing the quantity or price paid does NOT recompute it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Category label, denormalized from the product type catalog
    #[serde(rename = "type")]
    pub product_type: String,
    pub total_quantity_kg: Decimal,
    pub total_price_paid: Decimal,
    pub cost_per_kg: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Markup row for a (product, price tier) pair
///
/// At most one row exists per pair. `final_price` is derived:
/// `round2(cost_per_kg * (1 + markup_percent / 100))`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPriceType {
    pub id: Uuid,
    pub product_id: Uuid,
    pub price_type_id: Uuid,
    pub markup_percent: Decimal,
    pub final_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
