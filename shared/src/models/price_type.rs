//! Price tier models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A configurable price tier (retail, wholesale, promotions, ...)
///
/// Exactly one tier is the default at any time; the backend enforces this
/// with an "unset all, then set one" write inside a single transaction.
///
/// Weight gating is an explicit attribute pair rather than a naming
/// convention: a tier with `requires_minimum_weight` only applies to mixes
/// whose total weight reaches `minimum_weight_kg`, and product prices under
/// it are displayed per minimum unit instead of per kilogram. Tiers named
/// with the wholesale hint ("mayorista") get the gate seeded automatically
/// for backward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub is_default: bool,
    pub requires_minimum_weight: bool,
    pub minimum_weight_kg: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PriceType {
    /// Whether an entity with the given total weight qualifies for this tier
    pub fn is_eligible(&self, total_weight_kg: Decimal) -> bool {
        crate::pricing::is_eligible(
            self.requires_minimum_weight,
            self.minimum_weight_kg,
            total_weight_kg,
        )
    }
}
