//! Pricing and mix-consistency arithmetic
//!
//! Pure functions shared by the backend services and the WASM price preview.
//! Money values round to 2 decimal places and weights to 3, matching the
//! persisted column precision; rounding happens when a value is produced for
//! storage, never accumulated across reads.

use rust_decimal::{Decimal, RoundingStrategy};

/// Case-insensitive name fragment that seeds the minimum-weight gate on a
/// price tier for backward compatibility with operator naming habits.
pub const WHOLESALE_NAME_HINT: &str = "mayorista";

/// Default minimum total weight (kg) for weight-gated tiers
pub fn default_minimum_weight_kg() -> Decimal {
    Decimal::from(5)
}

/// Round a money amount to cents, half away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a weight to grams, half away from zero
pub fn round_weight(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
}

/// Cost of a mix line item: `round2(quantity_kg * cost_per_kg)`
///
/// The quantity must be strictly positive; zero or negative quantities are a
/// caller error and never reach storage.
pub fn partial_cost(quantity_kg: Decimal, cost_per_kg: Decimal) -> Result<Decimal, &'static str> {
    if quantity_kg <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(round_money(quantity_kg * cost_per_kg))
}

/// Total cost of a mix: the sum of its line items' partial costs
///
/// An empty mix totals 0.00. Partial costs are already rounded at write
/// time, so the sum is exact.
pub fn total_cost(partial_costs: &[Decimal]) -> Decimal {
    round_money(
        partial_costs
            .iter()
            .fold(Decimal::ZERO, |acc, cost| acc + cost),
    )
}

/// Total weight of a mix: the sum of its line items' quantities
pub fn total_weight(quantities_kg: &[Decimal]) -> Decimal {
    round_weight(
        quantities_kg
            .iter()
            .fold(Decimal::ZERO, |acc, qty| acc + qty),
    )
}

/// Final price for a base cost under a markup percentage:
/// `round2(base_cost * (1 + markup_percent / 100))`
///
/// Defined for `markup_percent >= -100`; below that the result goes
/// negative and callers must reject the input before getting here.
pub fn final_price(base_cost: Decimal, markup_percent: Decimal) -> Decimal {
    round_money(base_cost * (Decimal::ONE + markup_percent / Decimal::ONE_HUNDRED))
}

/// Whether an entity with the given total weight qualifies for a tier
pub fn is_eligible(
    requires_minimum_weight: bool,
    minimum_weight_kg: Decimal,
    total_weight_kg: Decimal,
) -> bool {
    !requires_minimum_weight || total_weight_kg >= minimum_weight_kg
}

/// Whether a tier name implies the minimum-weight gate
///
/// Seeds the explicit `requires_minimum_weight` attribute when a tier is
/// created or renamed without one; it never clears an existing gate.
pub fn name_implies_minimum_weight(name: &str) -> bool {
    name.to_lowercase().contains(WHOLESALE_NAME_HINT)
}

/// Per-minimum-unit display price for products under a gated tier
///
/// Products are not filtered from gated listings; their per-kg cost and
/// final price are instead shown multiplied by the tier's minimum weight
/// ("price for the minimum purchase unit"). Storage stays per kilogram.
pub fn minimum_unit_price(per_kg: Decimal, minimum_weight_kg: Decimal) -> Decimal {
    round_money(per_kg * minimum_weight_kg)
}
