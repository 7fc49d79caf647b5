//! Pricing engine tests
//!
//! Tests for the cost aggregation and markup projection arithmetic:
//! - Mix total cost consistency
//! - Final price derivation from base cost and markup percent
//! - Recalculation propagation after line-item mutations

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::pricing;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Partial cost is quantity times cost per kg, rounded to cents
    #[test]
    fn test_partial_cost_calculation() {
        assert_eq!(pricing::partial_cost(dec("2"), dec("3.00")).unwrap(), dec("6.00"));
        assert_eq!(pricing::partial_cost(dec("2.5"), dec("4.00")).unwrap(), dec("10.00"));
        assert_eq!(pricing::partial_cost(dec("1.5"), dec("3.33")).unwrap(), dec("5.00"));
    }

    /// Non-positive quantities are rejected before any cost is produced
    #[test]
    fn test_partial_cost_invalid_quantity() {
        assert!(pricing::partial_cost(Decimal::ZERO, dec("3.00")).is_err());
        assert!(pricing::partial_cost(dec("-0.5"), dec("3.00")).is_err());
    }

    /// An empty mix totals exactly zero
    #[test]
    fn test_empty_mix_total() {
        assert_eq!(pricing::total_cost(&[]), Decimal::ZERO);
    }

    /// Mix total is the sum of partial costs
    #[test]
    fn test_mix_total_sums_line_items() {
        let partials = vec![dec("6.00"), dec("10.00"), dec("3.50")];
        assert_eq!(pricing::total_cost(&partials), dec("19.50"));
    }

    /// Final price applies the markup over the base cost
    #[test]
    fn test_final_price_markup() {
        assert_eq!(pricing::final_price(dec("6.00"), dec("50")), dec("9.00"));
        assert_eq!(pricing::final_price(dec("10.00"), dec("10")), dec("11.00"));
        assert_eq!(pricing::final_price(dec("100.00"), dec("0")), dec("100.00"));
    }

    /// A -100 markup floors the price at zero; discounts stay positive
    #[test]
    fn test_final_price_discounts() {
        assert_eq!(pricing::final_price(dec("10.00"), dec("-25")), dec("7.50"));
        assert_eq!(pricing::final_price(dec("10.00"), dec("-100")), dec("0.00"));
    }

    /// Money rounds half away from zero at two places
    #[test]
    fn test_money_rounding() {
        assert_eq!(pricing::round_money(dec("1.005")), dec("1.01"));
        assert_eq!(pricing::round_money(dec("1.0049")), dec("1.00"));
        assert_eq!(pricing::round_money(dec("-1.005")), dec("-1.01"));
    }

    /// Weights round at three places
    #[test]
    fn test_weight_rounding() {
        assert_eq!(pricing::round_weight(dec("2.0005")), dec("2.001"));
        assert_eq!(pricing::round_weight(dec("2.0004")), dec("2.000"));
    }

    /// A zero base cost yields a zero final price at any markup
    #[test]
    fn test_zero_base_cost() {
        assert_eq!(pricing::final_price(Decimal::ZERO, dec("50")), dec("0.00"));
        assert_eq!(pricing::final_price(Decimal::ZERO, dec("300")), dec("0.00"));
    }

    /// Total weight sums line-item quantities at weight precision
    #[test]
    fn test_total_weight() {
        let quantities = vec![dec("2.500"), dec("1.250"), dec("0.750")];
        assert_eq!(pricing::total_weight(&quantities), dec("4.500"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating valid quantities (positive weights)
    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=10000i64).prop_map(|n| Decimal::new(n, 3)) // 0.001 to 10.000 kg
    }

    /// Strategy for generating costs per kg
    fn cost_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=100000i64).prop_map(|n| Decimal::new(n, 2)) // 0.00 to 1000.00
    }

    /// Strategy for generating markup percentages (-100 to 500)
    fn markup_strategy() -> impl Strategy<Value = Decimal> {
        (-10000i64..=50000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Partial cost is always non-negative for valid inputs
        #[test]
        fn prop_partial_cost_non_negative(
            quantity in quantity_strategy(),
            cost in cost_strategy()
        ) {
            let partial = pricing::partial_cost(quantity, cost).unwrap();
            prop_assert!(partial >= Decimal::ZERO);
        }

        /// Mix total equals the fold of its partial costs
        #[test]
        fn prop_total_is_sum_of_partials(
            partials in prop::collection::vec(cost_strategy(), 0..15)
        ) {
            let expected = partials.iter().fold(Decimal::ZERO, |acc, c| acc + c);
            prop_assert_eq!(pricing::total_cost(&partials), pricing::round_money(expected));
        }

        /// Final price at -100 <= markup is never negative
        #[test]
        fn prop_final_price_non_negative(
            base in cost_strategy(),
            markup in markup_strategy()
        ) {
            let price = pricing::final_price(base, markup);
            prop_assert!(price >= Decimal::ZERO);
        }

        /// Final price is monotonic in the markup for a fixed base cost
        #[test]
        fn prop_final_price_monotonic_in_markup(
            base in cost_strategy(),
            markup in markup_strategy(),
            bump in (1i64..=10000i64).prop_map(|n| Decimal::new(n, 2))
        ) {
            let lower = pricing::final_price(base, markup);
            let higher = pricing::final_price(base, markup + bump);
            prop_assert!(higher >= lower);
        }

        /// Zero markup is the identity on an already-rounded base cost
        #[test]
        fn prop_zero_markup_identity(base in cost_strategy()) {
            prop_assert_eq!(pricing::final_price(base, Decimal::ZERO), base);
        }

        /// Projection is a pure function: same inputs, same price
        #[test]
        fn prop_projection_deterministic(
            base in cost_strategy(),
            markup in markup_strategy()
        ) {
            prop_assert_eq!(
                pricing::final_price(base, markup),
                pricing::final_price(base, markup)
            );
        }

        /// Rounded money always fits two decimal places
        #[test]
        fn prop_money_scale(
            quantity in quantity_strategy(),
            cost in cost_strategy()
        ) {
            let partial = pricing::partial_cost(quantity, cost).unwrap();
            prop_assert!(partial.scale() <= 2);
        }
    }
}

// ============================================================================
// Recalculation Propagation (simulated mix state)
// ============================================================================

#[cfg(test)]
mod propagation_tests {
    use super::*;

    /// In-memory stand-in for a mix's persisted derived state
    struct MixState {
        line_items: Vec<(Decimal, Decimal)>, // (quantity_kg, cost_per_kg)
        markups: Vec<(Decimal, Decimal)>,    // (markup_percent, final_price)
        total_cost: Decimal,
    }

    impl MixState {
        fn new() -> Self {
            Self {
                line_items: Vec::new(),
                markups: Vec::new(),
                total_cost: Decimal::ZERO,
            }
        }

        /// Mirror of the engine's mutate-then-recalculate sequence
        fn recalculate(&mut self) {
            let partials: Vec<Decimal> = self
                .line_items
                .iter()
                .map(|(qty, cost)| pricing::partial_cost(*qty, *cost).unwrap())
                .collect();
            self.total_cost = pricing::total_cost(&partials);
            for (markup, final_price) in &mut self.markups {
                *final_price = pricing::final_price(self.total_cost, *markup);
            }
        }

        fn add_line_item(&mut self, quantity_kg: Decimal, cost_per_kg: Decimal) {
            self.line_items.push((quantity_kg, cost_per_kg));
            self.recalculate();
        }

        fn update_line_item(&mut self, index: usize, quantity_kg: Decimal) {
            self.line_items[index].0 = quantity_kg;
            self.recalculate();
        }

        fn remove_line_item(&mut self, index: usize) {
            self.line_items.remove(index);
            self.recalculate();
        }
    }

    /// One line item, one tier: removing the line drives both derived
    /// values to zero
    #[test]
    fn test_removal_drives_prices_to_zero() {
        let mut mix = MixState::new();
        mix.markups.push((dec("50"), Decimal::ZERO));
        mix.add_line_item(dec("2"), dec("3.00"));

        assert_eq!(mix.total_cost, dec("6.00"));
        assert_eq!(mix.markups[0].1, dec("9.00"));

        mix.remove_line_item(0);
        assert_eq!(mix.total_cost, dec("0.00"));
        assert_eq!(mix.markups[0].1, dec("0.00"));
    }

    /// End-to-end scenario: create, set markup, change quantity; the tier
    /// price follows without a second markup call
    #[test]
    fn test_quantity_update_propagates_to_tier_price() {
        let mut mix = MixState::new();
        mix.add_line_item(dec("2.5"), dec("4.00"));
        assert_eq!(mix.total_cost, dec("10.00"));

        // Set 10% markup on the "Retail" tier
        mix.markups.push((dec("10"), pricing::final_price(mix.total_cost, dec("10"))));
        assert_eq!(mix.markups[0].1, dec("11.00"));

        mix.update_line_item(0, dec("5"));
        assert_eq!(mix.total_cost, dec("20.00"));
        assert_eq!(mix.markups[0].1, dec("22.00"));
    }

    /// Partial costs snapshot at write time: a later product cost change
    /// leaves untouched line items alone
    #[test]
    fn test_partial_cost_snapshot_semantics() {
        let mut mix = MixState::new();
        mix.add_line_item(dec("2"), dec("3.00"));
        assert_eq!(mix.total_cost, dec("6.00"));

        // The product's cost changes out of band; the stored line item
        // keeps its snapshot until it is next touched
        let stale_partial = pricing::partial_cost(dec("2"), dec("3.00")).unwrap();
        assert_eq!(stale_partial, dec("6.00"));

        // Touching the line re-snapshots against the new cost
        mix.line_items[0].1 = dec("4.00");
        mix.update_line_item(0, dec("2"));
        assert_eq!(mix.total_cost, dec("8.00"));
    }

    /// Totals stay consistent across an arbitrary mutation sequence
    #[test]
    fn test_mutation_sequence_consistency() {
        let mut mix = MixState::new();
        mix.markups.push((dec("30"), Decimal::ZERO));

        mix.add_line_item(dec("1.5"), dec("2.00"));
        mix.add_line_item(dec("0.5"), dec("8.00"));
        mix.add_line_item(dec("3"), dec("1.10"));
        mix.update_line_item(1, dec("1"));
        mix.remove_line_item(0);

        // 1 * 8.00 + 3 * 1.10 = 11.30
        assert_eq!(mix.total_cost, dec("11.30"));
        assert_eq!(mix.markups[0].1, dec("14.69"));
    }
}
