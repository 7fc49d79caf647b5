//! Minimum-weight eligibility tests
//!
//! Tests for the wholesale gating rules:
//! - Mixes under the minimum weight are excluded from gated listings
//! - Products are never excluded; their display values are rescaled
//! - The name convention seeds the gate, case-insensitively

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::pricing;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// The 5 kg boundary is inclusive
    #[test]
    fn test_minimum_weight_boundary() {
        let min = dec("5.000");
        assert!(!pricing::is_eligible(true, min, dec("4.999")));
        assert!(pricing::is_eligible(true, min, dec("5.000")));
        assert!(pricing::is_eligible(true, min, dec("5.001")));
    }

    /// Ungated tiers accept any weight, including zero
    #[test]
    fn test_ungated_tier_accepts_everything() {
        let min = dec("5.000");
        assert!(pricing::is_eligible(false, min, Decimal::ZERO));
        assert!(pricing::is_eligible(false, min, dec("0.001")));
    }

    /// The wholesale hint matches case-insensitively, as a substring
    #[test]
    fn test_name_convention_classification() {
        assert!(pricing::name_implies_minimum_weight("Mayorista"));
        assert!(pricing::name_implies_minimum_weight("MAYORISTA"));
        assert!(pricing::name_implies_minimum_weight("Mayorista Premium"));
        assert!(pricing::name_implies_minimum_weight("Precio mayorista 2024"));
        assert!(!pricing::name_implies_minimum_weight("Minorista"));
        assert!(!pricing::name_implies_minimum_weight("Retail"));
        assert!(!pricing::name_implies_minimum_weight(""));
    }

    /// Products under a gated tier are rescaled, not filtered: a 10.00/kg
    /// product at 20% markup displays 50.00 cost and 60.00 final price
    #[test]
    fn test_product_display_rescale() {
        let cost_per_kg = dec("10.00");
        let min = dec("5");
        let final_per_kg = pricing::final_price(cost_per_kg, dec("20"));

        assert_eq!(pricing::minimum_unit_price(cost_per_kg, min), dec("50.00"));
        assert_eq!(pricing::minimum_unit_price(final_per_kg, min), dec("60.00"));

        // Stored values stay per kilogram
        assert_eq!(cost_per_kg, dec("10.00"));
        assert_eq!(final_per_kg, dec("12.00"));
    }

    /// Gated listing simulation: under-weight mixes are omitted entirely
    #[test]
    fn test_gated_listing_filters_mixes() {
        let min = dec("5.000");
        let mixes = vec![
            ("Mix Energía", dec("4.999")),
            ("Mix Proteico", dec("5.000")),
            ("Mix Tropical", dec("7.250")),
        ];

        let listed: Vec<&str> = mixes
            .iter()
            .filter(|(_, weight)| pricing::is_eligible(true, min, *weight))
            .map(|(name, _)| *name)
            .collect();

        assert_eq!(listed, vec!["Mix Proteico", "Mix Tropical"]);
    }

    /// Write-time batch simulation: gated under-weight entries are dropped,
    /// everything else is kept
    #[test]
    fn test_markup_batch_gating() {
        let total_weight = dec("3.500");
        // (requires_minimum_weight, minimum_weight_kg, markup_percent)
        let batch = vec![
            (false, dec("5"), dec("40")), // retail: kept
            (true, dec("5"), dec("15")),  // wholesale, under weight: dropped
            (false, dec("5"), dec("0")),  // zero markup: skipped on create
        ];

        let persisted: Vec<Decimal> = batch
            .iter()
            .filter(|(_, _, markup)| *markup != Decimal::ZERO)
            .filter(|(gated, min, _)| pricing::is_eligible(*gated, *min, total_weight))
            .map(|(_, _, markup)| *markup)
            .collect();

        assert_eq!(persisted, vec![dec("40")]);
    }

    /// The product asymmetry holds: the same weight that excludes a mix
    /// leaves a product listed (rescaled)
    #[test]
    fn test_asymmetric_policy() {
        let min = dec("5.000");
        let under_weight = dec("2.000");

        // Mix: excluded
        assert!(!pricing::is_eligible(true, min, under_weight));

        // Product with the same total quantity: still priced, per 5 kg unit
        let displayed = pricing::minimum_unit_price(dec("8.00"), min);
        assert_eq!(displayed, dec("40.00"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn weight_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=20000i64).prop_map(|n| Decimal::new(n, 3)) // 0.000 to 20.000 kg
    }

    fn price_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=100000i64).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Eligibility is exactly the >= comparison for gated tiers
        #[test]
        fn prop_gated_eligibility_is_threshold(
            weight in weight_strategy(),
            min in weight_strategy()
        ) {
            prop_assert_eq!(pricing::is_eligible(true, min, weight), weight >= min);
        }

        /// Ungated tiers never filter
        #[test]
        fn prop_ungated_always_eligible(
            weight in weight_strategy(),
            min in weight_strategy()
        ) {
            prop_assert!(pricing::is_eligible(false, min, weight));
        }

        /// Rescaling by the default minimum multiplies the price by five
        #[test]
        fn prop_default_rescale_is_times_five(per_kg in price_strategy()) {
            let unit = pricing::minimum_unit_price(per_kg, pricing::default_minimum_weight_kg());
            prop_assert_eq!(unit, pricing::round_money(per_kg * Decimal::from(5)));
        }

        /// Appending the hint to any name turns the classification on
        #[test]
        fn prop_hint_substring_classifies(prefix in "[a-zA-Z ]{0,12}") {
            let name = format!("{}mayorista", prefix);
            prop_assert!(pricing::name_implies_minimum_weight(&name));
        }
    }
}
