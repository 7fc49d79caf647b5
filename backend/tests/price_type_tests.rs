//! Price tier management tests
//!
//! Tests for the default-tier invariant and the markup upsert semantics,
//! simulated over in-memory state the way the services sequence their writes.

use rust_decimal::Decimal;
use std::str::FromStr;

use shared::pricing;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Default-tier invariant
// ============================================================================

#[cfg(test)]
mod default_invariant_tests {
    /// In-memory stand-in for the price_types table
    struct Tiers {
        rows: Vec<(u32, bool)>, // (id, is_default)
    }

    impl Tiers {
        /// Mirror of the service's unset-all-then-set-one sequence
        fn set_default(&mut self, id: u32) {
            for (_, is_default) in &mut self.rows {
                *is_default = false;
            }
            for (row_id, is_default) in &mut self.rows {
                if *row_id == id {
                    *is_default = true;
                }
            }
        }

        fn default_count(&self) -> usize {
            self.rows.iter().filter(|(_, d)| *d).count()
        }
    }

    #[test]
    fn test_set_default_leaves_exactly_one() {
        let mut tiers = Tiers {
            rows: vec![(1, true), (2, false), (3, false)],
        };

        tiers.set_default(3);
        assert_eq!(tiers.default_count(), 1);
        assert!(tiers.rows[2].1);

        tiers.set_default(2);
        assert_eq!(tiers.default_count(), 1);
        assert!(tiers.rows[1].1);
    }

    #[test]
    fn test_set_default_idempotent() {
        let mut tiers = Tiers {
            rows: vec![(1, true), (2, false)],
        };

        tiers.set_default(1);
        tiers.set_default(1);
        assert_eq!(tiers.default_count(), 1);
        assert!(tiers.rows[0].1);
    }

    /// Even a table corrupted with two defaults heals on the next set
    #[test]
    fn test_set_default_heals_double_default() {
        let mut tiers = Tiers {
            rows: vec![(1, true), (2, true), (3, false)],
        };

        tiers.set_default(3);
        assert_eq!(tiers.default_count(), 1);
    }
}

// ============================================================================
// Gate seeding from the name convention
// ============================================================================

#[cfg(test)]
mod gate_seeding_tests {
    use super::*;

    /// Mirror of the create-path defaulting: explicit value wins, otherwise
    /// the name decides
    fn seed_gate(name: &str, explicit: Option<bool>) -> bool {
        explicit.unwrap_or_else(|| pricing::name_implies_minimum_weight(name))
    }

    /// Mirror of the update-path defaulting: the gate is never cleared
    /// implicitly
    fn reseed_gate(name: &str, current: bool, explicit: Option<bool>) -> bool {
        explicit.unwrap_or(current || pricing::name_implies_minimum_weight(name))
    }

    #[test]
    fn test_create_seeds_from_name() {
        assert!(seed_gate("Mayorista", None));
        assert!(seed_gate("mayorista premium", None));
        assert!(!seed_gate("Minorista", None));
    }

    #[test]
    fn test_explicit_value_overrides_name() {
        assert!(!seed_gate("Mayorista", Some(false)));
        assert!(seed_gate("Retail", Some(true)));
    }

    #[test]
    fn test_rename_onto_hint_turns_gate_on() {
        assert!(reseed_gate("Precio Mayorista", false, None));
    }

    #[test]
    fn test_rename_away_keeps_gate() {
        // Renaming away from the hint does not silently drop the gate
        assert!(reseed_gate("Distribuidores", true, None));
    }

    #[test]
    fn test_default_minimum_is_five_kg() {
        assert_eq!(pricing::default_minimum_weight_kg(), dec("5"));
    }
}

// ============================================================================
// Markup upsert semantics
// ============================================================================

#[cfg(test)]
mod upsert_tests {
    use super::*;
    use std::collections::BTreeMap;

    /// In-memory stand-in for a markup join table keyed by tier id
    struct MarkupTable {
        rows: BTreeMap<u32, (Decimal, Decimal)>, // tier -> (markup, final)
    }

    impl MarkupTable {
        fn new() -> Self {
            Self {
                rows: BTreeMap::new(),
            }
        }

        /// Mirror of the upsert-by-natural-key policy
        fn upsert(&mut self, tier: u32, markup: Decimal, base_cost: Decimal) {
            let final_price = pricing::final_price(base_cost, markup);
            self.rows.insert(tier, (markup, final_price));
        }
    }

    /// Saving the same markup twice yields one row with the same price
    #[test]
    fn test_upsert_idempotent() {
        let mut table = MarkupTable::new();
        let base = dec("10.00");

        table.upsert(1, dec("25"), base);
        table.upsert(1, dec("25"), base);

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[&1], (dec("25"), dec("12.50")));
    }

    /// A second save with a new markup updates in place
    #[test]
    fn test_upsert_updates_in_place() {
        let mut table = MarkupTable::new();
        let base = dec("10.00");

        table.upsert(1, dec("25"), base);
        table.upsert(1, dec("40"), base);

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[&1], (dec("40"), dec("14.00")));
    }

    /// Distinct tiers keep distinct rows
    #[test]
    fn test_upsert_separate_tiers() {
        let mut table = MarkupTable::new();
        let base = dec("20.00");

        table.upsert(1, dec("10"), base);
        table.upsert(2, dec("50"), base);

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[&1].1, dec("22.00"));
        assert_eq!(table.rows[&2].1, dec("30.00"));
    }
}
