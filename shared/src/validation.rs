//! Validation utilities for the Henco inventory & pricing platform

use rust_decimal::Decimal;

// ============================================================================
// Pricing Validations
// ============================================================================

/// Validate that a quantity or weight is strictly positive
pub fn validate_positive_quantity(quantity_kg: Decimal) -> Result<(), &'static str> {
    if quantity_kg <= Decimal::ZERO {
        return Err("Quantity must be greater than zero");
    }
    Ok(())
}

/// Validate that a markup percentage keeps the final price non-negative
pub fn validate_markup_percent(markup_percent: Decimal) -> Result<(), &'static str> {
    if markup_percent < Decimal::from(-100) {
        return Err("Markup percent cannot be below -100");
    }
    Ok(())
}

/// Validate that a cost or price is not negative
pub fn validate_cost_non_negative(cost: Decimal) -> Result<(), &'static str> {
    if cost < Decimal::ZERO {
        return Err("Cost cannot be negative");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate that a name is non-empty after trimming
pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Name is required");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_positive_quantity() {
        assert!(validate_positive_quantity(dec("0.001")).is_ok());
        assert!(validate_positive_quantity(Decimal::ZERO).is_err());
        assert!(validate_positive_quantity(dec("-1")).is_err());
    }

    #[test]
    fn test_markup_percent_lower_bound() {
        assert!(validate_markup_percent(dec("-100")).is_ok());
        assert!(validate_markup_percent(dec("-100.01")).is_err());
        assert!(validate_markup_percent(dec("250")).is_ok());
    }

    #[test]
    fn test_cost_non_negative() {
        assert!(validate_cost_non_negative(Decimal::ZERO).is_ok());
        assert!(validate_cost_non_negative(dec("10.50")).is_ok());
        assert!(validate_cost_non_negative(dec("-0.01")).is_err());
    }

    #[test]
    fn test_name_required() {
        assert!(validate_name("Almendras").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }
}
