//! Price-list report formatting tests
//!
//! Tests for locale-aware decimal formatting and the displayed values the
//! report assembles for gated and ungated tiers.

use rust_decimal::Decimal;
use std::str::FromStr;

use shared::pricing;
use shared::types::{format_price_for_report, format_weight_for_report, DecimalSeparator};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[cfg(test)]
mod formatting_tests {
    use super::*;

    #[test]
    fn test_comma_separator() {
        assert_eq!(
            format_price_for_report(dec("1234.56"), DecimalSeparator::Comma),
            "1234,56"
        );
    }

    #[test]
    fn test_point_separator() {
        assert_eq!(
            format_price_for_report(dec("1234.56"), DecimalSeparator::Point),
            "1234.56"
        );
    }

    #[test]
    fn test_prices_pad_to_two_places() {
        assert_eq!(
            format_price_for_report(dec("7"), DecimalSeparator::Comma),
            "7,00"
        );
        assert_eq!(
            format_price_for_report(dec("7.5"), DecimalSeparator::Point),
            "7.50"
        );
    }

    #[test]
    fn test_weights_pad_to_three_places() {
        assert_eq!(
            format_weight_for_report(dec("5"), DecimalSeparator::Comma),
            "5,000"
        );
        assert_eq!(
            format_weight_for_report(dec("0.25"), DecimalSeparator::Point),
            "0.250"
        );
    }

    #[test]
    fn test_locale_resolution() {
        assert_eq!(DecimalSeparator::from_locale("es"), DecimalSeparator::Comma);
        assert_eq!(DecimalSeparator::from_locale("en"), DecimalSeparator::Point);
        assert_eq!(DecimalSeparator::from_locale("fr"), DecimalSeparator::Point);
    }
}

#[cfg(test)]
mod report_value_tests {
    use super::*;

    /// What the report shows for a product row under each kind of tier
    fn report_values(
        cost_per_kg: Decimal,
        markup: Decimal,
        gated: bool,
        min_weight: Decimal,
    ) -> (Decimal, Decimal) {
        let final_per_kg = pricing::final_price(cost_per_kg, markup);
        if gated {
            (
                pricing::minimum_unit_price(cost_per_kg, min_weight),
                pricing::minimum_unit_price(final_per_kg, min_weight),
            )
        } else {
            (cost_per_kg, final_per_kg)
        }
    }

    /// Ungated tier: per-kg values pass straight through
    #[test]
    fn test_retail_report_values() {
        let (cost, price) = report_values(dec("10.00"), dec("20"), false, dec("5"));
        assert_eq!(cost, dec("10.00"));
        assert_eq!(price, dec("12.00"));
    }

    /// Gated tier: both columns are per minimum purchase unit
    #[test]
    fn test_wholesale_report_values() {
        let (cost, price) = report_values(dec("10.00"), dec("20"), true, dec("5"));
        assert_eq!(cost, dec("50.00"));
        assert_eq!(price, dec("60.00"));
    }

    /// A product without a markup row reports zeros for markup and price
    #[test]
    fn test_missing_markup_row_reports_zero() {
        let markup = Decimal::ZERO;
        let final_price = Decimal::ZERO;
        let formatted = format_price_for_report(final_price, DecimalSeparator::Comma);
        assert_eq!(markup, Decimal::ZERO);
        assert_eq!(formatted, "0,00");
    }

    /// CSV line simulation for a gated product row in the es locale
    #[test]
    fn test_csv_row_values() {
        let (cost, price) = report_values(dec("8.40"), dec("35"), true, dec("5"));

        let row = [
            "producto".to_string(),
            "Almendras".to_string(),
            "Frutos secos".to_string(),
            format_weight_for_report(dec("12.5"), DecimalSeparator::Comma),
            format_price_for_report(cost, DecimalSeparator::Comma),
            format_price_for_report(dec("35"), DecimalSeparator::Comma),
            format_price_for_report(price, DecimalSeparator::Comma),
        ];

        assert_eq!(row[3], "12,500");
        assert_eq!(row[4], "42,00");
        assert_eq!(row[6], "56,70");
    }
}
