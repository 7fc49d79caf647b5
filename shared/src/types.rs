//! Common types used across the platform

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::pricing::{round_money, round_weight};

/// Decimal separator used when rendering report values
///
/// Price lists for the Spanish-speaking deployment use the comma separator
/// ("1234,56"); exports aimed at spreadsheet tooling keep the point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSeparator {
    #[default]
    Comma,
    Point,
}

impl DecimalSeparator {
    /// Resolve from a locale code ("es" => comma, anything else => point)
    pub fn from_locale(locale: &str) -> Self {
        if locale.eq_ignore_ascii_case("es") {
            DecimalSeparator::Comma
        } else {
            DecimalSeparator::Point
        }
    }
}

/// Format a money amount for a report with the given separator
/// (e.g. `1234,56` for comma locales)
pub fn format_price_for_report(price: Decimal, separator: DecimalSeparator) -> String {
    let fixed = format!("{:.2}", round_money(price));
    match separator {
        DecimalSeparator::Point => fixed,
        DecimalSeparator::Comma => fixed.replace('.', ","),
    }
}

/// Format a weight for a report, always three decimal places
pub fn format_weight_for_report(weight_kg: Decimal, separator: DecimalSeparator) -> String {
    let fixed = format!("{:.3}", round_weight(weight_kg));
    match separator {
        DecimalSeparator::Point => fixed,
        DecimalSeparator::Comma => fixed.replace('.', ","),
    }
}

/// Pagination parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 50,
        }
    }
}
