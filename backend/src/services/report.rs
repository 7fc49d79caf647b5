//! Price-list report assembly and CSV export
//!
//! Assembles the already-computed pricing fields for the report renderer.
//! Under a weight-gated tier the product columns switch to per-minimum-unit
//! values and under-weight mixes are left out, mirroring what the printed
//! price list shows.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::mix::MixService;
use crate::services::price_type::PriceTypeService;
use crate::services::product::ProductService;
use shared::models::PriceType;
use shared::types::{format_price_for_report, format_weight_for_report, DecimalSeparator};

/// Report service
#[derive(Clone)]
pub struct ReportService {
    db: PgPool,
}

/// One product line of a price list; cost and final price are already
/// rescaled to the minimum purchase unit when the tier is gated
#[derive(Debug, Serialize)]
pub struct ReportProduct {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub total_quantity_kg: Decimal,
    pub cost: Decimal,
    pub markup_percent: Decimal,
    pub final_price: Decimal,
}

/// One mix line of a price list
#[derive(Debug, Serialize)]
pub struct ReportMix {
    pub name: String,
    pub products: Vec<String>,
    pub total_weight_kg: Decimal,
    pub total_cost: Decimal,
    pub markup_percent: Decimal,
    pub final_price: Decimal,
}

/// Price list for one tier
#[derive(Debug, Serialize)]
pub struct PriceListReport {
    pub price_type: PriceType,
    /// Present when the tier is weight-gated: the renderer shows the
    /// minimum-purchase warning and per-unit column headers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_purchase_weight_kg: Option<Decimal>,
    pub products: Vec<ReportProduct>,
    pub mixes: Vec<ReportMix>,
}

impl ReportService {
    /// Create a new ReportService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Assemble the price list for one tier
    pub async fn price_list(&self, price_type_id: Uuid) -> AppResult<PriceListReport> {
        let price_type = PriceTypeService::new(self.db.clone()).get(price_type_id).await?;
        self.price_list_for(price_type).await
    }

    /// Assemble one price list per tier, in tier creation order
    pub async fn price_list_all(&self) -> AppResult<Vec<PriceListReport>> {
        let price_types = PriceTypeService::new(self.db.clone()).list().await?;

        let mut reports = Vec::with_capacity(price_types.len());
        for price_type in price_types {
            reports.push(self.price_list_for(price_type).await?);
        }

        Ok(reports)
    }

    /// Render a tier's price list as CSV with locale-appropriate decimals
    pub async fn price_list_csv(
        &self,
        price_type_id: Uuid,
        separator: DecimalSeparator,
    ) -> AppResult<String> {
        let report = self.price_list(price_type_id).await?;

        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record([
                "kind",
                "name",
                "detail",
                "weight_kg",
                "cost",
                "markup_percent",
                "final_price",
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

        for product in &report.products {
            let record = [
                "producto".to_string(),
                product.name.clone(),
                product.product_type.clone(),
                format_weight_for_report(product.total_quantity_kg, separator),
                format_price_for_report(product.cost, separator),
                format_price_for_report(product.markup_percent, separator),
                format_price_for_report(product.final_price, separator),
            ];
            writer
                .write_record(&record)
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        for mix in &report.mixes {
            let record = [
                "mix".to_string(),
                mix.name.clone(),
                mix.products.join(", "),
                format_weight_for_report(mix.total_weight_kg, separator),
                format_price_for_report(mix.total_cost, separator),
                format_price_for_report(mix.markup_percent, separator),
                format_price_for_report(mix.final_price, separator),
            ];
            writer
                .write_record(&record)
                .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

        String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))
    }

    async fn price_list_for(&self, price_type: PriceType) -> AppResult<PriceListReport> {
        let products = ProductService::new(self.db.clone())
            .list_with_prices(price_type.id)
            .await?;
        let mixes = MixService::new(self.db.clone())
            .list_with_prices(price_type.id)
            .await?;

        let report_products = products
            .into_iter()
            .map(|p| ReportProduct {
                // Gated tiers report the per-minimum-unit values; storage
                // stays per kilogram
                cost: p.display_cost.unwrap_or(p.product.cost_per_kg),
                final_price: p.display_final_price.unwrap_or(p.final_price),
                name: p.product.name,
                product_type: p.product.product_type,
                total_quantity_kg: p.product.total_quantity_kg,
                markup_percent: p.markup_percent,
            })
            .collect();

        let report_mixes = mixes
            .into_iter()
            .map(|m| ReportMix {
                name: m.mix.name,
                products: m.products.into_iter().map(|p| p.name).collect(),
                total_weight_kg: m.total_weight_kg,
                total_cost: m.mix.total_cost,
                markup_percent: m.markup_percent,
                final_price: m.final_price,
            })
            .collect();

        let minimum_purchase_weight_kg = price_type
            .requires_minimum_weight
            .then_some(price_type.minimum_weight_kg);

        Ok(PriceListReport {
            price_type,
            minimum_purchase_weight_kg,
            products: report_products,
            mixes: report_mixes,
        })
    }
}
