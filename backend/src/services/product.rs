//! Product catalog and product pricing service
//!
//! Markup rows are upserted by their (product, price tier) natural key, so
//! repeated saves stay idempotent. Products under a weight-gated tier are
//! never filtered from listings; their cost and final price are reported
//! per minimum purchase unit instead of per kilogram.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::mix;
use crate::services::price_type::PriceTypeService;
use shared::models::{Product, ProductPriceType};
use shared::pricing;

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Database row for a product
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    #[sqlx(rename = "type")]
    product_type: String,
    total_quantity_kg: Decimal,
    total_price_paid: Decimal,
    cost_per_kg: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            product_type: row.product_type,
            total_quantity_kg: row.total_quantity_kg,
            total_price_paid: row.total_price_paid,
            cost_per_kg: row.cost_per_kg,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Row for the priced listing query
#[derive(Debug, FromRow)]
struct PricedProductRow {
    id: Uuid,
    name: String,
    #[sqlx(rename = "type")]
    product_type: String,
    total_quantity_kg: Decimal,
    total_price_paid: Decimal,
    cost_per_kg: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    markup_percent: Option<Decimal>,
    final_price: Option<Decimal>,
}

/// Database row for a product markup entry
#[derive(Debug, FromRow)]
struct ProductPriceRow {
    id: Uuid,
    product_id: Uuid,
    price_type_id: Uuid,
    markup_percent: Decimal,
    final_price: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductPriceRow> for ProductPriceType {
    fn from(row: ProductPriceRow) -> Self {
        ProductPriceType {
            id: row.id,
            product_id: row.product_id,
            price_type_id: row.price_type_id,
            markup_percent: row.markup_percent,
            final_price: row.final_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One markup assignment in a create/update batch
#[derive(Debug, Clone, Deserialize)]
pub struct MarkupEntry {
    pub price_type_id: Uuid,
    #[serde(default)]
    pub markup_percent: Decimal,
}

/// Input for creating a product
#[derive(Debug, Deserialize)]
pub struct CreateProductInput {
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub total_quantity_kg: Decimal,
    pub total_price_paid: Decimal,
    pub cost_per_kg: Decimal,
    pub price_types: Option<Vec<MarkupEntry>>,
}

/// Input for updating a product
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub total_quantity_kg: Option<Decimal>,
    pub total_price_paid: Option<Decimal>,
    pub cost_per_kg: Option<Decimal>,
    pub price_types: Option<Vec<MarkupEntry>>,
}

/// Input for setting a single markup
#[derive(Debug, Deserialize)]
pub struct SetMarkupInput {
    pub price_type_id: Uuid,
    pub markup_percent: Decimal,
}

/// Product with its markup under one tier; display values are per minimum
/// purchase unit when the tier is weight-gated
#[derive(Debug, Serialize)]
pub struct PricedProduct {
    #[serde(flatten)]
    pub product: Product,
    pub markup_percent: Decimal,
    pub final_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_final_price: Option<Decimal>,
}

/// Markup entry with its tier name, for the detail view
#[derive(Debug, Serialize, FromRow)]
pub struct ProductPriceEntry {
    pub id: Uuid,
    pub price_type_id: Uuid,
    pub price_type_name: String,
    pub markup_percent: Decimal,
    pub final_price: Decimal,
}

/// Product detail with all its markup rows
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub price_types: Vec<ProductPriceEntry>,
}

const PRODUCT_COLUMNS: &str =
    "id, name, type, total_quantity_kg, total_price_paid, cost_per_kg, created_at, updated_at";

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List products ordered by category, then name
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products ORDER BY type, name",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// List products with their markup under one tier
    ///
    /// Products without a markup row report zeros. Under a weight-gated tier
    /// the display cost and price are rescaled to the minimum purchase unit.
    pub async fn list_with_prices(&self, price_type_id: Uuid) -> AppResult<Vec<PricedProduct>> {
        let price_type = PriceTypeService::new(self.db.clone()).get(price_type_id).await?;

        let rows = sqlx::query_as::<_, PricedProductRow>(
            r#"
            SELECT p.id, p.name, p.type, p.total_quantity_kg, p.total_price_paid,
                   p.cost_per_kg, p.created_at, p.updated_at,
                   ppt.markup_percent, ppt.final_price
            FROM products p
            LEFT JOIN product_price_types ppt
                   ON ppt.product_id = p.id AND ppt.price_type_id = $1
            ORDER BY p.type, p.name
            "#,
        )
        .bind(price_type_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let markup_percent = row.markup_percent.unwrap_or(Decimal::ZERO);
                let final_price = row.final_price.unwrap_or(Decimal::ZERO);
                let (display_cost, display_final_price) = if price_type.requires_minimum_weight {
                    (
                        Some(pricing::minimum_unit_price(
                            row.cost_per_kg,
                            price_type.minimum_weight_kg,
                        )),
                        Some(pricing::minimum_unit_price(
                            final_price,
                            price_type.minimum_weight_kg,
                        )),
                    )
                } else {
                    (None, None)
                };

                PricedProduct {
                    product: Product {
                        id: row.id,
                        name: row.name,
                        product_type: row.product_type,
                        total_quantity_kg: row.total_quantity_kg,
                        total_price_paid: row.total_price_paid,
                        cost_per_kg: row.cost_per_kg,
                        created_at: row.created_at,
                        updated_at: row.updated_at,
                    },
                    markup_percent,
                    final_price,
                    display_cost,
                    display_final_price,
                }
            })
            .collect())
    }

    /// Get a product with all its markup rows
    pub async fn get(&self, product_id: Uuid) -> AppResult<ProductDetail> {
        let product = self.fetch_product(product_id).await?;

        let price_types = sqlx::query_as::<_, ProductPriceEntry>(
            r#"
            SELECT ppt.id, ppt.price_type_id, pt.name AS price_type_name,
                   ppt.markup_percent, ppt.final_price
            FROM product_price_types ppt
            INNER JOIN price_types pt ON pt.id = ppt.price_type_id
            WHERE ppt.product_id = $1
            ORDER BY pt.created_at
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ProductDetail {
            product,
            price_types,
        })
    }

    /// Create a product, optionally with an initial markup batch
    ///
    /// Tiers left at 0% in the batch are skipped; they get rows later if
    /// explicitly set.
    pub async fn create(&self, input: CreateProductInput) -> AppResult<Product> {
        validate_product_fields(
            Some(input.name.as_str()),
            Some(input.product_type.as_str()),
            Some(input.total_quantity_kg),
            Some(input.total_price_paid),
            Some(input.cost_per_kg),
        )?;

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, type, total_quantity_kg, total_price_paid, cost_per_kg)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.product_type)
        .bind(pricing::round_weight(input.total_quantity_kg))
        .bind(pricing::round_money(input.total_price_paid))
        .bind(pricing::round_money(input.cost_per_kg))
        .fetch_one(&mut *tx)
        .await?;

        let product: Product = row.into();

        if let Some(entries) = input.price_types {
            for entry in entries.iter().filter(|e| e.markup_percent != Decimal::ZERO) {
                validate_markup(entry.markup_percent)?;
                ensure_price_type_exists(&mut tx, entry.price_type_id).await?;
                upsert_markup_tx(
                    &mut tx,
                    product.id,
                    entry.price_type_id,
                    entry.markup_percent,
                    product.cost_per_kg,
                )
                .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(product_id = %product.id, "Product created");

        Ok(product)
    }

    /// Update a product and upsert any supplied markup batch
    ///
    /// Batch entries are recomputed against the product's current (possibly
    /// just-updated) cost per kg.
    pub async fn update(&self, product_id: Uuid, input: UpdateProductInput) -> AppResult<Product> {
        let current = self.fetch_product(product_id).await?;

        validate_product_fields(
            input.name.as_deref(),
            input.product_type.as_deref(),
            input.total_quantity_kg,
            input.total_price_paid,
            input.cost_per_kg,
        )?;

        let name = input.name.unwrap_or(current.name);
        let product_type = input.product_type.unwrap_or(current.product_type);
        let total_quantity_kg = input.total_quantity_kg.unwrap_or(current.total_quantity_kg);
        let total_price_paid = input.total_price_paid.unwrap_or(current.total_price_paid);
        // Cost stays as persisted unless explicitly supplied; it is never
        // re-derived from quantity and price paid.
        let cost_per_kg = input.cost_per_kg.unwrap_or(current.cost_per_kg);

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products
             SET name = $1, type = $2, total_quantity_kg = $3, total_price_paid = $4,
                 cost_per_kg = $5, updated_at = NOW()
             WHERE id = $6
             RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(&name)
        .bind(&product_type)
        .bind(pricing::round_weight(total_quantity_kg))
        .bind(pricing::round_money(total_price_paid))
        .bind(pricing::round_money(cost_per_kg))
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        let product: Product = row.into();

        if let Some(entries) = input.price_types {
            for entry in &entries {
                validate_markup(entry.markup_percent)?;
                ensure_price_type_exists(&mut tx, entry.price_type_id).await?;
                upsert_markup_tx(
                    &mut tx,
                    product.id,
                    entry.price_type_id,
                    entry.markup_percent,
                    product.cost_per_kg,
                )
                .await?;
            }
        }

        tx.commit().await?;

        Ok(product)
    }

    /// Set one tier's markup for a product (upsert by natural key)
    pub async fn set_markup(&self, product_id: Uuid, input: SetMarkupInput) -> AppResult<ProductPriceType> {
        validate_markup(input.markup_percent)?;

        let product = self.fetch_product(product_id).await?;

        let mut tx = self.db.begin().await?;

        ensure_price_type_exists(&mut tx, input.price_type_id).await?;

        let row = upsert_markup_tx(
            &mut tx,
            product.id,
            input.price_type_id,
            input.markup_percent,
            product.cost_per_kg,
        )
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Delete a product
    ///
    /// Markup rows and mix line items go with it (FK cascade), so every mix
    /// that contained the product gets its total and tier prices
    /// recalculated inside the same transaction.
    pub async fn delete(&self, product_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let affected_mixes: Vec<Uuid> = sqlx::query_scalar(
            "SELECT DISTINCT mix_id FROM mix_products WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        for mix_id in affected_mixes {
            mix::recalculate_mix_total(&mut tx, mix_id).await?;
        }

        tx.commit().await?;

        tracing::info!(%product_id, "Product deleted");

        Ok(())
    }

    async fn fetch_product(&self, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }
}

/// Upsert a product markup row by its (product, tier) natural key
async fn upsert_markup_tx(
    tx: &mut Transaction<'_, Postgres>,
    product_id: Uuid,
    price_type_id: Uuid,
    markup_percent: Decimal,
    cost_per_kg: Decimal,
) -> Result<ProductPriceRow, sqlx::Error> {
    let final_price = pricing::final_price(cost_per_kg, markup_percent);

    sqlx::query_as::<_, ProductPriceRow>(
        r#"
        INSERT INTO product_price_types (product_id, price_type_id, markup_percent, final_price)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (product_id, price_type_id) DO UPDATE SET
            markup_percent = EXCLUDED.markup_percent,
            final_price = EXCLUDED.final_price,
            updated_at = NOW()
        RETURNING id, product_id, price_type_id, markup_percent, final_price,
                  created_at, updated_at
        "#,
    )
    .bind(product_id)
    .bind(price_type_id)
    .bind(markup_percent)
    .bind(final_price)
    .fetch_one(&mut **tx)
    .await
}

async fn ensure_price_type_exists(
    tx: &mut Transaction<'_, Postgres>,
    price_type_id: Uuid,
) -> AppResult<()> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM price_types WHERE id = $1)")
            .bind(price_type_id)
            .fetch_one(&mut **tx)
            .await?;

    if !exists {
        return Err(AppError::NotFound("Price type".to_string()));
    }

    Ok(())
}

fn validate_markup(markup_percent: Decimal) -> AppResult<()> {
    shared::validation::validate_markup_percent(markup_percent).map_err(|_| AppError::Validation {
        field: "markup_percent".to_string(),
        message: "Markup percent cannot be below -100".to_string(),
        message_es: "El porcentaje de aumento no puede ser menor a -100".to_string(),
    })
}

fn validate_product_fields(
    name: Option<&str>,
    product_type: Option<&str>,
    total_quantity_kg: Option<Decimal>,
    total_price_paid: Option<Decimal>,
    cost_per_kg: Option<Decimal>,
) -> AppResult<()> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_es: "El nombre es requerido".to_string(),
            });
        }
    }

    if let Some(product_type) = product_type {
        if product_type.trim().is_empty() {
            return Err(AppError::Validation {
                field: "type".to_string(),
                message: "Type is required".to_string(),
                message_es: "El tipo es requerido".to_string(),
            });
        }
    }

    if let Some(quantity) = total_quantity_kg {
        if quantity <= Decimal::ZERO {
            return Err(AppError::InvalidQuantity {
                field: "total_quantity_kg".to_string(),
            });
        }
    }

    if let Some(price_paid) = total_price_paid {
        if price_paid < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "total_price_paid".to_string(),
                message: "Total price paid cannot be negative".to_string(),
                message_es: "El precio total no puede ser negativo".to_string(),
            });
        }
    }

    if let Some(cost) = cost_per_kg {
        if cost < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "cost_per_kg".to_string(),
                message: "Cost per kg cannot be negative".to_string(),
                message_es: "El costo por kg no puede ser negativo".to_string(),
            });
        }
    }

    Ok(())
}
