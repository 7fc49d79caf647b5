//! Mix (product blend) service
//!
//! Owns the consistency of derived mix data: every line-item mutation runs
//! inside one transaction that rewrites the mix total and every dependent
//! tier price before returning. Weight-gated tiers are dropped from markup
//! batches when the mix is under the minimum weight, and under-weight mixes
//! are omitted from gated listings entirely.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::price_type::PriceTypeService;
use crate::services::product::MarkupEntry;
use shared::models::{Mix, MixPriceType, MixProduct};
use shared::pricing;

/// Mix service
#[derive(Clone)]
pub struct MixService {
    db: PgPool,
}

/// Database row for a mix
#[derive(Debug, FromRow)]
struct MixRow {
    id: Uuid,
    name: String,
    total_cost: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MixRow> for Mix {
    fn from(row: MixRow) -> Self {
        Mix {
            id: row.id,
            name: row.name,
            total_cost: row.total_cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for a line item
#[derive(Debug, FromRow)]
struct MixProductRow {
    id: Uuid,
    mix_id: Uuid,
    product_id: Uuid,
    quantity_kg: Decimal,
    partial_cost: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MixProductRow> for MixProduct {
    fn from(row: MixProductRow) -> Self {
        MixProduct {
            id: row.id,
            mix_id: row.mix_id,
            product_id: row.product_id,
            quantity_kg: row.quantity_kg,
            partial_cost: row.partial_cost,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for a mix markup entry
#[derive(Debug, FromRow)]
struct MixPriceRow {
    id: Uuid,
    mix_id: Uuid,
    price_type_id: Uuid,
    markup_percent: Decimal,
    final_price: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MixPriceRow> for MixPriceType {
    fn from(row: MixPriceRow) -> Self {
        MixPriceType {
            id: row.id,
            mix_id: row.mix_id,
            price_type_id: row.price_type_id,
            markup_percent: row.markup_percent,
            final_price: row.final_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Constituent product reference shown in mix listings
#[derive(Debug, Serialize, FromRow)]
pub struct MixProductRef {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub product_type: String,
}

/// Mix with its constituent product summaries
#[derive(Debug, Serialize)]
pub struct MixWithProducts {
    #[serde(flatten)]
    pub mix: Mix,
    pub products: Vec<MixProductRef>,
}

/// Mix listed under one tier, with its weight and computed price
#[derive(Debug, Serialize)]
pub struct PricedMix {
    #[serde(flatten)]
    pub mix: Mix,
    pub products: Vec<MixProductRef>,
    pub total_weight_kg: Decimal,
    pub markup_percent: Decimal,
    pub final_price: Decimal,
}

/// Line item with its product info, for the detail view
#[derive(Debug, Serialize)]
pub struct MixLineItem {
    pub id: Uuid,
    pub quantity_kg: Decimal,
    pub partial_cost: Decimal,
    pub product: LineItemProduct,
}

/// Product fields embedded in a line item
#[derive(Debug, Serialize)]
pub struct LineItemProduct {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub cost_per_kg: Decimal,
}

/// Markup entry with its tier name, for the detail view
#[derive(Debug, Serialize, FromRow)]
pub struct MixPriceEntry {
    pub id: Uuid,
    pub price_type_id: Uuid,
    pub price_type_name: String,
    pub markup_percent: Decimal,
    pub final_price: Decimal,
}

/// Mix detail with line items and markup rows
#[derive(Debug, Serialize)]
pub struct MixDetail {
    #[serde(flatten)]
    pub mix: Mix,
    pub products: Vec<MixLineItem>,
    pub price_types: Vec<MixPriceEntry>,
}

/// One line item in a create request
#[derive(Debug, Deserialize)]
pub struct LineItemInput {
    pub product_id: Uuid,
    pub quantity_kg: Decimal,
}

/// Input for creating a mix with its line items
#[derive(Debug, Deserialize)]
pub struct CreateMixInput {
    pub name: String,
    pub products: Vec<LineItemInput>,
    pub price_types: Option<Vec<MarkupEntry>>,
}

/// Input for updating a mix
#[derive(Debug, Deserialize)]
pub struct UpdateMixInput {
    pub name: Option<String>,
    pub price_types: Option<Vec<MarkupEntry>>,
}

/// Input for adding a product to a mix
#[derive(Debug, Deserialize)]
pub struct AddLineItemInput {
    pub product_id: Uuid,
    pub quantity_kg: Decimal,
}

/// Input for changing a line item's quantity
#[derive(Debug, Deserialize)]
pub struct UpdateLineItemInput {
    pub quantity_kg: Decimal,
}

/// Input for setting a single markup
#[derive(Debug, Deserialize)]
pub struct SetMixMarkupInput {
    pub price_type_id: Uuid,
    pub markup_percent: Decimal,
}

const MIX_COLUMNS: &str = "id, name, total_cost, created_at, updated_at";
const MIX_PRODUCT_COLUMNS: &str =
    "id, mix_id, product_id, quantity_kg, partial_cost, created_at, updated_at";

impl MixService {
    /// Create a new MixService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List mixes with their constituent product summaries
    pub async fn list(&self) -> AppResult<Vec<MixWithProducts>> {
        let rows = sqlx::query_as::<_, MixRow>(&format!(
            "SELECT {} FROM mixes ORDER BY created_at",
            MIX_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        let mut mixes = Vec::with_capacity(rows.len());
        for row in rows {
            let products = self.product_refs(row.id).await?;
            mixes.push(MixWithProducts {
                mix: row.into(),
                products,
            });
        }

        Ok(mixes)
    }

    /// List mixes under one tier with their computed prices
    ///
    /// For a weight-gated tier, mixes below the minimum weight are omitted
    /// from the result entirely, not listed with a zero price.
    pub async fn list_with_prices(&self, price_type_id: Uuid) -> AppResult<Vec<PricedMix>> {
        let price_type = PriceTypeService::new(self.db.clone()).get(price_type_id).await?;

        let rows = sqlx::query_as::<_, MixRow>(&format!(
            "SELECT {} FROM mixes ORDER BY created_at",
            MIX_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        let mut mixes = Vec::new();
        for row in rows {
            let total_weight: Decimal = sqlx::query_scalar(
                "SELECT COALESCE(SUM(quantity_kg), 0) FROM mix_products WHERE mix_id = $1",
            )
            .bind(row.id)
            .fetch_one(&self.db)
            .await?;
            let total_weight = pricing::round_weight(total_weight);

            if !price_type.is_eligible(total_weight) {
                continue;
            }

            let price = sqlx::query_as::<_, (Decimal, Decimal)>(
                "SELECT markup_percent, final_price FROM mix_price_types
                 WHERE mix_id = $1 AND price_type_id = $2",
            )
            .bind(row.id)
            .bind(price_type_id)
            .fetch_optional(&self.db)
            .await?;

            let (markup_percent, final_price) = price.unwrap_or((Decimal::ZERO, Decimal::ZERO));
            let products = self.product_refs(row.id).await?;

            mixes.push(PricedMix {
                mix: row.into(),
                products,
                total_weight_kg: total_weight,
                markup_percent,
                final_price,
            });
        }

        Ok(mixes)
    }

    /// Get a mix with its line items and markup rows
    pub async fn get(&self, mix_id: Uuid) -> AppResult<MixDetail> {
        let mix = self.fetch_mix(mix_id).await?;

        #[derive(FromRow)]
        struct LineRow {
            id: Uuid,
            quantity_kg: Decimal,
            partial_cost: Decimal,
            product_id: Uuid,
            product_name: String,
            product_type: String,
            cost_per_kg: Decimal,
        }

        let lines = sqlx::query_as::<_, LineRow>(
            r#"
            SELECT mp.id, mp.quantity_kg, mp.partial_cost,
                   p.id AS product_id, p.name AS product_name,
                   p.type AS product_type, p.cost_per_kg
            FROM mix_products mp
            INNER JOIN products p ON p.id = mp.product_id
            WHERE mp.mix_id = $1
            ORDER BY mp.created_at
            "#,
        )
        .bind(mix_id)
        .fetch_all(&self.db)
        .await?;

        let price_types = sqlx::query_as::<_, MixPriceEntry>(
            r#"
            SELECT mpt.id, mpt.price_type_id, pt.name AS price_type_name,
                   mpt.markup_percent, mpt.final_price
            FROM mix_price_types mpt
            INNER JOIN price_types pt ON pt.id = mpt.price_type_id
            WHERE mpt.mix_id = $1
            ORDER BY pt.created_at
            "#,
        )
        .bind(mix_id)
        .fetch_all(&self.db)
        .await?;

        Ok(MixDetail {
            mix,
            products: lines
                .into_iter()
                .map(|line| MixLineItem {
                    id: line.id,
                    quantity_kg: line.quantity_kg,
                    partial_cost: line.partial_cost,
                    product: LineItemProduct {
                        id: line.product_id,
                        name: line.product_name,
                        product_type: line.product_type,
                        cost_per_kg: line.cost_per_kg,
                    },
                })
                .collect(),
            price_types,
        })
    }

    /// Create a mix with its line items and an optional markup batch
    ///
    /// The total is recalculated once all line items are in, then the batch
    /// is persisted against the final total. Zero-percent entries are
    /// skipped; weight-gated tiers are dropped while the mix is under their
    /// minimum weight.
    pub async fn create(&self, input: CreateMixInput) -> AppResult<Mix> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_es: "El nombre es requerido".to_string(),
            });
        }
        if input.products.is_empty() {
            return Err(AppError::Validation {
                field: "products".to_string(),
                message: "At least one product is required".to_string(),
                message_es: "Debe agregar al menos un producto".to_string(),
            });
        }
        for line in &input.products {
            if line.quantity_kg <= Decimal::ZERO {
                return Err(AppError::InvalidQuantity {
                    field: "quantity_kg".to_string(),
                });
            }
        }

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, MixRow>(&format!(
            "INSERT INTO mixes (name, total_cost) VALUES ($1, 0) RETURNING {}",
            MIX_COLUMNS
        ))
        .bind(&input.name)
        .fetch_one(&mut *tx)
        .await?;

        let mix_id = row.id;

        for line in &input.products {
            insert_line_item(&mut tx, mix_id, line.product_id, line.quantity_kg).await?;
        }

        let total_cost = recalculate_mix_total(&mut tx, mix_id).await?;

        if let Some(entries) = input.price_types {
            let total_weight = mix_total_weight(&mut tx, mix_id).await?;
            for entry in entries.iter().filter(|e| e.markup_percent != Decimal::ZERO) {
                apply_markup_entry(&mut tx, mix_id, entry, total_cost, total_weight).await?;
            }
        }

        tx.commit().await?;

        tracing::info!(%mix_id, %total_cost, "Mix created");

        Ok(Mix {
            total_cost,
            ..row.into()
        })
    }

    /// Rename a mix and/or upsert a markup batch against its current total
    pub async fn update(&self, mix_id: Uuid, input: UpdateMixInput) -> AppResult<Mix> {
        let current = self.fetch_mix(mix_id).await?;

        let name = match input.name {
            Some(name) if !name.trim().is_empty() => name,
            Some(_) => {
                return Err(AppError::Validation {
                    field: "name".to_string(),
                    message: "Name is required".to_string(),
                    message_es: "El nombre es requerido".to_string(),
                })
            }
            None => current.name,
        };

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, MixRow>(&format!(
            "UPDATE mixes SET name = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            MIX_COLUMNS
        ))
        .bind(&name)
        .bind(mix_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(entries) = input.price_types {
            let total_weight = mix_total_weight(&mut tx, mix_id).await?;
            for entry in &entries {
                apply_markup_entry(&mut tx, mix_id, entry, row.total_cost, total_weight).await?;
            }
        }

        tx.commit().await?;

        Ok(row.into())
    }

    /// Set one tier's markup for a mix (upsert by natural key)
    ///
    /// A weight-gated tier is rejected outright while the mix is under its
    /// minimum weight; batch persistence drops such entries silently, but a
    /// direct set deserves an explicit error.
    pub async fn set_markup(&self, mix_id: Uuid, input: SetMixMarkupInput) -> AppResult<MixPriceType> {
        shared::validation::validate_markup_percent(input.markup_percent).map_err(|_| {
            AppError::Validation {
                field: "markup_percent".to_string(),
                message: "Markup percent cannot be below -100".to_string(),
                message_es: "El porcentaje de aumento no puede ser menor a -100".to_string(),
            }
        })?;

        let mix = self.fetch_mix(mix_id).await?;
        let price_type = PriceTypeService::new(self.db.clone())
            .get(input.price_type_id)
            .await?;

        let mut tx = self.db.begin().await?;

        let total_weight = mix_total_weight(&mut tx, mix_id).await?;
        if !price_type.is_eligible(total_weight) {
            return Err(AppError::Validation {
                field: "price_type_id".to_string(),
                message: format!(
                    "Mix is below the tier's minimum weight of {} kg",
                    price_type.minimum_weight_kg
                ),
                message_es: format!(
                    "El mix no alcanza el peso mínimo de {} kg del tipo de precio",
                    price_type.minimum_weight_kg
                ),
            });
        }

        let row = upsert_mix_markup_tx(
            &mut tx,
            mix_id,
            input.price_type_id,
            input.markup_percent,
            mix.total_cost,
        )
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Add a product to a mix
    ///
    /// The mix total and every dependent tier price are refreshed before
    /// this returns.
    pub async fn add_line_item(&self, mix_id: Uuid, input: AddLineItemInput) -> AppResult<MixProduct> {
        if input.quantity_kg <= Decimal::ZERO {
            return Err(AppError::InvalidQuantity {
                field: "quantity_kg".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        ensure_mix_exists(&mut tx, mix_id).await?;
        let line = insert_line_item(&mut tx, mix_id, input.product_id, input.quantity_kg).await?;
        recalculate_mix_total(&mut tx, mix_id).await?;

        tx.commit().await?;

        Ok(line.into())
    }

    /// Change a line item's quantity
    ///
    /// The partial cost is re-snapshotted from the product's current cost
    /// per kg, then the mix total and tier prices are refreshed.
    pub async fn update_line_item(
        &self,
        line_item_id: Uuid,
        input: UpdateLineItemInput,
    ) -> AppResult<MixProduct> {
        if input.quantity_kg <= Decimal::ZERO {
            return Err(AppError::InvalidQuantity {
                field: "quantity_kg".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let current = sqlx::query_as::<_, (Uuid, Decimal)>(
            r#"
            SELECT mp.mix_id, p.cost_per_kg
            FROM mix_products mp
            INNER JOIN products p ON p.id = mp.product_id
            WHERE mp.id = $1
            "#,
        )
        .bind(line_item_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Mix line item".to_string()))?;

        let (mix_id, cost_per_kg) = current;
        let partial_cost = pricing::partial_cost(input.quantity_kg, cost_per_kg)
            .map_err(|_| AppError::InvalidQuantity {
                field: "quantity_kg".to_string(),
            })?;

        let row = sqlx::query_as::<_, MixProductRow>(&format!(
            "UPDATE mix_products SET quantity_kg = $1, partial_cost = $2, updated_at = NOW()
             WHERE id = $3
             RETURNING {}",
            MIX_PRODUCT_COLUMNS
        ))
        .bind(pricing::round_weight(input.quantity_kg))
        .bind(partial_cost)
        .bind(line_item_id)
        .fetch_one(&mut *tx)
        .await?;

        recalculate_mix_total(&mut tx, mix_id).await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Remove a line item from its mix
    pub async fn remove_line_item(&self, line_item_id: Uuid) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        let mix_id: Uuid = sqlx::query_scalar("SELECT mix_id FROM mix_products WHERE id = $1")
            .bind(line_item_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Mix line item".to_string()))?;

        sqlx::query("DELETE FROM mix_products WHERE id = $1")
            .bind(line_item_id)
            .execute(&mut *tx)
            .await?;

        recalculate_mix_total(&mut tx, mix_id).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Delete a mix (line items and markup rows cascade)
    pub async fn delete(&self, mix_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM mixes WHERE id = $1")
            .bind(mix_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Mix".to_string()));
        }

        Ok(())
    }

    async fn fetch_mix(&self, mix_id: Uuid) -> AppResult<Mix> {
        let row = sqlx::query_as::<_, MixRow>(&format!(
            "SELECT {} FROM mixes WHERE id = $1",
            MIX_COLUMNS
        ))
        .bind(mix_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Mix".to_string()))?;

        Ok(row.into())
    }

    async fn product_refs(&self, mix_id: Uuid) -> AppResult<Vec<MixProductRef>> {
        let refs = sqlx::query_as::<_, MixProductRef>(
            r#"
            SELECT p.id, p.name, p.type
            FROM mix_products mp
            INNER JOIN products p ON p.id = mp.product_id
            WHERE mp.mix_id = $1
            ORDER BY mp.created_at
            "#,
        )
        .bind(mix_id)
        .fetch_all(&self.db)
        .await?;

        Ok(refs)
    }
}

/// Recalculate a mix's total cost and refresh every dependent tier price
///
/// Must run inside the same transaction as the line-item mutation that
/// made the stored values stale. Returns the new total.
pub(crate) async fn recalculate_mix_total(
    tx: &mut Transaction<'_, Postgres>,
    mix_id: Uuid,
) -> AppResult<Decimal> {
    // A line item whose product vanished means the stored costs can no
    // longer be trusted; surface it instead of summing around it.
    let orphaned: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM mix_products mp
        LEFT JOIN products p ON p.id = mp.product_id
        WHERE mp.mix_id = $1 AND p.id IS NULL
        "#,
    )
    .bind(mix_id)
    .fetch_one(&mut **tx)
    .await?;

    if orphaned > 0 {
        return Err(AppError::InconsistentState(format!(
            "mix {} has {} line items referencing missing products",
            mix_id, orphaned
        )));
    }

    let total: Decimal =
        sqlx::query_scalar("SELECT COALESCE(SUM(partial_cost), 0) FROM mix_products WHERE mix_id = $1")
            .bind(mix_id)
            .fetch_one(&mut **tx)
            .await?;
    let total = pricing::round_money(total);

    sqlx::query("UPDATE mixes SET total_cost = $1, updated_at = NOW() WHERE id = $2")
        .bind(total)
        .bind(mix_id)
        .execute(&mut **tx)
        .await?;

    // The base cost changed, so every stored tier price is stale
    let markups = sqlx::query_as::<_, (Uuid, Decimal)>(
        "SELECT id, markup_percent FROM mix_price_types WHERE mix_id = $1",
    )
    .bind(mix_id)
    .fetch_all(&mut **tx)
    .await?;

    for (row_id, markup_percent) in markups {
        let final_price = pricing::final_price(total, markup_percent);
        sqlx::query("UPDATE mix_price_types SET final_price = $1, updated_at = NOW() WHERE id = $2")
            .bind(final_price)
            .bind(row_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(total)
}

/// Current total weight of a mix's line items
async fn mix_total_weight(tx: &mut Transaction<'_, Postgres>, mix_id: Uuid) -> AppResult<Decimal> {
    let total: Decimal =
        sqlx::query_scalar("SELECT COALESCE(SUM(quantity_kg), 0) FROM mix_products WHERE mix_id = $1")
            .bind(mix_id)
            .fetch_one(&mut **tx)
            .await?;

    Ok(pricing::round_weight(total))
}

/// Insert a line item, snapshotting its partial cost from the product's
/// current cost per kg
async fn insert_line_item(
    tx: &mut Transaction<'_, Postgres>,
    mix_id: Uuid,
    product_id: Uuid,
    quantity_kg: Decimal,
) -> AppResult<MixProductRow> {
    let cost_per_kg: Decimal =
        sqlx::query_scalar("SELECT cost_per_kg FROM products WHERE id = $1")
            .bind(product_id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    let partial_cost = pricing::partial_cost(quantity_kg, cost_per_kg)
        .map_err(|_| AppError::InvalidQuantity {
            field: "quantity_kg".to_string(),
        })?;

    let row = sqlx::query_as::<_, MixProductRow>(&format!(
        "INSERT INTO mix_products (mix_id, product_id, quantity_kg, partial_cost)
         VALUES ($1, $2, $3, $4)
         RETURNING {}",
        MIX_PRODUCT_COLUMNS
    ))
    .bind(mix_id)
    .bind(product_id)
    .bind(pricing::round_weight(quantity_kg))
    .bind(partial_cost)
    .fetch_one(&mut **tx)
    .await?;

    Ok(row)
}

/// Persist one batch markup entry, honoring the weight gate
///
/// Entries for a gated tier are dropped silently while the mix is under the
/// minimum weight; no row is written and any existing row stays untouched.
async fn apply_markup_entry(
    tx: &mut Transaction<'_, Postgres>,
    mix_id: Uuid,
    entry: &MarkupEntry,
    total_cost: Decimal,
    total_weight: Decimal,
) -> AppResult<()> {
    shared::validation::validate_markup_percent(entry.markup_percent).map_err(|_| {
        AppError::Validation {
            field: "markup_percent".to_string(),
            message: "Markup percent cannot be below -100".to_string(),
            message_es: "El porcentaje de aumento no puede ser menor a -100".to_string(),
        }
    })?;

    let gate = sqlx::query_as::<_, (bool, Decimal)>(
        "SELECT requires_minimum_weight, minimum_weight_kg FROM price_types WHERE id = $1",
    )
    .bind(entry.price_type_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Price type".to_string()))?;

    if !pricing::is_eligible(gate.0, gate.1, total_weight) {
        return Ok(());
    }

    upsert_mix_markup_tx(tx, mix_id, entry.price_type_id, entry.markup_percent, total_cost).await?;

    Ok(())
}

/// Upsert a mix markup row by its (mix, tier) natural key
async fn upsert_mix_markup_tx(
    tx: &mut Transaction<'_, Postgres>,
    mix_id: Uuid,
    price_type_id: Uuid,
    markup_percent: Decimal,
    total_cost: Decimal,
) -> Result<MixPriceRow, sqlx::Error> {
    let final_price = pricing::final_price(total_cost, markup_percent);

    sqlx::query_as::<_, MixPriceRow>(
        r#"
        INSERT INTO mix_price_types (mix_id, price_type_id, markup_percent, final_price)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (mix_id, price_type_id) DO UPDATE SET
            markup_percent = EXCLUDED.markup_percent,
            final_price = EXCLUDED.final_price,
            updated_at = NOW()
        RETURNING id, mix_id, price_type_id, markup_percent, final_price,
                  created_at, updated_at
        "#,
    )
    .bind(mix_id)
    .bind(price_type_id)
    .bind(markup_percent)
    .bind(final_price)
    .fetch_one(&mut **tx)
    .await
}

async fn ensure_mix_exists(tx: &mut Transaction<'_, Postgres>, mix_id: Uuid) -> AppResult<()> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM mixes WHERE id = $1)")
        .bind(mix_id)
        .fetch_one(&mut **tx)
        .await?;

    if !exists {
        return Err(AppError::NotFound("Mix".to_string()));
    }

    Ok(())
}
