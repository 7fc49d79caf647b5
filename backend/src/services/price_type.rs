//! Price tier management service
//!
//! Maintains the "exactly one default tier" invariant with an unset-all,
//! then-set-one write sequence inside a single transaction, and seeds the
//! minimum-weight gate from the wholesale naming convention.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::PriceType;
use shared::pricing;

/// Price tier service
#[derive(Clone)]
pub struct PriceTypeService {
    db: PgPool,
}

/// Database row for a price tier
#[derive(Debug, FromRow)]
struct PriceTypeRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    is_default: bool,
    requires_minimum_weight: bool,
    minimum_weight_kg: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PriceTypeRow> for PriceType {
    fn from(row: PriceTypeRow) -> Self {
        PriceType {
            id: row.id,
            name: row.name,
            description: row.description,
            is_default: row.is_default,
            requires_minimum_weight: row.requires_minimum_weight,
            minimum_weight_kg: row.minimum_weight_kg,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a price tier
#[derive(Debug, Deserialize)]
pub struct CreatePriceTypeInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    /// When absent, seeded from the wholesale naming convention
    pub requires_minimum_weight: Option<bool>,
    /// When absent, defaults to 5.000 kg
    pub minimum_weight_kg: Option<Decimal>,
}

/// Input for updating a price tier
#[derive(Debug, Deserialize)]
pub struct UpdatePriceTypeInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_default: Option<bool>,
    pub requires_minimum_weight: Option<bool>,
    pub minimum_weight_kg: Option<Decimal>,
}

const PRICE_TYPE_COLUMNS: &str = "id, name, description, is_default, requires_minimum_weight, \
     minimum_weight_kg, created_at, updated_at";

impl PriceTypeService {
    /// Create a new PriceTypeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all price tiers
    pub async fn list(&self) -> AppResult<Vec<PriceType>> {
        let rows = sqlx::query_as::<_, PriceTypeRow>(&format!(
            "SELECT {} FROM price_types ORDER BY created_at",
            PRICE_TYPE_COLUMNS
        ))
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(PriceType::from).collect())
    }

    /// Get a price tier by id
    pub async fn get(&self, price_type_id: Uuid) -> AppResult<PriceType> {
        let row = sqlx::query_as::<_, PriceTypeRow>(&format!(
            "SELECT {} FROM price_types WHERE id = $1",
            PRICE_TYPE_COLUMNS
        ))
        .bind(price_type_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Price type".to_string()))?;

        Ok(row.into())
    }

    /// Get the default price tier, if one is configured
    pub async fn get_default(&self) -> AppResult<Option<PriceType>> {
        let row = sqlx::query_as::<_, PriceTypeRow>(&format!(
            "SELECT {} FROM price_types WHERE is_default = true",
            PRICE_TYPE_COLUMNS
        ))
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(PriceType::from))
    }

    /// Create a price tier
    pub async fn create(&self, input: CreatePriceTypeInput) -> AppResult<PriceType> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_es: "El nombre es requerido".to_string(),
            });
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM price_types WHERE name = $1)",
        )
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }

        // Name convention seeds the gate; callers can still override it
        let requires_minimum_weight = input
            .requires_minimum_weight
            .unwrap_or_else(|| pricing::name_implies_minimum_weight(&input.name));
        let minimum_weight_kg = input
            .minimum_weight_kg
            .unwrap_or_else(pricing::default_minimum_weight_kg);

        if minimum_weight_kg <= Decimal::ZERO {
            return Err(AppError::InvalidQuantity {
                field: "minimum_weight_kg".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        if input.is_default {
            sqlx::query("UPDATE price_types SET is_default = false WHERE is_default = true")
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, PriceTypeRow>(&format!(
            "INSERT INTO price_types (name, description, is_default, requires_minimum_weight, minimum_weight_kg)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            PRICE_TYPE_COLUMNS
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.is_default)
        .bind(requires_minimum_weight)
        .bind(pricing::round_weight(minimum_weight_kg))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Update a price tier
    pub async fn update(&self, price_type_id: Uuid, input: UpdatePriceTypeInput) -> AppResult<PriceType> {
        let existing = self.get(price_type_id).await?;

        let name = input.name.unwrap_or(existing.name);
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_es: "El nombre es requerido".to_string(),
            });
        }
        let description = input.description.or(existing.description);
        let is_default = input.is_default.unwrap_or(existing.is_default);

        // Renaming onto the wholesale convention turns the gate on when the
        // caller did not say otherwise; it is never cleared implicitly.
        let requires_minimum_weight = input.requires_minimum_weight.unwrap_or(
            existing.requires_minimum_weight || pricing::name_implies_minimum_weight(&name),
        );
        let minimum_weight_kg = input.minimum_weight_kg.unwrap_or(existing.minimum_weight_kg);

        if minimum_weight_kg <= Decimal::ZERO {
            return Err(AppError::InvalidQuantity {
                field: "minimum_weight_kg".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        if is_default {
            sqlx::query("UPDATE price_types SET is_default = false WHERE is_default = true")
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, PriceTypeRow>(&format!(
            "UPDATE price_types
             SET name = $1, description = $2, is_default = $3,
                 requires_minimum_weight = $4, minimum_weight_kg = $5, updated_at = NOW()
             WHERE id = $6
             RETURNING {}",
            PRICE_TYPE_COLUMNS
        ))
        .bind(&name)
        .bind(&description)
        .bind(is_default)
        .bind(requires_minimum_weight)
        .bind(pricing::round_weight(minimum_weight_kg))
        .bind(price_type_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Make a tier the single default
    pub async fn set_default(&self, price_type_id: Uuid) -> AppResult<PriceType> {
        let mut tx = self.db.begin().await?;

        sqlx::query("UPDATE price_types SET is_default = false WHERE is_default = true")
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, PriceTypeRow>(&format!(
            "UPDATE price_types SET is_default = true, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            PRICE_TYPE_COLUMNS
        ))
        .bind(price_type_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Price type".to_string()))?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Delete a price tier; the default tier cannot be removed
    pub async fn delete(&self, price_type_id: Uuid) -> AppResult<()> {
        let existing = self.get(price_type_id).await?;

        if existing.is_default {
            return Err(AppError::Conflict {
                resource: "price_type".to_string(),
                message: "The default price type cannot be deleted".to_string(),
                message_es: "No se puede eliminar el tipo de precio por defecto".to_string(),
            });
        }

        sqlx::query("DELETE FROM price_types WHERE id = $1")
            .bind(price_type_id)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
