//! Product category catalog service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::ProductType;

/// Product category service
#[derive(Clone)]
pub struct ProductTypeService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct ProductTypeRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductTypeRow> for ProductType {
    fn from(row: ProductTypeRow) -> Self {
        ProductType {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating or renaming a category
#[derive(Debug, Deserialize)]
pub struct ProductTypeInput {
    pub name: String,
}

impl ProductTypeService {
    /// Create a new ProductTypeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List categories ordered by name
    pub async fn list(&self) -> AppResult<Vec<ProductType>> {
        let rows = sqlx::query_as::<_, ProductTypeRow>(
            "SELECT id, name, created_at, updated_at FROM product_types ORDER BY name",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ProductType::from).collect())
    }

    /// Create a category
    pub async fn create(&self, input: ProductTypeInput) -> AppResult<ProductType> {
        self.validate_name(&input.name, None).await?;

        let row = sqlx::query_as::<_, ProductTypeRow>(
            "INSERT INTO product_types (name) VALUES ($1)
             RETURNING id, name, created_at, updated_at",
        )
        .bind(&input.name)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Rename a category
    pub async fn update(&self, product_type_id: Uuid, input: ProductTypeInput) -> AppResult<ProductType> {
        self.validate_name(&input.name, Some(product_type_id)).await?;

        let row = sqlx::query_as::<_, ProductTypeRow>(
            "UPDATE product_types SET name = $1, updated_at = NOW() WHERE id = $2
             RETURNING id, name, created_at, updated_at",
        )
        .bind(&input.name)
        .bind(product_type_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product type".to_string()))?;

        Ok(row.into())
    }

    /// Delete a category
    pub async fn delete(&self, product_type_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM product_types WHERE id = $1")
            .bind(product_type_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product type".to_string()));
        }

        Ok(())
    }

    async fn validate_name(&self, name: &str, exclude_id: Option<Uuid>) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name is required".to_string(),
                message_es: "El nombre es requerido".to_string(),
            });
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM product_types WHERE name = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::DuplicateEntry("name".to_string()));
        }

        Ok(())
    }
}
