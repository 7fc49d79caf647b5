//! HTTP handlers for product category endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::product_type::{ProductTypeInput, ProductTypeService};
use crate::AppState;
use shared::models::ProductType;

/// List all product categories
pub async fn list_product_types(State(state): State<AppState>) -> AppResult<Json<Vec<ProductType>>> {
    let service = ProductTypeService::new(state.db);
    let product_types = service.list().await?;
    Ok(Json(product_types))
}

/// Create a product category
pub async fn create_product_type(
    State(state): State<AppState>,
    Json(input): Json<ProductTypeInput>,
) -> AppResult<Json<ProductType>> {
    let service = ProductTypeService::new(state.db);
    let product_type = service.create(input).await?;
    Ok(Json(product_type))
}

/// Rename a product category
pub async fn update_product_type(
    State(state): State<AppState>,
    Path(product_type_id): Path<Uuid>,
    Json(input): Json<ProductTypeInput>,
) -> AppResult<Json<ProductType>> {
    let service = ProductTypeService::new(state.db);
    let product_type = service.update(product_type_id, input).await?;
    Ok(Json(product_type))
}

/// Delete a product category
pub async fn delete_product_type(
    State(state): State<AppState>,
    Path(product_type_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ProductTypeService::new(state.db);
    service.delete(product_type_id).await?;
    Ok(Json(()))
}
