//! HTTP handlers for price tier endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::price_type::{CreatePriceTypeInput, PriceTypeService, UpdatePriceTypeInput};
use crate::AppState;
use shared::models::PriceType;

/// List all price tiers
pub async fn list_price_types(State(state): State<AppState>) -> AppResult<Json<Vec<PriceType>>> {
    let service = PriceTypeService::new(state.db);
    let price_types = service.list().await?;
    Ok(Json(price_types))
}

/// Get the default price tier
pub async fn get_default_price_type(
    State(state): State<AppState>,
) -> AppResult<Json<Option<PriceType>>> {
    let service = PriceTypeService::new(state.db);
    let price_type = service.get_default().await?;
    Ok(Json(price_type))
}

/// Get a price tier by id
pub async fn get_price_type(
    State(state): State<AppState>,
    Path(price_type_id): Path<Uuid>,
) -> AppResult<Json<PriceType>> {
    let service = PriceTypeService::new(state.db);
    let price_type = service.get(price_type_id).await?;
    Ok(Json(price_type))
}

/// Create a price tier
pub async fn create_price_type(
    State(state): State<AppState>,
    Json(input): Json<CreatePriceTypeInput>,
) -> AppResult<Json<PriceType>> {
    let service = PriceTypeService::new(state.db);
    let price_type = service.create(input).await?;
    Ok(Json(price_type))
}

/// Update a price tier
pub async fn update_price_type(
    State(state): State<AppState>,
    Path(price_type_id): Path<Uuid>,
    Json(input): Json<UpdatePriceTypeInput>,
) -> AppResult<Json<PriceType>> {
    let service = PriceTypeService::new(state.db);
    let price_type = service.update(price_type_id, input).await?;
    Ok(Json(price_type))
}

/// Make a tier the single default
pub async fn set_default_price_type(
    State(state): State<AppState>,
    Path(price_type_id): Path<Uuid>,
) -> AppResult<Json<PriceType>> {
    let service = PriceTypeService::new(state.db);
    let price_type = service.set_default(price_type_id).await?;
    Ok(Json(price_type))
}

/// Delete a price tier
pub async fn delete_price_type(
    State(state): State<AppState>,
    Path(price_type_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = PriceTypeService::new(state.db);
    service.delete(price_type_id).await?;
    Ok(Json(()))
}
