//! HTTP handlers for mix endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::product::PricedListQuery;
use crate::services::mix::{
    AddLineItemInput, CreateMixInput, MixDetail, MixService, MixWithProducts, PricedMix,
    SetMixMarkupInput, UpdateLineItemInput, UpdateMixInput,
};
use crate::AppState;
use shared::models::{Mix, MixPriceType, MixProduct};

/// List all mixes
pub async fn list_mixes(State(state): State<AppState>) -> AppResult<Json<Vec<MixWithProducts>>> {
    let service = MixService::new(state.db);
    let mixes = service.list().await?;
    Ok(Json(mixes))
}

/// List mixes under one tier; under-weight mixes are omitted for gated tiers
pub async fn list_mixes_with_prices(
    State(state): State<AppState>,
    Query(query): Query<PricedListQuery>,
) -> AppResult<Json<Vec<PricedMix>>> {
    let service = MixService::new(state.db);
    let mixes = service.list_with_prices(query.price_type_id).await?;
    Ok(Json(mixes))
}

/// Get a mix with its line items and markup rows
pub async fn get_mix(
    State(state): State<AppState>,
    Path(mix_id): Path<Uuid>,
) -> AppResult<Json<MixDetail>> {
    let service = MixService::new(state.db);
    let mix = service.get(mix_id).await?;
    Ok(Json(mix))
}

/// Create a mix with its line items
pub async fn create_mix(
    State(state): State<AppState>,
    Json(input): Json<CreateMixInput>,
) -> AppResult<Json<Mix>> {
    let service = MixService::new(state.db);
    let mix = service.create(input).await?;
    Ok(Json(mix))
}

/// Rename a mix and/or upsert a markup batch
pub async fn update_mix(
    State(state): State<AppState>,
    Path(mix_id): Path<Uuid>,
    Json(input): Json<UpdateMixInput>,
) -> AppResult<Json<Mix>> {
    let service = MixService::new(state.db);
    let mix = service.update(mix_id, input).await?;
    Ok(Json(mix))
}

/// Set one tier's markup for a mix
pub async fn set_mix_markup(
    State(state): State<AppState>,
    Path(mix_id): Path<Uuid>,
    Json(input): Json<SetMixMarkupInput>,
) -> AppResult<Json<MixPriceType>> {
    let service = MixService::new(state.db);
    let markup = service.set_markup(mix_id, input).await?;
    Ok(Json(markup))
}

/// Add a product to a mix
pub async fn add_mix_product(
    State(state): State<AppState>,
    Path(mix_id): Path<Uuid>,
    Json(input): Json<AddLineItemInput>,
) -> AppResult<Json<MixProduct>> {
    let service = MixService::new(state.db);
    let line_item = service.add_line_item(mix_id, input).await?;
    Ok(Json(line_item))
}

/// Change a line item's quantity
pub async fn update_mix_product(
    State(state): State<AppState>,
    Path(line_item_id): Path<Uuid>,
    Json(input): Json<UpdateLineItemInput>,
) -> AppResult<Json<MixProduct>> {
    let service = MixService::new(state.db);
    let line_item = service.update_line_item(line_item_id, input).await?;
    Ok(Json(line_item))
}

/// Remove a line item from its mix
pub async fn remove_mix_product(
    State(state): State<AppState>,
    Path(line_item_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = MixService::new(state.db);
    service.remove_line_item(line_item_id).await?;
    Ok(Json(()))
}

/// Delete a mix
pub async fn delete_mix(
    State(state): State<AppState>,
    Path(mix_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = MixService::new(state.db);
    service.delete(mix_id).await?;
    Ok(Json(()))
}
