//! HTTP handlers for product endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::product::{
    CreateProductInput, PricedProduct, ProductDetail, ProductService, SetMarkupInput,
    UpdateProductInput,
};
use crate::AppState;
use shared::models::{Product, ProductPriceType};

/// Query parameters for the priced listing
#[derive(Debug, Deserialize)]
pub struct PricedListQuery {
    pub price_type_id: Uuid,
}

/// List all products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let service = ProductService::new(state.db);
    let products = service.list().await?;
    Ok(Json(products))
}

/// List products with their markup under one tier
pub async fn list_products_with_prices(
    State(state): State<AppState>,
    Query(query): Query<PricedListQuery>,
) -> AppResult<Json<Vec<PricedProduct>>> {
    let service = ProductService::new(state.db);
    let products = service.list_with_prices(query.price_type_id).await?;
    Ok(Json(products))
}

/// Get a product with all its markup rows
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ProductDetail>> {
    let service = ProductService::new(state.db);
    let product = service.get(product_id).await?;
    Ok(Json(product))
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.create(input).await?;
    Ok(Json(product))
}

/// Update a product
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<UpdateProductInput>,
) -> AppResult<Json<Product>> {
    let service = ProductService::new(state.db);
    let product = service.update(product_id, input).await?;
    Ok(Json(product))
}

/// Set one tier's markup for a product
pub async fn set_product_markup(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(input): Json<SetMarkupInput>,
) -> AppResult<Json<ProductPriceType>> {
    let service = ProductService::new(state.db);
    let markup = service.set_markup(product_id, input).await?;
    Ok(Json(markup))
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = ProductService::new(state.db);
    service.delete(product_id).await?;
    Ok(Json(()))
}
