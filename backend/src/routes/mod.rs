//! Route definitions for the Henco inventory & pricing backend

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Product catalog
        .nest("/products", product_routes())
        // Product categories
        .nest("/product-types", product_type_routes())
        // Price tiers
        .nest("/price-types", price_type_routes())
        // Mixes and their line items
        .nest("/mixes", mix_routes())
        // Price-list reports
        .nest("/reports", report_routes())
}

/// Product management routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/with-prices", get(handlers::list_products_with_prices))
        .route(
            "/:product_id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .route("/:product_id/prices", put(handlers::set_product_markup))
}

/// Product category routes
fn product_type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_product_types).post(handlers::create_product_type),
        )
        .route(
            "/:product_type_id",
            put(handlers::update_product_type).delete(handlers::delete_product_type),
        )
}

/// Price tier routes
fn price_type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_price_types).post(handlers::create_price_type),
        )
        .route("/default", get(handlers::get_default_price_type))
        .route(
            "/:price_type_id",
            get(handlers::get_price_type)
                .put(handlers::update_price_type)
                .delete(handlers::delete_price_type),
        )
        .route("/:price_type_id/default", post(handlers::set_default_price_type))
}

/// Mix management routes
fn mix_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_mixes).post(handlers::create_mix))
        .route("/with-prices", get(handlers::list_mixes_with_prices))
        .route(
            "/:mix_id",
            get(handlers::get_mix)
                .put(handlers::update_mix)
                .delete(handlers::delete_mix),
        )
        .route("/:mix_id/prices", put(handlers::set_mix_markup))
        .route("/:mix_id/products", post(handlers::add_mix_product))
        .route(
            "/products/:line_item_id",
            put(handlers::update_mix_product).delete(handlers::remove_mix_product),
        )
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/price-list", get(handlers::get_price_list))
        .route("/price-list/all", get(handlers::get_price_list_all))
        .route("/price-list.csv", get(handlers::get_price_list_csv))
}
