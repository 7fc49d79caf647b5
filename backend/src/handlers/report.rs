//! HTTP handlers for price-list report endpoints

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::report::{PriceListReport, ReportService};
use crate::AppState;
use shared::types::DecimalSeparator;

/// Query parameters for the single-tier report
#[derive(Debug, Deserialize)]
pub struct PriceListQuery {
    pub price_type_id: Uuid,
}

/// Query parameters for the CSV export
#[derive(Debug, Deserialize)]
pub struct PriceListCsvQuery {
    pub price_type_id: Uuid,
    pub locale: Option<String>,
}

/// Price list for one tier
pub async fn get_price_list(
    State(state): State<AppState>,
    Query(query): Query<PriceListQuery>,
) -> AppResult<Json<PriceListReport>> {
    let service = ReportService::new(state.db);
    let report = service.price_list(query.price_type_id).await?;
    Ok(Json(report))
}

/// One price list per tier
pub async fn get_price_list_all(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<PriceListReport>>> {
    let service = ReportService::new(state.db);
    let reports = service.price_list_all().await?;
    Ok(Json(reports))
}

/// CSV export of a tier's price list
pub async fn get_price_list_csv(
    State(state): State<AppState>,
    Query(query): Query<PriceListCsvQuery>,
) -> AppResult<impl IntoResponse> {
    let separator = query
        .locale
        .as_deref()
        .map(DecimalSeparator::from_locale)
        .unwrap_or_else(|| DecimalSeparator::from_locale(&state.config.report.locale));

    let service = ReportService::new(state.db);
    let csv = service.price_list_csv(query.price_type_id, separator).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"lista-de-precios.csv\"",
            ),
        ],
        csv,
    ))
}
