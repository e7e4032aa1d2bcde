//! Public catalog surface: browse, search, detail. No auth required.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::services::catalog::{BrandListing, SearchItem, SneakerDetail};
use crate::services::filters::{ActiveFilter, SneakerFilter, SneakerFilterParams};
use crate::AppState;

/// Filtered search response with an echo of the applied filters.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub results: Vec<SearchItem>,
    pub active_filters: Vec<ActiveFilter>,
}

/// `GET /` — brands with their active sneakers, served from the listing
/// cache when warm.
pub async fn browse(State(state): State<AppState>) -> Result<Json<Vec<BrandListing>>, ServiceError> {
    let listing = state.catalog.browse().await?;
    Ok(Json(listing))
}

/// `GET /query` — filtered search over non-deleted sneakers.
pub async fn query(
    State(state): State<AppState>,
    Query(params): Query<SneakerFilterParams>,
) -> Result<Json<SearchResponse>, ServiceError> {
    let filter = SneakerFilter::parse(&params);
    let results = state.catalog.search(&filter).await?;
    Ok(Json(SearchResponse {
        results,
        active_filters: filter.active_filters().to_vec(),
    }))
}

/// `GET /sneaker/:id` — detail; not-found if absent or soft-deleted.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SneakerDetail>, ServiceError> {
    let detail = state.catalog.get_detail(id).await?;
    Ok(Json(detail))
}
