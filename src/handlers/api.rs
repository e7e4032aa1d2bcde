//! Read-only JSON mirror of the entity store (`/api/v1`).
//!
//! A thin projection for API consumers: list/detail for brands and
//! sneakers plus the brand→sneakers sub-resource, all ordered by name.
//! Like the store itself, the mirror carries soft-deleted rows; only the
//! public catalog surface filters them out.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{brand, sneaker};
use crate::errors::ServiceError;
use crate::AppState;

/// Brand as exposed by the read-only API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrandApi {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub country: Option<String>,
    pub year_founded: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<brand::Model> for BrandApi {
    fn from(model: brand::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            country: model.country,
            year_founded: model.year_founded,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Sneaker as exposed by the read-only API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SneakerApi {
    pub id: Uuid,
    pub name: String,
    pub summary: String,
    pub designer: Option<String>,
    pub year_released: i32,
    pub brand_id: Option<Uuid>,
    pub primary_image: Option<String>,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<sneaker::Model> for SneakerApi {
    fn from(model: sneaker::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            summary: model.summary,
            designer: model.designer,
            year_released: model.year_released,
            brand_id: model.brand_id,
            primary_image: model.primary_image,
            deleted: model.deleted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/brands",
    responses((status = 200, description = "All brands ordered by name", body = [BrandApi])),
    tag = "brands"
)]
pub async fn list_brands(State(state): State<AppState>) -> Result<Json<Vec<BrandApi>>, ServiceError> {
    let brands = brand::Entity::find()
        .order_by_asc(brand::Column::Name)
        .all(&*state.db)
        .await?;
    Ok(Json(brands.into_iter().map(BrandApi::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/{id}",
    responses(
        (status = 200, description = "Brand detail", body = BrandApi),
        (status = 404, description = "Brand not found")
    ),
    params(("id" = Uuid, Path, description = "Brand id")),
    tag = "brands"
)]
pub async fn get_brand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BrandApi>, ServiceError> {
    let brand = brand::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Brand {} not found", id)))?;
    Ok(Json(brand.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/brands/{id}/sneakers",
    responses(
        (status = 200, description = "Sneakers of the brand", body = [SneakerApi]),
        (status = 404, description = "Brand not found")
    ),
    params(("id" = Uuid, Path, description = "Brand id")),
    tag = "brands"
)]
pub async fn get_brand_sneakers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SneakerApi>>, ServiceError> {
    brand::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Brand {} not found", id)))?;

    let sneakers = sneaker::Entity::find()
        .filter(sneaker::Column::BrandId.eq(id))
        .order_by_asc(sneaker::Column::Name)
        .all(&*state.db)
        .await?;
    Ok(Json(sneakers.into_iter().map(SneakerApi::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/sneakers",
    responses((status = 200, description = "All sneakers ordered by name", body = [SneakerApi])),
    tag = "sneakers"
)]
pub async fn list_sneakers(
    State(state): State<AppState>,
) -> Result<Json<Vec<SneakerApi>>, ServiceError> {
    let sneakers = sneaker::Entity::find()
        .order_by_asc(sneaker::Column::Name)
        .all(&*state.db)
        .await?;
    Ok(Json(sneakers.into_iter().map(SneakerApi::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/sneakers/{id}",
    responses(
        (status = 200, description = "Sneaker detail", body = SneakerApi),
        (status = 404, description = "Sneaker not found")
    ),
    params(("id" = Uuid, Path, description = "Sneaker id")),
    tag = "sneakers"
)]
pub async fn get_sneaker(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SneakerApi>, ServiceError> {
    let sneaker = sneaker::Entity::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Sneaker {} not found", id)))?;
    Ok(Json(sneaker.into()))
}

pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/brands", get(list_brands))
        .route("/brands/:id", get(get_brand))
        .route("/brands/:id/sneakers", get(get_brand_sneakers))
        .route("/sneakers", get(list_sneakers))
        .route("/sneakers/:id", get(get_sneaker))
}
