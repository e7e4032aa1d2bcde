//! Management surface: capability-gated create, update, and soft-delete.
//!
//! Routes are gated by `AuthRouterExt::with_capability`, so handlers can
//! assume an authenticated actor holding the right capability. GET
//! endpoints return the form context a client needs to render the page;
//! successful POSTs answer a redirect to the validated `next` target,
//! falling back to the browse listing.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::ServiceError;
use crate::services::catalog::SneakerInput;
use crate::utils::resolve_next_url;
use crate::AppState;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct NextParam {
    /// Post-mutation redirect target; only same-host paths are honored
    pub next: Option<String>,
}

/// Option shown in a brand select.
#[derive(Debug, Serialize, ToSchema)]
pub struct BrandChoice {
    pub id: Uuid,
    pub name: String,
}

/// Option shown in a related-sneakers select.
#[derive(Debug, Serialize, ToSchema)]
pub struct SneakerChoice {
    pub id: Uuid,
    pub name: String,
}

/// Context for rendering a create/update form.
#[derive(Debug, Serialize, ToSchema)]
pub struct SneakerFormContext {
    pub brands: Vec<BrandChoice>,
    pub sneakers: Vec<SneakerChoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<SneakerFormValues>,
}

/// Current field values when editing an existing sneaker.
#[derive(Debug, Serialize, ToSchema)]
pub struct SneakerFormValues {
    pub id: Uuid,
    pub name: String,
    pub summary: String,
    pub designer: Option<String>,
    pub year_released: i32,
    pub brand_id: Option<Uuid>,
    pub primary_image: Option<String>,
    pub deleted: bool,
}

/// Context for the delete confirmation page.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteSneakerContext {
    pub id: Uuid,
    pub name: String,
    pub deleted: bool,
}

async fn form_context(
    state: &AppState,
    current: Option<SneakerFormValues>,
) -> Result<SneakerFormContext, ServiceError> {
    let brands = state
        .catalog
        .list_brands()
        .await?
        .into_iter()
        .map(|b| BrandChoice { id: b.id, name: b.name })
        .collect();

    let exclude = current.as_ref().map(|c| c.id);
    let sneakers = state
        .catalog
        .search(&Default::default())
        .await?
        .into_iter()
        .filter(|item| Some(item.sneaker.id) != exclude)
        .map(|item| SneakerChoice {
            id: item.sneaker.id,
            name: item.sneaker.name,
        })
        .collect();

    Ok(SneakerFormContext {
        brands,
        sneakers,
        current,
    })
}

/// `GET /manage/create-sneaker`
pub async fn create_form(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<SneakerFormContext>, ServiceError> {
    Ok(Json(form_context(&state, None).await?))
}

/// `POST /manage/create-sneaker`
pub async fn create_sneaker(
    State(state): State<AppState>,
    Query(params): Query<NextParam>,
    user: AuthUser,
    Json(input): Json<SneakerInput>,
) -> Result<Response, ServiceError> {
    state.catalog.create(input, &user).await?;
    Ok(Redirect::to(&resolve_next_url(params.next.as_deref(), "/")).into_response())
}

/// `GET /manage/update-sneaker/:id` — loads the target for editing,
/// including soft-deleted sneakers.
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: AuthUser,
) -> Result<Json<SneakerFormContext>, ServiceError> {
    let sneaker = state.catalog.get_editable(id).await?;
    let current = SneakerFormValues {
        id: sneaker.id,
        name: sneaker.name,
        summary: sneaker.summary,
        designer: sneaker.designer,
        year_released: sneaker.year_released,
        brand_id: sneaker.brand_id,
        primary_image: sneaker.primary_image,
        deleted: sneaker.deleted,
    };
    Ok(Json(form_context(&state, Some(current)).await?))
}

/// `POST /manage/update-sneaker/:id`
pub async fn update_sneaker(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<NextParam>,
    user: AuthUser,
    Json(input): Json<SneakerInput>,
) -> Result<Response, ServiceError> {
    state.catalog.update(id, input, &user).await?;
    Ok(Redirect::to(&resolve_next_url(params.next.as_deref(), "/")).into_response())
}

/// `GET /manage/delete-sneaker/:id` — confirmation context.
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _user: AuthUser,
) -> Result<Json<DeleteSneakerContext>, ServiceError> {
    let sneaker = state.catalog.get_editable(id).await?;
    Ok(Json(DeleteSneakerContext {
        id: sneaker.id,
        name: sneaker.name,
        deleted: sneaker.deleted,
    }))
}

/// `POST /manage/delete-sneaker/:id` — soft-deletes the target.
pub async fn delete_sneaker(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<NextParam>,
    user: AuthUser,
) -> Result<Response, ServiceError> {
    state.catalog.soft_delete(id, &user).await?;
    Ok(Redirect::to(&resolve_next_url(params.next.as_deref(), "/")).into_response())
}
