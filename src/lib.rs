/*!
 * # Kickdex API
 *
 * Sneaker catalog service: public browse/search/detail, a capability-gated
 * management surface for create/update/soft-delete, and a read-only JSON
 * mirror of the entity store under `/api/v1`.
 */

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod media;
pub mod migrator;
pub mod openapi;
pub mod services;
pub mod utils;
pub mod validators;

use auth::{consts, AuthRouterExt, AuthService};
use cache::CacheBackend;
use services::CatalogService;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub cache: Arc<dyn CacheBackend>,
    pub catalog: Arc<CatalogService>,
}

/// Assembles the full application router.
///
/// The three management route groups are gated independently, one
/// capability per operation. The `AuthService` is injected into request
/// extensions so the auth middleware can validate tokens without
/// threading it through every handler.
pub fn app_router(state: AppState, auth_service: Arc<AuthService>) -> Router {
    let create_routes = Router::new()
        .route(
            "/manage/create-sneaker",
            get(handlers::manage::create_form).post(handlers::manage::create_sneaker),
        )
        .with_capability(consts::SNEAKERS_CREATE);

    let update_routes = Router::new()
        .route(
            "/manage/update-sneaker/:id",
            get(handlers::manage::update_form).post(handlers::manage::update_sneaker),
        )
        .with_capability(consts::SNEAKERS_UPDATE);

    let delete_routes = Router::new()
        .route(
            "/manage/delete-sneaker/:id",
            get(handlers::manage::delete_form).post(handlers::manage::delete_sneaker),
        )
        .with_capability(consts::SNEAKERS_DELETE);

    let media_root = state.config.media_root.clone();

    Router::new()
        .route("/", get(handlers::catalog::browse))
        .route("/query", get(handlers::catalog::query))
        .route("/sneaker/:id", get(handlers::catalog::detail))
        .route("/health", get(handlers::health::health))
        .merge(create_routes)
        .merge(update_routes)
        .merge(delete_routes)
        .nest("/api/v1", handlers::api::api_v1_routes())
        .merge(openapi::swagger_ui())
        .nest_service("/media", ServeDir::new(media_root))
        .layer(axum::middleware::from_fn_with_state(
            auth_service,
            |axum::extract::State(auth): axum::extract::State<Arc<AuthService>>,
             mut req: axum::extract::Request,
             next: axum::middleware::Next| async move {
                req.extensions_mut().insert(auth);
                next.run(req).await
            },
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
