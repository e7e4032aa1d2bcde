//! OpenAPI document and Swagger UI for the read-only v1 API.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::api;
use crate::services::catalog::{BrandListing, SearchItem, SneakerCard, SneakerDetail};
use crate::services::filters::ActiveFilter;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::list_brands,
        api::get_brand,
        api::get_brand_sneakers,
        api::list_sneakers,
        api::get_sneaker,
    ),
    components(schemas(
        api::BrandApi,
        api::SneakerApi,
        BrandListing,
        SneakerCard,
        SneakerDetail,
        SearchItem,
        ActiveFilter,
    )),
    tags(
        (name = "brands", description = "Brand catalog"),
        (name = "sneakers", description = "Sneaker catalog")
    ),
    info(title = "Kickdex API", description = "Sneaker catalog service")
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
