//! API routes

pub mod zones;

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    dto::zones::{
        CategoryResponse, ErrorResponse, HomeResponse, ZoneResponse, ZoneSummary,
    },
    handlers::{self, health::HealthResponse},
    AppState,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::zones::home_handler,
        handlers::zones::category_handler,
        handlers::zones::zone_handler,
        handlers::zones::zone_by_id_handler,
        handlers::zones::lookup_handler,
        handlers::zones::section_handler,
        handlers::health::health_handler
    ),
    components(
        schemas(
            ZoneResponse,
            ZoneSummary,
            CategoryResponse,
            HomeResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "zones", description = "Zone resolution endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "zonedex router API",
        version = "0.1.0",
        description = "Resolves category/path segments to canonical zones"
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(zones::routes())
        .route("/health", axum::routing::get(handlers::health::health_handler))
        .with_state(state)
}
