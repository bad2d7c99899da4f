//! Zone handlers
//!
//! Every handler reads the shared index through the service. After startup
//! this is a cached lookup; if the startup build failed, the first request
//! retries it.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error};
use zonedex_domain::zones::{resolve_segments, IndexSection, RouteTarget};
use zonedex_domain::{ZoneIndex, ZoneIndexError};

use crate::{
    dto::zones::{CategoryResponse, ErrorResponse, HomeResponse, LookupQuery, ZoneResponse},
    AppState,
};

async fn load_index(state: &AppState) -> Result<Arc<ZoneIndex>, Response> {
    state.zones.get_zone_index().await.map_err(|err| {
        error!(error = ?err, "Zone index unavailable");
        index_error(err)
    })
}

fn index_error(err: ZoneIndexError) -> Response {
    let status = match err {
        ZoneIndexError::Fetch(_) | ZoneIndexError::SourceData(_) => StatusCode::BAD_GATEWAY,
        ZoneIndexError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

fn not_found(message: String) -> Response {
    debug!(message = %message, "Route not found");
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: message })).into_response()
}

/// List known categories and the route patterns built from them
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Known categories", body = HomeResponse),
        (status = 502, description = "Zone feed unavailable", body = ErrorResponse)
    ),
    tag = "zones"
)]
pub async fn home_handler(State(state): State<AppState>) -> Response {
    match load_index(&state).await {
        Ok(index) => Json(HomeResponse::from(index.as_ref())).into_response(),
        Err(response) => response,
    }
}

/// List the zones of one category
#[utoipa::path(
    get,
    path = "/{category}",
    params(("category" = String, Path, description = "Category, e.g. `ca` or `uncategorized`")),
    responses(
        (status = 200, description = "Zones in the category", body = CategoryResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse),
        (status = 502, description = "Zone feed unavailable", body = ErrorResponse)
    ),
    tag = "zones"
)]
pub async fn category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Response {
    let index = match load_index(&state).await {
        Ok(index) => index,
        Err(response) => return response,
    };

    match resolve_segments(&index, &[category.as_str()]) {
        RouteTarget::Category { category, zones } => {
            Json(CategoryResponse::new(category, zones)).into_response()
        }
        _ => not_found(format!("Unknown category '{}'", category)),
    }
}

/// Resolve a category and path slug to a zone
#[utoipa::path(
    get,
    path = "/{category}/{path}",
    params(
        ("category" = String, Path, description = "Category, e.g. `ca`"),
        ("path" = String, Path, description = "Zone path slug, e.g. `san-francisco`")
    ),
    responses(
        (status = 200, description = "The zone", body = ZoneResponse),
        (status = 404, description = "Unknown category or path", body = ErrorResponse),
        (status = 502, description = "Zone feed unavailable", body = ErrorResponse)
    ),
    tag = "zones"
)]
pub async fn zone_handler(
    State(state): State<AppState>,
    Path((category, path)): Path<(String, String)>,
) -> Response {
    let index = match load_index(&state).await {
        Ok(index) => index,
        Err(response) => return response,
    };

    match resolve_segments(&index, &[category.as_str(), path.as_str()]) {
        RouteTarget::Zone(zone) => Json(ZoneResponse::from(zone.as_ref())).into_response(),
        _ => not_found(format!("No zone at {}/{}", category, path)),
    }
}

/// Look up a zone by external identifier
#[utoipa::path(
    get,
    path = "/zones/{id}",
    params(("id" = String, Path, description = "External zone identifier, e.g. `CAZ006`")),
    responses(
        (status = 200, description = "The zone owning the identifier", body = ZoneResponse),
        (status = 404, description = "Unknown identifier", body = ErrorResponse),
        (status = 502, description = "Zone feed unavailable", body = ErrorResponse)
    ),
    tag = "zones"
)]
pub async fn zone_by_id_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let index = match load_index(&state).await {
        Ok(index) => index,
        Err(response) => return response,
    };

    match index.zone_by_id(&id) {
        Some(zone) => Json(ZoneResponse::from(zone.as_ref())).into_response(),
        None => not_found(format!("Unknown zone identifier '{}'", id)),
    }
}

/// Look up a zone by display name and state, ignoring case
#[utoipa::path(
    get,
    path = "/lookup",
    params(LookupQuery),
    responses(
        (status = 200, description = "The zone with this name", body = ZoneResponse),
        (status = 404, description = "No zone with this name", body = ErrorResponse),
        (status = 502, description = "Zone feed unavailable", body = ErrorResponse)
    ),
    tag = "zones"
)]
pub async fn lookup_handler(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Response {
    let index = match load_index(&state).await {
        Ok(index) => index,
        Err(response) => return response,
    };

    match index.zone_by_name(&query.name, query.state.as_deref()) {
        Some(zone) => Json(ZoneResponse::from(zone.as_ref())).into_response(),
        None => not_found(format!("No zone named '{}'", query.name)),
    }
}

/// Serialize one section of the index: `categories`, `byId`, `byName` or `byCategory`
#[utoipa::path(
    get,
    path = "/index/{section}",
    params(("section" = String, Path, description = "Section name, e.g. `byId`")),
    responses(
        (status = 200, description = "The section as JSON", content_type = "application/json"),
        (status = 404, description = "Unknown section", body = ErrorResponse),
        (status = 502, description = "Zone feed unavailable", body = ErrorResponse)
    ),
    tag = "zones"
)]
pub async fn section_handler(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Response {
    let Some(section) = IndexSection::from_name(&section) else {
        return not_found(format!("Unknown index section '{}'", section));
    };

    let index = match load_index(&state).await {
        Ok(index) => index,
        Err(response) => return response,
    };

    match index.section(section) {
        Ok(value) => Json(value).into_response(),
        Err(err) => {
            error!(section = section.name(), error = ?err, "Failed to serialize index section");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to serialize section {}", section.name()),
                }),
            )
                .into_response()
        }
    }
}
