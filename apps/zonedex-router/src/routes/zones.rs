//! Zone routes

use axum::{routing::get, Router};

use crate::{
    handlers::zones::{
        category_handler, home_handler, lookup_handler, section_handler, zone_by_id_handler,
        zone_handler,
    },
    AppState,
};

/// Create zone routes
///
/// Static segments take priority over the `:category` parameter, so
/// `/lookup`, `/index/:section` and `/zones/:id` are never read as category
/// routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route("/lookup", get(lookup_handler))
        .route("/index/:section", get(section_handler))
        .route("/zones/:id", get(zone_by_id_handler))
        .route("/:category", get(category_handler))
        .route("/:category/:path", get(zone_handler))
}
