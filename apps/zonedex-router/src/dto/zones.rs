//! DTOs for zone endpoints

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use zonedex_domain::{zones::CategoryZones, Zone, ZoneIndex};

/// A canonical zone
#[derive(Debug, Serialize, ToSchema)]
pub struct ZoneResponse {
    /// External identifiers that resolve to this zone
    #[schema(example = json!(["CAZ006", "CAZ506"]))]
    pub ids: Vec<String>,
    /// Display name
    #[schema(example = "San Francisco")]
    pub name: String,
    /// Jurisdiction, if any
    #[schema(example = "CA")]
    pub state: Option<String>,
    /// Path slug within the category
    #[schema(example = "san-francisco")]
    pub path: String,
    /// Category the zone is listed under
    #[schema(example = "ca")]
    pub category: String,
}

impl From<&Zone> for ZoneResponse {
    fn from(zone: &Zone) -> Self {
        Self {
            ids: zone.ids().to_vec(),
            name: zone.name().to_string(),
            state: zone.state().map(str::to_string),
            path: zone.path().to_string(),
            category: zone.category().to_string(),
        }
    }
}

/// Short entry in a category listing
#[derive(Debug, Serialize, ToSchema)]
pub struct ZoneSummary {
    #[schema(example = "San Francisco")]
    pub name: String,
    #[schema(example = "san-francisco")]
    pub path: String,
}

/// Zones listed under one category
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(example = "ca")]
    pub category: String,
    pub zones: Vec<ZoneSummary>,
}

impl CategoryResponse {
    pub fn new(category: &str, zones: &CategoryZones) -> Self {
        Self {
            category: category.to_string(),
            zones: zones
                .iter()
                .map(|(path, zone)| ZoneSummary {
                    name: zone.name().to_string(),
                    path: path.clone(),
                })
                .collect(),
        }
    }
}

/// Entry point listing: known categories and the routes they constrain
#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    /// Categories in discovery order
    #[schema(example = json!(["ca", "or", "uncategorized"]))]
    pub categories: Vec<String>,
    /// Route patterns restricted to the known categories
    #[schema(example = json!(["/:category(ca|or|uncategorized)/:path", "/:category(ca|or|uncategorized)"]))]
    pub routes: Vec<String>,
    /// Number of distinct zones
    pub zones: usize,
    /// Number of indexed identifiers
    pub identifiers: usize,
}

impl From<&ZoneIndex> for HomeResponse {
    fn from(index: &ZoneIndex) -> Self {
        let stats = index.stats();
        Self {
            categories: index.categories().to_vec(),
            routes: zonedex_domain::zones::route_patterns(index).to_vec(),
            zones: stats.zones,
            identifiers: stats.identifiers,
        }
    }
}

/// Query for a name lookup
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupQuery {
    /// Display name, any casing
    pub name: String,
    /// Jurisdiction, omitted for uncategorized zones
    pub state: Option<String>,
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error description
    #[schema(example = "No zone at ca/nowhere")]
    pub error: String,
}
