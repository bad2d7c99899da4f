//! Upstream payload parsing
//!
//! The feed returns a GeoJSON-like feature collection:
//! `{ "features": [ { "properties": { "id", "name", "state" } }, ... ] }`.
//! Only the three properties above are read; everything else is ignored.

use serde::Deserialize;
use serde_json::error::Category;
use tracing::debug;

use super::{RawZoneRecord, Result, ZoneIndexError};

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: FeatureProperties,
}

#[derive(Debug, Deserialize)]
struct FeatureProperties {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Parse a raw response body into usable zone records, in source order
///
/// # Errors
///
/// - `ZoneIndexError::Fetch` if the body is not JSON at all
/// - `ZoneIndexError::SourceData` if the JSON does not have the expected shape,
///   or a record with an identifier has no name
pub fn parse_features(body: &[u8]) -> Result<Vec<RawZoneRecord>> {
    let collection: FeatureCollection =
        serde_json::from_slice(body).map_err(|e| match e.classify() {
            Category::Data => {
                ZoneIndexError::source_data(format!("unexpected payload shape: {}", e))
            }
            Category::Syntax | Category::Eof | Category::Io => {
                ZoneIndexError::fetch_failure(format!("malformed payload: {}", e))
            }
        })?;

    let mut records = Vec::with_capacity(collection.features.len());

    for (position, feature) in collection.features.into_iter().enumerate() {
        let FeatureProperties { id, name, state } = feature.properties;

        let id = match id {
            Some(id) if !id.is_empty() => id,
            _ => {
                debug!(position, "Discarding zone record without identifier");
                continue;
            }
        };

        let name = name.ok_or_else(|| {
            ZoneIndexError::source_data(format!(
                "zone record {} at position {} has no name",
                id, position
            ))
        })?;

        records.push(RawZoneRecord { id, name, state });
    }

    Ok(records)
}
