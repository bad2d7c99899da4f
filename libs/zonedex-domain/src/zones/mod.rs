//! Zones domain module
//!
//! This module contains the fetch-normalize-index pipeline: raw feed records
//! are deduplicated into canonical zones, indexed by identifier, name and
//! category/path, and cached once per service.

mod entity;
mod error;
mod gate;
mod index;
mod payload;
pub mod routing;
mod service;

pub use entity::{canonical_key, category_for, slugify, RawZoneRecord, Zone, UNCATEGORIZED};
pub use error::{Result, ZoneIndexError};
pub use gate::{CacheGate, GateStatus};
pub use index::{CategoryZones, IndexSection, IndexStats, ZoneIndex};
pub use payload::parse_features;
pub use routing::{resolve_segments, route_patterns, RouteTarget};
pub use service::ZoneIndexService;
