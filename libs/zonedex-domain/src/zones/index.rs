//! Zone index construction
//!
//! `ZoneIndex::from_records` is the normalizer half of the pipeline: a single
//! left-to-right pass groups raw records by canonical key, then the distinct
//! zones are fanned out into the name and category/path lookups.
//!
//! Every lookup holds an `Arc` to the same `Zone`, so an identifier, a name key
//! and a category/path slot that refer to one zone all point at one value.

use std::sync::Arc;

use indexmap::{map::Entry, IndexMap};
use serde::Serialize;
use tracing::debug;

use super::{RawZoneRecord, Zone};

/// Zones of one category, keyed by path slug
pub type CategoryZones = IndexMap<String, Arc<Zone>>;

/// The cached artifact: every lookup the routing layer needs
///
/// Immutable once built. Map iteration order is insertion order, which makes
/// serialized output and the `categories` list deterministic for a given feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneIndex {
    categories: Vec<String>,
    by_id: IndexMap<String, Arc<Zone>>,
    by_name: IndexMap<String, Arc<Zone>>,
    by_category: IndexMap<String, CategoryZones>,
}

/// Summary counts for a built index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub zones: usize,
    pub identifiers: usize,
    pub categories: usize,
}

/// One independently exportable part of the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSection {
    Categories,
    ById,
    ByName,
    ByCategory,
}

impl IndexSection {
    pub const ALL: [IndexSection; 4] = [
        IndexSection::Categories,
        IndexSection::ById,
        IndexSection::ByName,
        IndexSection::ByCategory,
    ];

    /// Serialized field name of this section
    pub fn name(self) -> &'static str {
        match self {
            IndexSection::Categories => "categories",
            IndexSection::ById => "byId",
            IndexSection::ByName => "byName",
            IndexSection::ByCategory => "byCategory",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.name() == name)
    }
}

impl ZoneIndex {
    /// Build the index from records in source order
    ///
    /// Earlier records win the display name, casing, and path of a canonical
    /// key. A repeated identifier is ignored after its first occurrence, so it
    /// stays attached to the zone it first resolved to. Within a category, a
    /// later zone whose slug matches an earlier one replaces it in the
    /// category/path lookup; the earlier zone remains reachable by id and name.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawZoneRecord>,
    {
        let mut grouped: IndexMap<String, Zone> = IndexMap::new();
        let mut owners: IndexMap<String, usize> = IndexMap::new();

        for record in records {
            if owners.contains_key(&record.id) {
                debug!(id = %record.id, "Skipping repeated zone identifier");
                continue;
            }

            let position = match grouped.entry(record.canonical_key()) {
                Entry::Occupied(mut entry) => {
                    entry.get_mut().push_id(&record.id);
                    entry.index()
                }
                Entry::Vacant(entry) => {
                    let position = entry.index();
                    entry.insert(Zone::from_record(&record));
                    position
                }
            };

            owners.insert(record.id, position);
        }

        let zones: Vec<(String, Arc<Zone>)> = grouped
            .into_iter()
            .map(|(key, zone)| (key, Arc::new(zone)))
            .collect();

        let by_id = owners
            .into_iter()
            .map(|(id, position)| (id, Arc::clone(&zones[position].1)))
            .collect();

        let mut index = Self {
            by_id,
            ..Self::default()
        };

        for (key, zone) in zones {
            let bucket = match index.by_category.entry(zone.category().to_string()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    index.categories.push(entry.key().clone());
                    entry.insert(CategoryZones::new())
                }
            };

            if let Some(replaced) = bucket.insert(zone.path().to_string(), Arc::clone(&zone)) {
                debug!(
                    category = zone.category(),
                    path = zone.path(),
                    replaced = replaced.name(),
                    "Zone path collision within category, later zone wins"
                );
            }

            index.by_name.insert(key, zone);
        }

        index
    }

    /// Distinct categories in first-discovery order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn by_id(&self) -> &IndexMap<String, Arc<Zone>> {
        &self.by_id
    }

    pub fn by_name(&self) -> &IndexMap<String, Arc<Zone>> {
        &self.by_name
    }

    pub fn by_category(&self) -> &IndexMap<String, CategoryZones> {
        &self.by_category
    }

    /// Distinct zones in creation order
    pub fn zones(&self) -> impl Iterator<Item = &Arc<Zone>> {
        self.by_name.values()
    }

    pub fn zone_by_id(&self, id: &str) -> Option<&Arc<Zone>> {
        self.by_id.get(id)
    }

    /// Look up a zone by display name and state, ignoring case
    pub fn zone_by_name(&self, name: &str, state: Option<&str>) -> Option<&Arc<Zone>> {
        self.by_name.get(&super::canonical_key(name, state))
    }

    pub fn category(&self, category: &str) -> Option<&CategoryZones> {
        self.by_category.get(category)
    }

    /// Resolve a category and path slug to a zone
    pub fn resolve(&self, category: &str, path: &str) -> Option<&Arc<Zone>> {
        self.category(category)?.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            zones: self.by_name.len(),
            identifiers: self.by_id.len(),
            categories: self.categories.len(),
        }
    }

    /// Serialize a single section of the index
    pub fn section(&self, section: IndexSection) -> serde_json::Result<serde_json::Value> {
        match section {
            IndexSection::Categories => serde_json::to_value(&self.categories),
            IndexSection::ById => serde_json::to_value(&self.by_id),
            IndexSection::ByName => serde_json::to_value(&self.by_name),
            IndexSection::ByCategory => serde_json::to_value(&self.by_category),
        }
    }

    /// Serialize the whole index as a static JSON asset
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
