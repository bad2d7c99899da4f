//! Domain entities for zone normalization
//!
//! A `RawZoneRecord` is one untrusted feature from the upstream authority.
//! A `Zone` is the canonical record several raw records collapse into when
//! they share the same canonical key.

use serde::Serialize;

/// Category assigned to zones that carry no jurisdiction
pub const UNCATEGORIZED: &str = "uncategorized";

/// One usable record from the upstream feed
///
/// Records without an identifier are dropped during payload parsing, so every
/// `RawZoneRecord` has a non-empty `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawZoneRecord {
    pub id: String,
    pub name: String,
    pub state: Option<String>,
}

impl RawZoneRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, state: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: state.map(str::to_string),
        }
    }

    /// Canonical grouping key for this record
    pub fn canonical_key(&self) -> String {
        canonical_key(&self.name, self.state.as_deref())
    }
}

/// Canonical zone after deduplication and normalization
///
/// Zones are immutable once the index that owns them is published. The
/// builder is the only place that appends identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    /// External identifiers that resolved to this zone, in first-seen order
    ids: Vec<String>,

    /// Display name, casing taken from the first record seen for the key
    name: String,

    /// Jurisdiction, if the source provided one
    state: Option<String>,

    /// URL-safe slug derived from `name`
    path: String,

    /// Lowercased `state`, or `uncategorized`
    category: String,
}

impl Zone {
    /// Create a zone from the first record seen for its canonical key
    pub fn from_record(record: &RawZoneRecord) -> Self {
        Self {
            ids: vec![record.id.clone()],
            name: record.name.clone(),
            state: record.state.clone(),
            path: slugify(&record.name),
            category: category_for(record.state.as_deref()),
        }
    }

    /// Record another identifier for this zone
    ///
    /// Returns `false` if the identifier was already present.
    pub(crate) fn push_id(&mut self, id: &str) -> bool {
        if self.ids.iter().any(|existing| existing == id) {
            return false;
        }
        self.ids.push(id.to_string());
        true
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Lookup key under which this zone is stored in `byName`
    pub fn canonical_key(&self) -> String {
        canonical_key(&self.name, self.state.as_deref())
    }
}

/// Lowercased `"name, state"`, or lowercased `name` when there is no state
pub fn canonical_key(name: &str, state: Option<&str>) -> String {
    match state {
        Some(state) => format!("{}, {}", name, state).to_lowercase(),
        None => name.to_lowercase(),
    }
}

/// Category bucket for a jurisdiction
pub fn category_for(state: Option<&str>) -> String {
    match state {
        Some(state) => state.to_lowercase(),
        None => UNCATEGORIZED.to_string(),
    }
}

/// Derive a path slug from a display name
///
/// Lowercases the name and turns every run of whitespace, `/` or `\` into a
/// single `-`. Runs collapse, so `Lake / Shore` becomes `lake-shore` rather
/// than the `lake---shore` a per-character replacement gives; paths for such
/// names differ from sites that slug one separator at a time.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_separator = false;

    for c in name.chars() {
        if c.is_whitespace() || c == '/' || c == '\\' {
            if !in_separator {
                slug.push('-');
                in_separator = true;
            }
        } else {
            slug.extend(c.to_lowercase());
            in_separator = false;
        }
    }

    slug
}
