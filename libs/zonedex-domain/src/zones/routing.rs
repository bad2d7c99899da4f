//! Route resolution against a built index
//!
//! The routing layer accepts `/{category}` and `/{category}/{path}` only for
//! categories the index knows about. These helpers produce the constrained
//! route patterns and resolve decoded path segments.

use std::sync::Arc;

use super::{CategoryZones, Zone, ZoneIndex};

/// Alternation of every known category, e.g. `ca|or|uncategorized`
pub fn category_pattern(categories: &[String]) -> String {
    categories.join("|")
}

/// Route patterns with the category segment restricted to known categories
///
/// Returns the zone route first, then the category listing route.
pub fn route_patterns(index: &ZoneIndex) -> [String; 2] {
    let pattern = category_pattern(index.categories());
    [
        format!("/:category({})/:path", pattern),
        format!("/:category({})", pattern),
    ]
}

/// What a request path points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget<'a> {
    Home,
    Category {
        category: &'a str,
        zones: &'a CategoryZones,
    },
    Zone(&'a Arc<Zone>),
    NotFound,
}

/// Resolve already-split, already-decoded path segments such as `["ca", "coastal"]`
pub fn resolve_segments<'a>(index: &'a ZoneIndex, segments: &[&str]) -> RouteTarget<'a> {
    match segments {
        [] => RouteTarget::Home,
        [category] => match index.by_category().get_key_value(*category) {
            Some((category, zones)) => RouteTarget::Category { category, zones },
            None => RouteTarget::NotFound,
        },
        [category, path] => index
            .resolve(category, path)
            .map_or(RouteTarget::NotFound, RouteTarget::Zone),
        _ => RouteTarget::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zones::RawZoneRecord;

    fn index() -> ZoneIndex {
        ZoneIndex::from_records(vec![
            RawZoneRecord::new("CAZ006", "San Francisco", Some("CA")),
            RawZoneRecord::new("ORZ001", "Coast Range", Some("OR")),
            RawZoneRecord::new("MZ001", "Open Waters", None),
        ])
    }

    #[test]
    fn test_route_patterns() {
        let [zone_route, category_route] = route_patterns(&index());

        assert_eq!(zone_route, "/:category(ca|or|uncategorized)/:path");
        assert_eq!(category_route, "/:category(ca|or|uncategorized)");
    }

    #[test]
    fn test_resolve_home() {
        let index = index();
        assert_eq!(resolve_segments(&index, &[]), RouteTarget::Home);
    }

    #[test]
    fn test_resolve_category() {
        let index = index();

        match resolve_segments(&index, &["or"]) {
            RouteTarget::Category { category, zones } => {
                assert_eq!(category, "or");
                assert!(zones.contains_key("coast-range"));
            }
            other => panic!("expected category, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_zone() {
        let index = index();

        match resolve_segments(&index, &["ca", "san-francisco"]) {
            RouteTarget::Zone(zone) => assert_eq!(zone.ids(), ["CAZ006"]),
            other => panic!("expected zone, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_segments() {
        let index = index();

        assert!(matches!(
            resolve_segments(&index, &["uncategorized", "open-waters"]),
            RouteTarget::Zone(_)
        ));
        assert_eq!(resolve_segments(&index, &["", ""]), RouteTarget::NotFound);
    }

    #[test]
    fn test_unknown_category_or_path_is_not_found() {
        let index = index();

        assert_eq!(resolve_segments(&index, &["tx"]), RouteTarget::NotFound);
        assert_eq!(resolve_segments(&index, &["tx", "san-francisco"]), RouteTarget::NotFound);
        assert_eq!(resolve_segments(&index, &["ca", "nowhere"]), RouteTarget::NotFound);
        assert_eq!(resolve_segments(&index, &["ca", "san-francisco", "extra"]), RouteTarget::NotFound);
    }
}
