#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Placemark, geometry and style types for KML placemark extraction.
//!
//! These are the records emitted by the extractor and serialized to the
//! JSON output. Field names and the `type` key are part of the output
//! contract consumed by downstream map applications.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Name used for placemarks without a (non-empty) `<name>` child.
pub const DEFAULT_NAME: &str = "No Name";

/// Description used for placemarks without a (non-empty) `<description>` child.
pub const DEFAULT_DESCRIPTION: &str = "No Description";

/// A `[longitude, latitude]` pair in decimal degrees.
pub type LonLat = [f64; 2];

/// Visual attributes resolved from a `<Style>` or `<StyleMap>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleEntry {
    /// Icon URL from `IconStyle/Icon/href`.
    pub icon: Option<String>,
    /// Web color in `#RRGGBB` form.
    pub color: Option<String>,
}

impl StyleEntry {
    /// The entry used when a style reference is absent or unresolvable.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            icon: None,
            color: None,
        }
    }
}

/// Geometry kind of a placemark.
///
/// Detection order is Point, then `LineString`, then Polygon; the first
/// kind present under the placemark wins.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum GeometryKind {
    /// A single position.
    Point,
    /// An open path.
    LineString,
    /// An area bounded by its outer ring.
    Polygon,
    /// No supported geometry was found.
    Unknown,
}

impl GeometryKind {
    /// Element names probed for, in detection order.
    pub const DETECTION_ORDER: [Self; 3] = [Self::Point, Self::LineString, Self::Polygon];
}

/// One extracted placemark, as written to the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacemarkRecord {
    /// Trimmed `<name>` text, or [`DEFAULT_NAME`].
    pub name: String,
    /// Trimmed `<description>` text, or [`DEFAULT_DESCRIPTION`].
    pub description: String,
    /// Geometry kind.
    #[serde(rename = "type")]
    pub kind: GeometryKind,
    /// Never empty for an emitted record.
    pub coordinates: Vec<LonLat>,
    /// Resolved `#RRGGBB` color.
    pub color: Option<String>,
    /// Resolved icon URL.
    pub icon: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn geometry_kind_round_trips_through_strum() {
        for kind in [
            GeometryKind::Point,
            GeometryKind::LineString,
            GeometryKind::Polygon,
            GeometryKind::Unknown,
        ] {
            assert_eq!(GeometryKind::from_str(kind.as_ref()).unwrap(), kind);
        }
        assert_eq!(GeometryKind::LineString.to_string(), "LineString");
    }

    #[test]
    fn record_serializes_with_type_key_and_nulls() {
        let record = PlacemarkRecord {
            name: "光復鄉".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            kind: GeometryKind::Point,
            coordinates: vec![[121.5, 24.1]],
            color: None,
            icon: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "Point");
        assert_eq!(value["name"], "光復鄉");
        assert!(value["color"].is_null());
        assert!(value["icon"].is_null());
        assert_eq!(value["coordinates"], serde_json::json!([[121.5, 24.1]]));
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn empty_style_entry_has_no_attributes() {
        assert_eq!(StyleEntry::empty(), StyleEntry::default());
    }
}
