//! Geometry classification and coordinate parsing.
//!
//! A placemark is classified by the first of Point, `LineString` and
//! Polygon found anywhere beneath it. Polygons contribute their outer ring
//! only; inner rings (holes) are not read.

use std::borrow::Cow;
use std::sync::LazyLock;

use kml_placemarks_models::{GeometryKind, LonLat};
use regex::Regex;
use roxmltree::Node;
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::node;

/// `lon,lat[,alt]` with a mandatory fractional part on lon and lat.
///
/// Integer-only tuples such as `121,24` do not match.
static COORDINATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d+\.\d+),(-?\d+\.\d+)(?:,-?\d+\.?\d*)?").expect("valid regex")
});

const OUTER_RING_PATH: [&str; 3] = ["outerBoundaryIs", "LinearRing", "coordinates"];

/// Classifies `placemark` and returns the raw text of the coordinates
/// element for its geometry, if any.
#[must_use]
pub fn extract_geometry<'a>(placemark: &Node<'a, '_>) -> (GeometryKind, Option<&'a str>) {
    for kind in GeometryKind::DETECTION_ORDER {
        if let Some(geometry) = node::descendant(placemark, kind.as_ref()) {
            let coordinates = match kind {
                GeometryKind::Polygon => outer_ring_coordinates(&geometry),
                _ => node::descendant(&geometry, "coordinates"),
            };
            return (kind, coordinates.and_then(|n| n.text()));
        }
    }

    (GeometryKind::Unknown, None)
}

/// `outerBoundaryIs/LinearRing/coordinates`, or for rings written without
/// a boundary wrapper, the first ring that is not an inner boundary.
fn outer_ring_coordinates<'a, 'input>(polygon: &Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    node::child_path(polygon, &OUTER_RING_PATH).or_else(|| {
        node::descendants(polygon, "LinearRing")
            .find(|ring| {
                !ring
                    .ancestors()
                    .take_while(|a| a != polygon)
                    .any(|a| node::is_kml_element(&a, "innerBoundaryIs"))
            })
            .and_then(|ring| node::child(&ring, "coordinates"))
    })
}

/// Parses whitespace-separated `lon,lat[,alt]` tuples into `[lon, lat]`
/// pairs, in source order.
///
/// Altitude is discarded. Decimal digits from any script count, so
/// `١٢١.٥,٢٤.١` reads as `[121.5, 24.1]`. Matched pairs that are still not
/// valid floating-point numbers are skipped.
#[must_use]
pub fn parse_coordinates(raw: &str) -> Vec<LonLat> {
    COORDINATE_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let (lon, lat) = (&caps[1], &caps[2]);
            let parse = |value: &str| ascii_digits(value).parse::<f64>();
            match (parse(lon), parse(lat)) {
                (Ok(lon), Ok(lat)) => Some([lon, lat]),
                _ => {
                    log::debug!("Skipping unparseable coordinate pair '{lon},{lat}'");
                    None
                }
            }
        })
        .collect()
}

/// Rewrites non-ASCII decimal digits (`Nd`) as their ASCII equivalents.
fn ascii_digits(value: &str) -> Cow<'_, str> {
    if value.is_ascii() {
        return Cow::Borrowed(value);
    }
    Cow::Owned(
        value
            .chars()
            .map(|c| decimal_value(c).map_or(c, |d| char::from(b'0' + d)))
            .collect(),
    )
}

/// Value of a decimal digit from any script.
///
/// `Nd` characters come in contiguous runs of ten, zero first, so the value
/// is the offset from the start of the run modulo ten.
fn decimal_value(c: char) -> Option<u8> {
    if c.is_ascii_digit() {
        return u8::try_from(u32::from(c) - u32::from('0')).ok();
    }
    if get_general_category(c) != GeneralCategory::DecimalNumber {
        return None;
    }
    let mut start = u32::from(c);
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32)
        && get_general_category(prev) == GeneralCategory::DecimalNumber
    {
        start -= 1;
    }
    u8::try_from((u32::from(c) - start) % 10).ok()
}
