//! Placemark extraction.
//!
//! Walks every `<Placemark>` in document order and turns the ones with at
//! least one parseable coordinate into [`PlacemarkRecord`]s.

use kml_placemarks_models::{DEFAULT_DESCRIPTION, DEFAULT_NAME, PlacemarkRecord};
use roxmltree::{Document, Node};

use crate::geometry::{extract_geometry, parse_coordinates};
use crate::node;
use crate::style::StyleLookup;

/// Extracts all placemark records from `doc`.
///
/// Placemarks without coordinates produce no record.
#[must_use]
pub fn extract(doc: &Document<'_>) -> Vec<PlacemarkRecord> {
    let styles = StyleLookup::build(doc);
    log::debug!("Style lookup holds {} references", styles.len());

    let mut records = Vec::new();
    let mut skipped = 0_usize;

    for placemark in node::descendants(&doc.root_element(), "Placemark") {
        if let Some(record) = extract_placemark(&placemark, &styles) {
            records.push(record);
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} placemarks without coordinates");
    }
    log::info!("Extracted {} placemarks", records.len());

    records
}

/// Builds the record for a single placemark, or `None` if it has no
/// coordinates.
#[must_use]
pub fn extract_placemark(
    placemark: &Node<'_, '_>,
    styles: &StyleLookup,
) -> Option<PlacemarkRecord> {
    let (kind, raw_coordinates) = extract_geometry(placemark);
    let coordinates = raw_coordinates.map(parse_coordinates).unwrap_or_default();
    if coordinates.is_empty() {
        return None;
    }

    let style = styles.resolve(node::child_text(placemark, "styleUrl"));

    Some(PlacemarkRecord {
        name: node::child_present_text(placemark, "name")
            .unwrap_or(DEFAULT_NAME)
            .to_string(),
        description: node::child_present_text(placemark, "description")
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_string(),
        kind,
        coordinates,
        color: style.color,
        icon: style.icon,
    })
}

#[cfg(test)]
mod tests {
    use kml_placemarks_models::GeometryKind;

    use super::*;

    fn extract_body(body: &str) -> Vec<PlacemarkRecord> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2"><Document>{body}</Document></kml>"#
        );
        let doc = Document::parse(&xml).unwrap();
        extract(&doc)
    }

    #[test]
    fn single_styled_point() {
        let records = extract_body(
            r##"<Style id="s1"><IconStyle><color>ff0000ff</color><Icon><href>icon.png</href></Icon></IconStyle></Style>
               <Placemark>
                 <styleUrl>#s1</styleUrl>
                 <Point><coordinates>121.500000,24.100000,0</coordinates></Point>
               </Placemark>"##,
        );

        assert_eq!(
            records,
            vec![PlacemarkRecord {
                name: DEFAULT_NAME.to_string(),
                description: DEFAULT_DESCRIPTION.to_string(),
                kind: GeometryKind::Point,
                coordinates: vec![[121.5, 24.1]],
                color: Some("#FF0000".to_string()),
                icon: Some("icon.png".to_string()),
            }]
        );
    }

    #[test]
    fn trims_name_and_description() {
        let records = extract_body(
            "<Placemark>
               <name>  Shelter A  </name>
               <description><![CDATA[ <b>open</b> 24h ]]></description>
               <Point><coordinates>1.0,2.0</coordinates></Point>
             </Placemark>",
        );
        assert_eq!(records[0].name, "Shelter A");
        assert_eq!(records[0].description, "<b>open</b> 24h");
    }

    #[test]
    fn empty_elements_use_defaults() {
        let records = extract_body(
            "<Placemark><name></name><description/><Point><coordinates>1.0,2.0</coordinates></Point></Placemark>",
        );
        assert_eq!(records[0].name, DEFAULT_NAME);
        assert_eq!(records[0].description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn whitespace_only_text_becomes_empty_string() {
        let records = extract_body(
            "<Placemark><name>  </name><description> \n </description><Point><coordinates>1.0,2.0</coordinates></Point></Placemark>",
        );
        assert_eq!(records[0].name, "");
        assert_eq!(records[0].description, "");
    }

    #[test]
    fn drops_placemarks_without_coordinates() {
        let records = extract_body(
            "<Placemark><name>empty point</name><Point/></Placemark>
             <Placemark><name>integers</name><Point><coordinates>121,24</coordinates></Point></Placemark>
             <Placemark><name>no geometry</name></Placemark>
             <Placemark><name>kept</name><LineString><coordinates>1.0,2.0 3.0,4.0</coordinates></LineString></Placemark>",
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "kept");
        assert_eq!(records[0].kind, GeometryKind::LineString);
        assert!(records.iter().all(|r| !r.coordinates.is_empty()));
    }

    #[test]
    fn unresolved_style_is_null() {
        let records = extract_body(
            "<Placemark><styleUrl>#missing</styleUrl><Point><coordinates>1.0,2.0</coordinates></Point></Placemark>
             <Placemark><Point><coordinates>3.0,4.0</coordinates></Point></Placemark>",
        );
        assert_eq!(records.len(), 2);
        for record in records {
            assert_eq!(record.color, None);
            assert_eq!(record.icon, None);
        }
    }

    #[test]
    fn style_map_reference_resolves_through_normal_pair() {
        let records = extract_body(
            r##"<Style id="n"><LineStyle><color>ff00ff00</color></LineStyle></Style>
               <StyleMap id="m"><Pair><key>normal</key><styleUrl>#n</styleUrl></Pair></StyleMap>
               <Folder>
                 <Placemark><styleUrl>#m</styleUrl><LineString><coordinates>1.0,2.0 3.0,4.0</coordinates></LineString></Placemark>
               </Folder>"##,
        );
        assert_eq!(records[0].color.as_deref(), Some("#00FF00"));
        assert_eq!(records[0].icon, None);
    }

    #[test]
    fn preserves_document_order_across_folders() {
        let records = extract_body(
            "<Placemark><name>a</name><Point><coordinates>1.0,1.0</coordinates></Point></Placemark>
             <Folder>
               <Placemark><name>b</name><Point><coordinates>2.0,2.0</coordinates></Point></Placemark>
               <Folder><Placemark><name>c</name><Point><coordinates>3.0,3.0</coordinates></Point></Placemark></Folder>
             </Folder>
             <Placemark><name>d</name><Point><coordinates>4.0,4.0</coordinates></Point></Placemark>",
        );
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn ignores_elements_outside_kml_namespace() {
        let xml = "<kml><Document><Placemark><Point><coordinates>1.0,2.0</coordinates></Point></Placemark></Document></kml>";
        let doc = Document::parse(xml).unwrap();
        assert!(extract(&doc).is_empty());
    }
}
