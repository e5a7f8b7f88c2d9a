//! Style resolution.
//!
//! Builds a lookup from `styleUrl` references (`#id`) to the icon and color
//! a placemark should be drawn with. `<Style>` elements are resolved
//! directly; `<StyleMap>` elements are collapsed to the style their
//! `normal` pair points at.
//!
//! Style maps resolve against direct styles only. A style map whose
//! `normal` pair references another style map resolves to an empty entry.

use std::collections::BTreeMap;

use kml_placemarks_models::StyleEntry;
use roxmltree::{Document, Node};

use crate::color::decode_color;
use crate::node;

/// Pair key selected from a `<StyleMap>`.
pub const NORMAL_PAIR_KEY: &str = "normal";

/// Color sources in priority order: point icons first, then lines, then
/// polygon fills.
const COLOR_PATHS: [[&str; 2]; 3] = [
    ["IconStyle", "color"],
    ["LineStyle", "color"],
    ["PolyStyle", "color"],
];

const ICON_HREF_PATH: [&str; 3] = ["IconStyle", "Icon", "href"];

/// Resolved styles keyed by `#id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleLookup {
    entries: BTreeMap<String, StyleEntry>,
}

impl StyleLookup {
    /// Resolves every `<Style>` and `<StyleMap>` carrying an `id` in `doc`.
    ///
    /// Elements without an `id` are skipped. When ids repeat, the last
    /// definition wins; a style map sharing an id with a style replaces it.
    #[must_use]
    pub fn build(doc: &Document<'_>) -> Self {
        let root = doc.root_element();

        let mut direct = BTreeMap::new();
        for style in node::descendants(&root, "Style") {
            let Some(id) = style.attribute("id") else {
                continue;
            };
            direct.insert(style_key(id), resolve_style(&style));
        }
        log::debug!("Resolved {} direct styles", direct.len());

        let mut entries = direct.clone();
        let mut map_count = 0_usize;
        for style_map in node::descendants(&root, "StyleMap") {
            let Some(id) = style_map.attribute("id") else {
                continue;
            };
            let Some(target) = normal_style_url(&style_map) else {
                log::debug!("StyleMap '{id}' has no '{NORMAL_PAIR_KEY}' pair");
                continue;
            };
            let entry = direct.get(target).cloned().unwrap_or_default();
            entries.insert(style_key(id), entry);
            map_count += 1;
        }
        log::debug!("Resolved {map_count} style maps");

        Self { entries }
    }

    /// Looks up a style reference such as `"#s1"`.
    #[must_use]
    pub fn get(&self, style_ref: &str) -> Option<&StyleEntry> {
        self.entries.get(style_ref)
    }

    /// Resolves an optional reference, falling back to an entry with no
    /// icon and no color when it is absent or unknown.
    #[must_use]
    pub fn resolve(&self, style_ref: Option<&str>) -> StyleEntry {
        style_ref
            .and_then(|r| self.get(r))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of resolved references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no styles were resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the style lookup for `doc`. See [`StyleLookup::build`].
#[must_use]
pub fn build_style_lookup(doc: &Document<'_>) -> StyleLookup {
    StyleLookup::build(doc)
}

fn style_key(id: &str) -> String {
    format!("#{id}")
}

fn resolve_style(style: &Node<'_, '_>) -> StyleEntry {
    let icon = node::child_path(style, &ICON_HREF_PATH)
        .as_ref()
        .and_then(node::present_text)
        .map(str::to_string);

    let color = COLOR_PATHS
        .iter()
        .find_map(|path| node::child_path(style, path).as_ref().and_then(node::trimmed_text))
        .and_then(decode_color);

    StyleEntry { icon, color }
}

/// Trimmed `styleUrl` of the pair whose `<key>` is exactly `normal`.
fn normal_style_url<'a>(style_map: &Node<'a, '_>) -> Option<&'a str> {
    style_map
        .children()
        .filter(|n| node::is_kml_element(n, "Pair"))
        .find(|pair| {
            node::child(pair, "key").and_then(|key| key.text()) == Some(NORMAL_PAIR_KEY)
        })
        .and_then(|pair| node::child_text(&pair, "styleUrl"))
}
