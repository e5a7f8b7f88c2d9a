//! Namespace-aware navigation helpers over a parsed KML tree.
//!
//! Only elements in [`KML_NAMESPACE`](crate::KML_NAMESPACE) are matched;
//! identically named elements from other namespaces are ignored.

use roxmltree::Node;

use crate::KML_NAMESPACE;

/// Returns `true` if `node` is a KML element with local name `name`.
#[must_use]
pub fn is_kml_element(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(KML_NAMESPACE)
}

/// First direct child element named `name`.
#[must_use]
pub fn child<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_kml_element(n, name))
}

/// Follows a chain of direct children, e.g. `["IconStyle", "Icon", "href"]`.
#[must_use]
pub fn child_path<'a, 'input>(node: &Node<'a, 'input>, path: &[&str]) -> Option<Node<'a, 'input>> {
    path.iter()
        .try_fold(*node, |current, name| child(&current, name))
}

/// First element named `name` strictly below `node`, in document order.
#[must_use]
pub fn descendant<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .skip(1)
        .find(|n| is_kml_element(n, name))
}

/// All elements named `name` in the subtree rooted at `node`, in document order.
pub fn descendants<'a, 'input: 'a>(
    node: &Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + use<'a, 'input> {
    node.descendants().filter(move |n| is_kml_element(n, name))
}

/// Leading text of `node` with surrounding whitespace removed.
///
/// Returns `None` when the element has no text or only whitespace.
#[must_use]
pub fn trimmed_text<'a>(node: &Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|s| !s.is_empty())
}

/// Leading text of `node`, trimmed, whenever the element has any text.
///
/// Whitespace-only text yields `Some("")`; only an element without text
/// yields `None`.
#[must_use]
pub fn present_text<'a>(node: &Node<'a, '_>) -> Option<&'a str> {
    node.text().filter(|s| !s.is_empty()).map(str::trim)
}

/// Trimmed text of the direct child named `name`, `None` if blank.
#[must_use]
pub fn child_text<'a>(node: &Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).as_ref().and_then(trimmed_text)
}

/// Trimmed text of the direct child named `name`, `Some("")` if blank.
#[must_use]
pub fn child_present_text<'a>(node: &Node<'a, '_>, name: &str) -> Option<&'a str> {
    child(node, name).as_ref().and_then(present_text)
}
