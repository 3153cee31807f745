//! Dimension resolver: the one place node sizes come from.
//!
//! Preference order per node: explicit `dimensions`, then numeric-parseable
//! style width/height strings, then the fixed defaults. Resolved values are
//! rounded to the nearest integer and clamped to at least 1 per axis: the
//! collision pass divides by extents and must never see a zero-area rect.

use std::collections::BTreeMap;

use crate::config::DimensionConfig;
use crate::geometry::Size;
use crate::model::GraphNode;

/// Parse a style dimension string such as `"280"`, `"280.4"` or `"280px"`.
pub(crate) fn parse_style_dimension(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_end_matches("px").trim();
    let value: f64 = trimmed.parse().ok()?;
    if value.is_finite() { Some(value) } else { None }
}

fn sanitize(width: f64, height: f64) -> Size {
    Size::new(width.round().max(1.0), height.round().max(1.0))
}

/// Size of a node without the default fallback. `None` means the node has
/// not been measured yet; the collision resolver treats that as a
/// pending-measurement condition rather than guessing.
pub fn measured_size(node: &GraphNode) -> Option<Size> {
    if let Some(dims) = node.dimensions
        && dims.width.is_finite()
        && dims.height.is_finite()
        && dims.width > 0.0
        && dims.height > 0.0
    {
        return Some(sanitize(dims.width, dims.height));
    }
    let width = node.style_width.as_deref().and_then(parse_style_dimension)?;
    let height = node
        .style_height
        .as_deref()
        .and_then(parse_style_dimension)?;
    if width > 0.0 && height > 0.0 {
        Some(sanitize(width, height))
    } else {
        None
    }
}

/// Authoritative size per node, defaults substituted where nothing was
/// measured. Never mutates its input.
pub fn resolve_dimensions(nodes: &[GraphNode], config: &DimensionConfig) -> BTreeMap<String, Size> {
    let mut sizes = BTreeMap::new();
    for node in nodes {
        let size = measured_size(node)
            .unwrap_or_else(|| sanitize(config.default_width, config.default_height));
        sizes.insert(node.id.clone(), size);
    }
    sizes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NodeKind;

    fn node(id: &str) -> GraphNode {
        GraphNode::new(id, NodeKind::Doc)
    }

    #[test]
    fn explicit_dimensions_win() {
        let mut n = node("a");
        n.dimensions = Some(Size::new(120.6, 80.2));
        n.style_width = Some("999".to_string());
        assert_eq!(measured_size(&n), Some(Size::new(121.0, 80.0)));
    }

    #[test]
    fn style_strings_parse_with_px_suffix() {
        let mut n = node("a");
        n.style_width = Some("280px".to_string());
        n.style_height = Some(" 200.4px ".to_string());
        assert_eq!(measured_size(&n), Some(Size::new(280.0, 200.0)));
    }

    #[test]
    fn unmeasured_node_reports_none_but_resolves_to_default() {
        let n = node("a");
        assert_eq!(measured_size(&n), None);
        let sizes = resolve_dimensions(&[n], &DimensionConfig::default());
        assert_eq!(sizes["a"], Size::new(280.0, 200.0));
    }

    #[test]
    fn degenerate_sizes_clamp_to_one() {
        let mut n = node("a");
        n.dimensions = Some(Size::new(0.2, 0.4));
        assert_eq!(measured_size(&n), Some(Size::new(1.0, 1.0)));
        let sizes = resolve_dimensions(&[n], &DimensionConfig::default());
        assert!(sizes["a"].width >= 1.0);
        assert!(sizes["a"].height >= 1.0);
    }

    #[test]
    fn garbage_style_strings_fall_through() {
        let mut n = node("a");
        n.style_width = Some("wide".to_string());
        n.style_height = Some("200".to_string());
        assert_eq!(measured_size(&n), None);
    }
}
