//! Radial domain layout: places every non-center node on a domain-sector /
//! ring-tier grid around the center node.
//!
//! The placement is a pure function of the nodes' domain/ring/input order,
//! the center position, the view mode, the viewport, and the config.
//! Recomputing after any structural edit yields the same positions, which is
//! what makes layouts safe to persist and diff.

use std::collections::BTreeMap;

use crate::config::LayoutConfig;
use crate::dimensions::resolve_dimensions;
use crate::geometry::{Point, Size};
use crate::model::{FALLBACK_DOMAIN, GraphNode};

use super::{RadialOptions, ViewMode};

/// Nodes of one domain, grouped by ring tier, input order preserved within
/// a ring.
struct DomainBucket {
    rings: BTreeMap<u32, Vec<usize>>,
}

/// Missing ring metadata places a node on the innermost satellite tier.
const DEFAULT_RING: u32 = 1;

fn bucket_by_domain(nodes: &[GraphNode], center_id: &str) -> Vec<(String, DomainBucket)> {
    // Vec keyed by first appearance, not a HashMap: sector order must be
    // stable across runs.
    let mut buckets: Vec<(String, DomainBucket)> = Vec::new();
    for (idx, node) in nodes.iter().enumerate() {
        if node.is_center(center_id) {
            continue;
        }
        let domain = node
            .domain
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(FALLBACK_DOMAIN);
        let ring = node.ring.unwrap_or(DEFAULT_RING);
        let bucket = match buckets.iter_mut().find(|(name, _)| name.as_str() == domain) {
            Some((_, bucket)) => bucket,
            None => {
                buckets.push((
                    domain.to_string(),
                    DomainBucket {
                        rings: BTreeMap::new(),
                    },
                ));
                &mut buckets.last_mut().expect("just pushed").1
            }
        };
        bucket.rings.entry(ring).or_default().push(idx);
    }
    buckets
}

/// Compute the polar origin: the center node's position translated to its
/// rect center, or the viewport center when no center node exists.
fn polar_origin(
    nodes: &[GraphNode],
    sizes: &BTreeMap<String, Size>,
    options: &RadialOptions,
) -> Point {
    match nodes.iter().find(|n| n.is_center(&options.center_id)) {
        Some(center) => {
            let size = sizes[&center.id];
            Point::new(
                center.position.x + size.width / 2.0,
                center.position.y + size.height / 2.0,
            )
        }
        None => Point::new(
            options.viewport.width / 2.0,
            options.viewport.height / 2.0,
        ),
    }
}

/// Assign each non-center node a position on the domain/ring grid. The
/// returned vector preserves input order; the center node passes through
/// untouched.
pub fn apply_domain_radial_layout(
    nodes: &[GraphNode],
    options: &RadialOptions,
    config: &LayoutConfig,
) -> Vec<GraphNode> {
    let mut placed: Vec<GraphNode> = nodes.to_vec();
    if nodes.is_empty() {
        return placed;
    }

    let sizes = resolve_dimensions(nodes, &config.dimension);
    let origin = polar_origin(nodes, &sizes, options);
    let buckets = bucket_by_domain(nodes, &options.center_id);
    if buckets.is_empty() {
        return placed;
    }

    let scale = match options.view_mode {
        ViewMode::Expanded => 1.0,
        ViewMode::Compact => config.radial.compact_scale,
    };
    let base_radius = config.radial.base_radius * scale;
    let ring_spacing = config.radial.ring_spacing * scale;
    let sector_span = std::f64::consts::TAU / buckets.len() as f64;
    let start_angle = config.radial.start_angle_deg.to_radians();

    for (sector_idx, (_, bucket)) in buckets.iter().enumerate() {
        let sector_start = start_angle + sector_idx as f64 * sector_span;
        for (&ring, members) in &bucket.rings {
            // Strictly increasing in ring; ring 0 already sits at the base
            // radius, never on the origin.
            let radius = base_radius + ring as f64 * ring_spacing;
            let slots = members.len() as f64;
            for (slot, &node_idx) in members.iter().enumerate() {
                // Interior spread: slot k of n sits at (k+1)/(n+1) of the
                // sector so nodes never land on a sector boundary shared
                // with the neighboring domain.
                let angle = sector_start + sector_span * (slot as f64 + 1.0) / (slots + 1.0);
                let anchor = Point::new(
                    origin.x + radius * angle.cos(),
                    origin.y + radius * angle.sin(),
                );
                let size = sizes[&placed[node_idx].id];
                placed[node_idx].position = Point::new(
                    anchor.x - size.width / 2.0,
                    anchor.y - size.height / 2.0,
                );
            }
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Size, distance};
    use crate::layout::Viewport;
    use crate::model::{CENTER_NODE_ID, NodeKind};

    fn satellite(id: &str, domain: &str, ring: u32) -> GraphNode {
        let mut node = GraphNode::new(id, NodeKind::Frontend);
        node.domain = Some(domain.to_string());
        node.ring = Some(ring);
        node.dimensions = Some(Size::new(100.0, 60.0));
        node
    }

    fn center() -> GraphNode {
        let mut node = GraphNode::new(CENTER_NODE_ID, NodeKind::Center);
        node.position = Point::new(500.0, 400.0);
        node.dimensions = Some(Size::new(100.0, 60.0));
        node
    }

    fn options() -> RadialOptions {
        RadialOptions {
            center_id: CENTER_NODE_ID.to_string(),
            view_mode: ViewMode::Expanded,
            viewport: Viewport::new(1600.0, 1200.0),
        }
    }

    fn anchor_of(node: &GraphNode) -> Point {
        let size = node.dimensions.expect("test nodes are sized");
        Point::new(
            node.position.x + size.width / 2.0,
            node.position.y + size.height / 2.0,
        )
    }

    #[test]
    fn center_position_is_untouched() {
        let nodes = vec![center(), satellite("a", "tech", 1)];
        let placed = apply_domain_radial_layout(&nodes, &options(), &LayoutConfig::default());
        assert_eq!(placed[0].position, Point::new(500.0, 400.0));
    }

    #[test]
    fn radius_grows_with_ring() {
        let config = LayoutConfig::default();
        let nodes = vec![
            center(),
            satellite("a", "tech", 1),
            satellite("b", "tech", 2),
            satellite("c", "tech", 3),
        ];
        let placed = apply_domain_radial_layout(&nodes, &options(), &config);
        let origin = anchor_of(&placed[0]);
        let r1 = distance(origin, anchor_of(&placed[1]));
        let r2 = distance(origin, anchor_of(&placed[2]));
        let r3 = distance(origin, anchor_of(&placed[3]));
        assert!(r1 < r2 && r2 < r3);
        assert!((r2 - r1 - config.radial.ring_spacing).abs() < 1e-9);
    }

    #[test]
    fn layout_is_deterministic() {
        let nodes = vec![
            center(),
            satellite("a", "tech", 1),
            satellite("b", "business", 1),
            satellite("c", "tech", 2),
        ];
        let opts = options();
        let config = LayoutConfig::default();
        let first = apply_domain_radial_layout(&nodes, &opts, &config);
        let second = apply_domain_radial_layout(&nodes, &opts, &config);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.position, b.position);
        }
    }

    #[test]
    fn same_ring_nodes_share_radius_but_not_angle() {
        let nodes = vec![
            center(),
            satellite("a", "tech", 1),
            satellite("b", "tech", 1),
        ];
        let placed = apply_domain_radial_layout(&nodes, &options(), &LayoutConfig::default());
        let origin = anchor_of(&placed[0]);
        let ra = distance(origin, anchor_of(&placed[1]));
        let rb = distance(origin, anchor_of(&placed[2]));
        assert!((ra - rb).abs() < 1e-9);
        assert_ne!(placed[1].position, placed[2].position);
    }

    #[test]
    fn missing_center_falls_back_to_viewport_center() {
        let nodes = vec![satellite("a", "tech", 1)];
        let opts = options();
        let placed = apply_domain_radial_layout(&nodes, &opts, &LayoutConfig::default());
        let origin = Point::new(800.0, 600.0);
        let config = LayoutConfig::default();
        let r = distance(origin, anchor_of(&placed[0]));
        let expected = config.radial.base_radius + config.radial.ring_spacing;
        assert!((r - expected).abs() < 1e-9);
    }

    #[test]
    fn compact_mode_shrinks_radii() {
        let config = LayoutConfig::default();
        let nodes = vec![center(), satellite("a", "tech", 1)];
        let expanded = apply_domain_radial_layout(&nodes, &options(), &config);
        let mut opts = options();
        opts.view_mode = ViewMode::Compact;
        let compact = apply_domain_radial_layout(&nodes, &opts, &config);
        let origin = anchor_of(&expanded[0]);
        let r_expanded = distance(origin, anchor_of(&expanded[1]));
        let r_compact = distance(origin, anchor_of(&compact[1]));
        assert!(r_compact < r_expanded);
    }

    #[test]
    fn undomained_nodes_share_the_fallback_sector() {
        let mut loose = satellite("x", "tech", 1);
        loose.domain = None;
        let mut blank = satellite("y", "tech", 1);
        blank.domain = Some("  ".to_string());
        let implicit = vec![center(), loose, blank];

        let mut explicit = implicit.clone();
        explicit[1].domain = Some("general".to_string());
        explicit[2].domain = Some("general".to_string());

        let config = LayoutConfig::default();
        let a = apply_domain_radial_layout(&implicit, &options(), &config);
        let b = apply_domain_radial_layout(&explicit, &options(), &config);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.position, y.position);
        }
    }
}
