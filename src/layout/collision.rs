//! Collision resolver: iterative de-overlap of node rectangles after the
//! radial pass.
//!
//! The contract is "never guess a position change based on a guessed size":
//! if any node in scope has no measured or supplied size, the resolver
//! returns the input untouched with `pending_measurement = true` and the
//! caller re-runs once the renderer reports real sizes.

use std::collections::BTreeMap;

use crate::config::DimensionConfig;
use crate::dimensions::{measured_size, resolve_dimensions};
use crate::geometry::{Rect, Size};
use crate::model::GraphNode;

#[derive(Debug, Clone)]
pub struct CollisionOptions {
    /// Node exempt from being moved; its overlap partner absorbs the full
    /// separation.
    pub center_id: String,
    /// Minimum clearance between any two rectangles.
    pub padding: f64,
    /// Relaxation pass budget.
    pub max_passes: u32,
    /// Renderer-supplied pixel sizes; takes precedence over anything the
    /// dimension resolver derives. This is the engine/renderer boundary.
    pub measure: Option<BTreeMap<String, Size>>,
}

#[derive(Debug, Clone)]
pub struct CollisionOutcome {
    pub nodes: Vec<GraphNode>,
    pub pending_measurement: bool,
    /// Passes actually spent; equal to the budget when relaxation did not
    /// converge.
    pub passes_used: u32,
}

/// Position + resolved size per node, as rectangles. The measurement map
/// wins, then the resolver chain with defaults. Exposed so callers can audit
/// layout quality without re-deriving the rects.
pub fn rects_from_nodes(
    nodes: &[GraphNode],
    measure: Option<&BTreeMap<String, Size>>,
    config: &DimensionConfig,
) -> BTreeMap<String, Rect> {
    let resolved = resolve_dimensions(nodes, config);
    let mut rects = BTreeMap::new();
    for node in nodes {
        let size = measure
            .and_then(|m| m.get(&node.id).copied())
            .unwrap_or(resolved[&node.id]);
        rects.insert(
            node.id.clone(),
            Rect::new(node.position.x, node.position.y, size.width, size.height),
        );
    }
    rects
}

/// All pairwise overlaps between rectangles inflated by `padding / 2` per
/// side. Two padded rects overlap iff their projections intersect on both
/// axes. Pair order follows the map's key order, so results are stable.
pub fn find_overlaps(rects: &BTreeMap<String, Rect>, padding: f64) -> Vec<(String, String)> {
    let entries: Vec<(&String, Rect)> = rects
        .iter()
        .map(|(id, rect)| (id, rect.inflate(padding / 2.0)))
        .collect();
    let mut overlaps = Vec::new();
    for i in 0..entries.len() {
        for j in (i + 1)..entries.len() {
            let (id_a, a) = &entries[i];
            let (id_b, b) = &entries[j];
            if a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom() {
                overlaps.push(((*id_a).clone(), (*id_b).clone()));
            }
        }
    }
    overlaps
}

fn separation(a: &Rect, b: &Rect) -> (f64, f64) {
    let overlap_x = a.right().min(b.right()) - a.x.max(b.x);
    let overlap_y = a.bottom().min(b.bottom()) - a.y.max(b.y);
    // Minimal translation along the axis of least penetration. Sign pushes
    // `a` away from `b`.
    if overlap_x <= overlap_y {
        let dir = if a.center().x <= b.center().x { -1.0 } else { 1.0 };
        (dir * overlap_x, 0.0)
    } else {
        let dir = if a.center().y <= b.center().y { -1.0 } else { 1.0 };
        (0.0, dir * overlap_y)
    }
}

fn has_unmeasured_node(
    nodes: &[GraphNode],
    measure: Option<&BTreeMap<String, Size>>,
) -> bool {
    nodes.iter().any(|node| {
        let supplied = measure.is_some_and(|m| m.contains_key(&node.id));
        !supplied && measured_size(node).is_none()
    })
}

/// Nudge overlapping rectangles apart until a pass is clean or the budget
/// runs out. Positions stay fractional here; rounding happens only at the
/// dump/render hand-off.
pub fn resolve_collisions(
    nodes: &[GraphNode],
    options: &CollisionOptions,
    config: &DimensionConfig,
) -> CollisionOutcome {
    let mut resolved: Vec<GraphNode> = nodes.to_vec();

    if has_unmeasured_node(nodes, options.measure.as_ref()) {
        return CollisionOutcome {
            nodes: resolved,
            pending_measurement: true,
            passes_used: 0,
        };
    }

    let index_of: BTreeMap<String, usize> = resolved
        .iter()
        .enumerate()
        .map(|(idx, node)| (node.id.clone(), idx))
        .collect();

    let mut passes_used = 0;
    for _ in 0..options.max_passes {
        let rects = rects_from_nodes(&resolved, options.measure.as_ref(), config);
        let overlaps = find_overlaps(&rects, options.padding);
        if overlaps.is_empty() {
            break;
        }
        passes_used += 1;
        for (id_a, id_b) in overlaps {
            let padded_a = rects[&id_a].inflate(options.padding / 2.0);
            let padded_b = rects[&id_b].inflate(options.padding / 2.0);
            let (dx, dy) = separation(&padded_a, &padded_b);
            let a_center = id_a == options.center_id;
            let b_center = id_b == options.center_id;
            if a_center && b_center {
                continue;
            }
            let idx_a = index_of[&id_a];
            let idx_b = index_of[&id_b];
            if a_center {
                // Only the partner moves, by the full separation.
                resolved[idx_b].position.x -= dx;
                resolved[idx_b].position.y -= dy;
            } else if b_center {
                resolved[idx_a].position.x += dx;
                resolved[idx_a].position.y += dy;
            } else {
                resolved[idx_a].position.x += dx / 2.0;
                resolved[idx_a].position.y += dy / 2.0;
                resolved[idx_b].position.x -= dx / 2.0;
                resolved[idx_b].position.y -= dy / 2.0;
            }
        }
    }

    CollisionOutcome {
        nodes: resolved,
        pending_measurement: false,
        passes_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::model::{CENTER_NODE_ID, NodeKind};

    fn sized_node(id: &str, x: f64, y: f64, w: f64, h: f64) -> GraphNode {
        let mut node = GraphNode::new(id, NodeKind::Backend);
        node.position = Point::new(x, y);
        node.dimensions = Some(Size::new(w, h));
        node
    }

    fn options(padding: f64) -> CollisionOptions {
        CollisionOptions {
            center_id: CENTER_NODE_ID.to_string(),
            padding,
            max_passes: 25,
            measure: None,
        }
    }

    #[test]
    fn find_overlaps_respects_padding() {
        let mut rects = BTreeMap::new();
        rects.insert("a".to_string(), Rect::new(0.0, 0.0, 100.0, 100.0));
        rects.insert("b".to_string(), Rect::new(105.0, 0.0, 100.0, 100.0));
        // 5px gap: clean without padding, a violation at padding 12.
        assert!(find_overlaps(&rects, 0.0).is_empty());
        assert_eq!(
            find_overlaps(&rects, 12.0),
            vec![("a".to_string(), "b".to_string())]
        );
    }

    #[test]
    fn overlapping_pair_separates() {
        let nodes = vec![
            sized_node("a", 0.0, 0.0, 100.0, 100.0),
            sized_node("b", 60.0, 10.0, 100.0, 100.0),
        ];
        let outcome = resolve_collisions(&nodes, &options(12.0), &DimensionConfig::default());
        assert!(!outcome.pending_measurement);
        let rects = rects_from_nodes(&outcome.nodes, None, &DimensionConfig::default());
        assert!(find_overlaps(&rects, 12.0).is_empty());
    }

    #[test]
    fn center_node_never_moves() {
        let mut center = sized_node(CENTER_NODE_ID, 0.0, 0.0, 100.0, 100.0);
        center.kind = NodeKind::Center;
        let nodes = vec![center, sized_node("a", 40.0, 40.0, 100.0, 100.0)];
        let outcome = resolve_collisions(&nodes, &options(12.0), &DimensionConfig::default());
        assert_eq!(outcome.nodes[0].position, Point::new(0.0, 0.0));
        let rects = rects_from_nodes(&outcome.nodes, None, &DimensionConfig::default());
        assert!(find_overlaps(&rects, 12.0).is_empty());
    }

    #[test]
    fn unmeasured_node_suspends_resolution() {
        let mut unmeasured = GraphNode::new("ghost", NodeKind::Doc);
        unmeasured.position = Point::new(10.0, 10.0);
        let nodes = vec![sized_node("a", 0.0, 0.0, 100.0, 100.0), unmeasured];
        let outcome = resolve_collisions(&nodes, &options(12.0), &DimensionConfig::default());
        assert!(outcome.pending_measurement);
        assert_eq!(outcome.passes_used, 0);
        // Input unchanged.
        assert_eq!(outcome.nodes[0].position, Point::new(0.0, 0.0));
        assert_eq!(outcome.nodes[1].position, Point::new(10.0, 10.0));
    }

    #[test]
    fn measurement_map_covers_unmeasured_nodes() {
        let mut unmeasured = GraphNode::new("ghost", NodeKind::Doc);
        unmeasured.position = Point::new(10.0, 10.0);
        let nodes = vec![sized_node("a", 0.0, 0.0, 100.0, 100.0), unmeasured];
        let mut opts = options(12.0);
        let mut measure = BTreeMap::new();
        measure.insert("ghost".to_string(), Size::new(80.0, 40.0));
        opts.measure = Some(measure);
        let outcome = resolve_collisions(&nodes, &opts, &DimensionConfig::default());
        assert!(!outcome.pending_measurement);
        let rects = rects_from_nodes(&outcome.nodes, opts.measure.as_ref(), &DimensionConfig::default());
        assert!(find_overlaps(&rects, 12.0).is_empty());
    }

    #[test]
    fn stacked_nodes_fan_out() {
        // Three nodes on the exact same spot.
        let nodes = vec![
            sized_node("a", 0.0, 0.0, 100.0, 80.0),
            sized_node("b", 0.0, 0.0, 100.0, 80.0),
            sized_node("c", 0.0, 0.0, 100.0, 80.0),
        ];
        let outcome = resolve_collisions(&nodes, &options(8.0), &DimensionConfig::default());
        let rects = rects_from_nodes(&outcome.nodes, None, &DimensionConfig::default());
        assert!(find_overlaps(&rects, 8.0).is_empty());
    }

    #[test]
    fn pass_budget_bounds_the_work() {
        let mut opts = options(12.0);
        opts.max_passes = 1;
        let nodes = vec![
            sized_node("a", 0.0, 0.0, 100.0, 100.0),
            sized_node("b", 1.0, 0.0, 100.0, 100.0),
            sized_node("c", 2.0, 0.0, 100.0, 100.0),
            sized_node("d", 3.0, 0.0, 100.0, 100.0),
        ];
        let outcome = resolve_collisions(&nodes, &opts, &DimensionConfig::default());
        assert_eq!(outcome.passes_used, 1);
    }
}
