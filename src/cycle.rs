//! Cycle detection over the directed edge set.
//!
//! Edge-creation command paths call this before persisting a new edge; a
//! detected cycle is a structured result the caller surfaces to the user,
//! never a panic. Iteration order is fixed (node insertion order, then edge
//! insertion order per node), so the same input always reports the same
//! cycle path.

use std::collections::BTreeMap;

use crate::model::{GraphEdge, GraphError, GraphNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleCheck {
    pub has_cycle: bool,
    /// Closed path when a cycle exists; first and last elements are equal
    /// and consecutive elements are connected by an edge (candidate
    /// included).
    pub cycle: Option<Vec<String>>,
}

impl CycleCheck {
    fn acyclic() -> Self {
        Self {
            has_cycle: false,
            cycle: None,
        }
    }
}

/// DFS frame: which neighbor of `node` gets visited next.
struct Frame {
    node: usize,
    next_neighbor: usize,
}

/// Validate that `edges` plus an optional candidate edge keep the graph
/// acyclic. The candidate lets callers pre-validate an edge before
/// committing it. An edge referencing an unknown node id is reported as
/// `GraphError::UnknownNode`, distinct from a detected cycle.
pub fn detect_cycle(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    candidate: Option<&GraphEdge>,
) -> Result<CycleCheck, GraphError> {
    let mut index_of: BTreeMap<&str, usize> = BTreeMap::new();
    for (idx, node) in nodes.iter().enumerate() {
        index_of.insert(node.id.as_str(), idx);
    }

    // Adjacency in edge insertion order, candidate last.
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for edge in edges.iter().chain(candidate) {
        let source = *index_of
            .get(edge.source.as_str())
            .ok_or_else(|| GraphError::UnknownNode {
                edge_id: edge.id.clone(),
                node_id: edge.source.clone(),
            })?;
        let target = *index_of
            .get(edge.target.as_str())
            .ok_or_else(|| GraphError::UnknownNode {
                edge_id: edge.id.clone(),
                node_id: edge.target.clone(),
            })?;
        adjacency[source].push(target);
    }

    // Explicit-stack DFS; recursion depth on user graphs is unbounded.
    let mut visited = vec![false; nodes.len()];
    let mut on_stack = vec![false; nodes.len()];

    for root in 0..nodes.len() {
        if visited[root] {
            continue;
        }
        let mut stack: Vec<Frame> = vec![Frame {
            node: root,
            next_neighbor: 0,
        }];
        visited[root] = true;
        on_stack[root] = true;

        while let Some(frame) = stack.last_mut() {
            let node = frame.node;
            if frame.next_neighbor < adjacency[node].len() {
                let neighbor = adjacency[node][frame.next_neighbor];
                frame.next_neighbor += 1;
                if on_stack[neighbor] {
                    // Slice of the stack from the neighbor onward, closed by
                    // repeating the neighbor.
                    let start = stack
                        .iter()
                        .position(|f| f.node == neighbor)
                        .expect("neighbor is on the stack");
                    let mut path: Vec<String> = stack[start..]
                        .iter()
                        .map(|f| nodes[f.node].id.clone())
                        .collect();
                    path.push(nodes[neighbor].id.clone());
                    return Ok(CycleCheck {
                        has_cycle: true,
                        cycle: Some(path),
                    });
                }
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    on_stack[neighbor] = true;
                    stack.push(Frame {
                        node: neighbor,
                        next_neighbor: 0,
                    });
                }
            } else {
                on_stack[node] = false;
                stack.pop();
            }
        }
    }

    Ok(CycleCheck::acyclic())
}
