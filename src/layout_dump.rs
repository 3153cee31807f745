//! Serializable snapshot of a layout result.
//!
//! This is the hand-off to the rendering/persistence layer, and the one
//! place positions are rounded to integers. The collision passes work on
//! fractional coordinates so rounding bias never accumulates.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::DimensionConfig;
use crate::geometry::Size;
use crate::layout::{LayoutResult, find_overlaps, rects_from_nodes};
use crate::model::WorkspaceGraph;

#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub pending_measurement: bool,
    pub passes_used: u32,
    /// Padded overlaps remaining after resolution. Zero unless the pass
    /// budget ran out or measurements were pending.
    pub overlap_count: usize,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

#[derive(Debug, Serialize)]
pub struct NodeDump {
    pub id: String,
    pub kind: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub domain: Option<String>,
    pub ring: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl LayoutDump {
    /// `measure` must be the same map the layout was computed with, so the
    /// audit sees the rects the resolver actually used.
    pub fn from_result(
        result: &LayoutResult,
        graph: &WorkspaceGraph,
        padding: f64,
        measure: Option<&BTreeMap<String, Size>>,
        config: &DimensionConfig,
    ) -> Self {
        let rects = rects_from_nodes(&result.nodes, measure, config);
        let overlap_count = find_overlaps(&rects, padding).len();

        let nodes = result
            .nodes
            .iter()
            .map(|node| {
                let rect = &rects[&node.id];
                NodeDump {
                    id: node.id.clone(),
                    kind: format!("{:?}", node.kind).to_lowercase(),
                    x: rect.x.round() as i64,
                    y: rect.y.round() as i64,
                    width: rect.width.round() as i64,
                    height: rect.height.round() as i64,
                    domain: node.domain.clone(),
                    ring: node.ring,
                }
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
            })
            .collect();

        Self {
            pending_measurement: result.pending_measurement,
            passes_used: result.passes_used,
            overlap_count,
            nodes,
            edges,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn write_layout_json(dump: &LayoutDump, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, dump)?;
    Ok(())
}
