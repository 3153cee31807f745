//! Layout pipeline: radial domain placement followed by collision
//! resolution. `compute_layout` is the single entry point editors call after
//! every structural edit.

pub mod collision;
pub mod radial;

pub use collision::{CollisionOptions, CollisionOutcome, find_overlaps, rects_from_nodes, resolve_collisions};
pub use radial::apply_domain_radial_layout;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::geometry::Size;
use crate::model::{CENTER_NODE_ID, GraphNode, WorkspaceGraph};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Expanded,
    /// Scales ring radii down for dense overview screens.
    Compact,
}

#[derive(Debug, Clone)]
pub struct RadialOptions {
    pub center_id: String,
    pub view_mode: ViewMode,
    pub viewport: Viewport,
}

/// Everything `compute_layout` needs beyond the graph itself. The
/// measurement map is the renderer's contribution; when present it wins over
/// resolver defaults.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub center_id: String,
    pub view_mode: ViewMode,
    pub viewport: Viewport,
    pub measure: Option<BTreeMap<String, Size>>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            center_id: CENTER_NODE_ID.to_string(),
            view_mode: ViewMode::Expanded,
            viewport: Viewport::new(1920.0, 1080.0),
            measure: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub nodes: Vec<GraphNode>,
    /// True when at least one node had no usable size and defaults were
    /// substituted; the no-overlap guarantee is suspended until the caller
    /// re-runs with real measurements.
    pub pending_measurement: bool,
    pub passes_used: u32,
}

/// Radial placement, then de-overlap. Identical inputs yield identical
/// positions; nothing here depends on call order or prior layouts.
pub fn compute_layout(
    graph: &WorkspaceGraph,
    options: &LayoutOptions,
    config: &LayoutConfig,
) -> LayoutResult {
    let radial_options = RadialOptions {
        center_id: options.center_id.clone(),
        view_mode: options.view_mode,
        viewport: options.viewport,
    };
    let placed = apply_domain_radial_layout(&graph.nodes, &radial_options, config);

    let collision_options = CollisionOptions {
        center_id: options.center_id.clone(),
        padding: config.collision.padding,
        max_passes: config.collision.max_passes,
        measure: options.measure.clone(),
    };
    let outcome = resolve_collisions(&placed, &collision_options, &config.dimension);

    LayoutResult {
        nodes: outcome.nodes,
        pending_measurement: outcome.pending_measurement,
        passes_used: outcome.passes_used,
    }
}
