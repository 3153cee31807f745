#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod cycle;
pub mod dimensions;
pub mod geometry;
pub mod history;
pub mod layout;
pub mod layout_dump;
pub mod model;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig};
pub use cycle::{CycleCheck, detect_cycle};
pub use history::{History, HistoryState};
pub use layout::{
    LayoutOptions, LayoutResult, ViewMode, Viewport, compute_layout, find_overlaps,
    rects_from_nodes,
};
pub use model::{CENTER_NODE_ID, GraphEdge, GraphError, GraphNode, NodeKind, WorkspaceGraph};
