//! Workspace graph data model.
//!
//! Nodes and edges arrive from persisted editor documents as JSON; the
//! types here are the closed boundary representation. Unknown node kinds
//! are normalized to a documented default instead of carrying free-form
//! strings into the engine.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::geometry::{Point, Size};

/// Reserved identity of the workspace center node. The layout and collision
/// passes never move it.
pub const CENTER_NODE_ID: &str = "center";

/// Domain assigned to nodes that carry none.
pub const FALLBACK_DOMAIN: &str = "general";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Center,
    Root,
    Frontend,
    Backend,
    Requirement,
    Doc,
}

impl NodeKind {
    /// Normalize a wire token. Unknown kinds become `Doc` rather than
    /// propagating loose strings into the engine.
    pub fn from_token(token: &str) -> Self {
        match token {
            "center" => Self::Center,
            "root" => Self::Root,
            "frontend" => Self::Frontend,
            "backend" => Self::Backend,
            "requirement" => Self::Requirement,
            _ => Self::Doc,
        }
    }
}

// Hand-written so unknown kinds load as `Doc` instead of failing the whole
// document.
impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let token = String::deserialize(deserializer)?;
        Ok(NodeKind::from_token(&token))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    #[serde(default = "default_kind")]
    pub kind: NodeKind,
    #[serde(default = "origin")]
    pub position: Point,
    /// Explicit measured size, when the document carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Size>,
    /// Style-sheet width/height strings (`"280px"`), parsed as a fallback
    /// by the dimension resolver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<u32>,
}

fn default_kind() -> NodeKind {
    NodeKind::Doc
}

fn origin() -> Point {
    Point::new(0.0, 0.0)
}

impl GraphNode {
    pub fn new(id: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            position: origin(),
            dimensions: None,
            style_width: None,
            style_height: None,
            domain: None,
            ring: None,
        }
    }

    pub fn is_center(&self, center_id: &str) -> bool {
        self.id == center_id
    }
}

/// Directed edge. Multi-edges between the same ordered pair are permitted;
/// self-loops are rejected by the cycle detector, not by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// An edge references a node id that does not exist in the graph.
    /// Distinct from "cycle detected" so callers can give precise feedback.
    #[error("edge {edge_id} references unknown node {node_id}")]
    UnknownNode { edge_id: String, node_id: String },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceGraph {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl WorkspaceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Check every edge endpoint against the node set. The first dangling
    /// reference is reported; edges are caller data, so this runs before
    /// layout or cycle validation touches them.
    pub fn validate_references(&self) -> Result<(), GraphError> {
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !self.contains_node(endpoint) {
                    return Err(GraphError::UnknownNode {
                        edge_id: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
