// src/layout/snapshot.rs
//! Renderable view of a layout: positions joined with community labels.

use super::Layout;
use crate::graph::VertexId;
use serde::{Deserialize, Serialize};

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub show_isolated: bool,
    pub include_neighbours: bool,
    pub include_rank: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            show_isolated: false,
            include_neighbours: true,
            include_rank: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
    /// Community label.
    pub label: VertexId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbours: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: VertexId,
    pub target: VertexId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl Layout<'_> {
    /// Captures the current positions. `ranks` is only consulted when
    /// `options.include_rank` is set.
    #[must_use]
    pub fn snapshot(&self, options: SnapshotOptions, ranks: Option<&[f64]>) -> LayoutSnapshot {
        let graph = self.graph();
        let ranks = ranks.filter(|_| options.include_rank);

        let nodes = graph
            .vertices()
            .filter(|&v| options.show_isolated || !graph.is_isolated(v))
            .map(|v| {
                let pos = self.positions()[v as usize];
                NodeRecord {
                    id: v,
                    x: pos.x,
                    y: pos.y,
                    label: graph.community(v),
                    neighbours: options
                        .include_neighbours
                        .then(|| graph.neighbors(v).len()),
                    rank: ranks.and_then(|r| r.get(v as usize).copied()),
                }
            })
            .collect();

        let edges = graph
            .vertices()
            .flat_map(|v| {
                graph
                    .neighbors(v)
                    .iter()
                    .map(move |&target| EdgeRecord { source: v, target })
            })
            .collect();

        LayoutSnapshot { nodes, edges }
    }
}
