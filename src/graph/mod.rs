// src/graph/mod.rs
//! Compressed sparse row (CSR) graph store.
//!
//! The adjacency is two flat vectors: `offsets` (V + 1 prefix sums) and
//! `targets` (E neighbour ids). `neighbors(v)` is a borrowed slice of
//! `targets`, never a copy. Everything except the community labels is frozen
//! once [`Graph::new`] has validated it.

mod build;

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vertex identifier; fixed width so the binary formats can store it directly.
pub type VertexId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    Undirected,
    Directed,
}

impl GraphType {
    /// Tag used by the binary graph format.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            Self::Undirected => 0,
            Self::Directed => 1,
        }
    }

    #[must_use]
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Undirected),
            1 => Some(Self::Directed),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_directed(directed: bool) -> Self {
        if directed {
            Self::Directed
        } else {
            Self::Undirected
        }
    }
}

impl fmt::Display for GraphType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undirected => write!(f, "undirected"),
            Self::Directed => write!(f, "directed"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Graph {
    graph_type: GraphType,
    offsets: Vec<u32>,
    targets: Vec<VertexId>,
    degrees: Vec<u32>,
    communities: Vec<VertexId>,
}

impl Graph {
    /// Builds a graph from a CSR triple, checking every structural invariant.
    ///
    /// Every vertex starts in its own singleton community.
    ///
    /// # Errors
    /// Returns a [`GraphError`] describing the first violated invariant:
    /// offsets of the wrong length, not starting at 0 or ending at E,
    /// decreasing offsets, targets outside `[0, V)`, or a degree that
    /// disagrees with its CSR row.
    pub fn new(
        graph_type: GraphType,
        offsets: Vec<u32>,
        targets: Vec<VertexId>,
        degrees: Vec<u32>,
    ) -> Result<Self, GraphError> {
        let vertex_count = degrees.len();
        if VertexId::try_from(vertex_count).is_err() {
            return Err(GraphError::TooManyVertices(vertex_count));
        }
        validate_offsets(&offsets, vertex_count, targets.len())?;
        validate_targets(&targets, vertex_count)?;
        validate_degrees(&offsets, &degrees)?;

        let communities = (0..vertex_count as VertexId).collect();
        Ok(Self {
            graph_type,
            offsets,
            targets,
            degrees,
            communities,
        })
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.degrees.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn graph_type(&self) -> GraphType {
        self.graph_type
    }

    /// Neighbours of `v`, sliced straight out of the CSR targets.
    ///
    /// # Panics
    /// Panics if `v` is not a vertex of this graph.
    #[must_use]
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        let v = v as usize;
        let begin = self.offsets[v] as usize;
        let end = self.offsets[v + 1] as usize;
        &self.targets[begin..end]
    }

    /// Materializes `neighbors(v)` for every vertex. O(V + E); callers that
    /// need it repeatedly should hold on to the result.
    #[must_use]
    pub fn adjacency_list(&self) -> Vec<&[VertexId]> {
        self.vertices().map(|v| self.neighbors(v)).collect()
    }

    #[must_use]
    pub fn is_isolated(&self, v: VertexId) -> bool {
        self.degrees[v as usize] == 0
    }

    #[must_use]
    pub fn degree(&self, v: VertexId) -> u32 {
        self.degrees[v as usize]
    }

    #[must_use]
    pub fn degrees(&self) -> &[u32] {
        &self.degrees
    }

    #[must_use]
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    #[must_use]
    pub fn targets(&self) -> &[VertexId] {
        &self.targets
    }

    #[must_use]
    pub fn community(&self, v: VertexId) -> VertexId {
        self.communities[v as usize]
    }

    pub fn set_community(&mut self, v: VertexId, label: VertexId) {
        self.communities[v as usize] = label;
    }

    #[must_use]
    pub fn communities(&self) -> &[VertexId] {
        &self.communities
    }

    /// Number of distinct community labels currently assigned.
    #[must_use]
    pub fn community_count(&self) -> usize {
        let mut labels = self.communities.clone();
        labels.sort_unstable();
        labels.dedup();
        labels.len()
    }

    /// Iterates vertex ids in increasing order.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        0..self.vertex_count() as VertexId
    }
}

fn validate_offsets(offsets: &[u32], vertex_count: usize, edges: usize) -> Result<(), GraphError> {
    if offsets.len() != vertex_count + 1 {
        return Err(GraphError::OffsetsLength {
            expected: vertex_count + 1,
            found: offsets.len(),
        });
    }

    let first = offsets.first().copied().unwrap_or_default();
    let last = offsets.last().copied().unwrap_or_default();
    if first != 0 || last as usize != edges {
        return Err(GraphError::InvalidOffsets { first, last, edges });
    }

    for (vertex, pair) in offsets.windows(2).enumerate() {
        if pair[1] < pair[0] {
            return Err(GraphError::NonMonotonicOffsets {
                vertex,
                prev: pair[0],
                next: pair[1],
            });
        }
    }
    Ok(())
}

fn validate_targets(targets: &[VertexId], vertex_count: usize) -> Result<(), GraphError> {
    match targets.iter().position(|&t| t as usize >= vertex_count) {
        Some(position) => Err(GraphError::TargetOutOfRange {
            position,
            target: targets[position],
            vertex_count,
        }),
        None => Ok(()),
    }
}

fn validate_degrees(offsets: &[u32], degrees: &[u32]) -> Result<(), GraphError> {
    for (vertex, (pair, &stored)) in offsets.windows(2).zip(degrees).enumerate() {
        let actual = pair[1] - pair[0];
        if actual != stored {
            return Err(GraphError::DegreeMismatch {
                vertex,
                stored,
                actual,
            });
        }
    }
    Ok(())
}
