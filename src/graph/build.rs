// src/graph/build.rs
//! CSR construction from an edge list.

use super::{Graph, GraphType, VertexId};
use crate::error::GraphError;

impl Graph {
    /// Builds a graph from `(source, target)` pairs.
    ///
    /// Undirected graphs store every pair in both directions so that each
    /// logical edge appears twice in the CSR targets. Self-loops and repeated
    /// pairs are dropped; rows come out sorted by target id.
    ///
    /// # Errors
    /// Returns [`GraphError::TargetOutOfRange`] if a pair names a vertex
    /// `>= vertex_count`, or [`GraphError::TooManyVertices`] if the count does
    /// not fit a [`VertexId`] or its per-vertex arrays cannot be allocated.
    pub fn from_edges(
        graph_type: GraphType,
        vertex_count: usize,
        edges: &[(VertexId, VertexId)],
    ) -> Result<Self, GraphError> {
        if VertexId::try_from(vertex_count).is_err() {
            return Err(GraphError::TooManyVertices(vertex_count));
        }
        check_endpoints(edges, vertex_count)?;

        let directed = expand(graph_type, edges);
        let (offsets, targets) = counting_sort(&directed, vertex_count)?;
        let (offsets, targets) = dedup_rows(&offsets, targets);
        let degrees = offsets.windows(2).map(|w| w[1] - w[0]).collect();

        Self::new(graph_type, offsets, targets, degrees)
    }
}

fn check_endpoints(edges: &[(VertexId, VertexId)], vertex_count: usize) -> Result<(), GraphError> {
    for (i, &(u, v)) in edges.iter().enumerate() {
        for (slot, id) in [(0, u), (1, v)] {
            if id as usize >= vertex_count {
                return Err(GraphError::TargetOutOfRange {
                    position: 2 * i + slot,
                    target: id,
                    vertex_count,
                });
            }
        }
    }
    Ok(())
}

fn expand(graph_type: GraphType, edges: &[(VertexId, VertexId)]) -> Vec<(VertexId, VertexId)> {
    let mut out = Vec::with_capacity(match graph_type {
        GraphType::Directed => edges.len(),
        GraphType::Undirected => edges.len() * 2,
    });
    for &(u, v) in edges {
        if u == v {
            continue;
        }
        out.push((u, v));
        if graph_type == GraphType::Undirected {
            out.push((v, u));
        }
    }
    out
}

/// Buckets pairs by source: degree count, prefix sum, then scatter.
///
/// The per-vertex arrays are reserved fallibly so an absurd vertex count
/// surfaces as an error instead of an allocation abort.
fn counting_sort(
    edges: &[(VertexId, VertexId)],
    vertex_count: usize,
) -> Result<(Vec<u32>, Vec<VertexId>), GraphError> {
    let mut offsets = zeroed(vertex_count + 1)?;
    for &(u, _) in edges {
        offsets[u as usize + 1] += 1;
    }
    for i in 0..vertex_count {
        offsets[i + 1] += offsets[i];
    }

    let mut cursor = zeroed(vertex_count)?;
    cursor.copy_from_slice(&offsets[..vertex_count]);
    let mut targets = vec![0; edges.len()];
    for &(u, v) in edges {
        let slot = &mut cursor[u as usize];
        targets[*slot as usize] = v;
        *slot += 1;
    }
    Ok((offsets, targets))
}

fn zeroed(len: usize) -> Result<Vec<u32>, GraphError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| GraphError::TooManyVertices(len))?;
    v.resize(len, 0);
    Ok(v)
}

fn dedup_rows(offsets: &[u32], targets: Vec<VertexId>) -> (Vec<u32>, Vec<VertexId>) {
    let mut new_offsets = Vec::with_capacity(offsets.len());
    let mut new_targets = Vec::with_capacity(targets.len());
    new_offsets.push(0);

    for w in offsets.windows(2) {
        let mut row = targets[w[0] as usize..w[1] as usize].to_vec();
        row.sort_unstable();
        row.dedup();
        new_targets.extend_from_slice(&row);
        new_offsets.push(new_targets.len() as u32);
    }
    (new_offsets, new_targets)
}
