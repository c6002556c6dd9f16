// src/generate.rs
//! Synthetic graphs with planted communities.
//!
//! Vertices are split into contiguous blocks. A pair inside one block is
//! joined with probability `p_in`, a pair spanning two blocks with `p_out`.
//! The output is a sorted list of `u < v` pairs using 0-based ids, ready for
//! [`crate::ingest::read_edge_list`].

use crate::error::{ExportError, GraphError};
use crate::graph::VertexId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::ops::Range;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_NODES: usize = 600;
pub const DEFAULT_COMMUNITIES: usize = 6;
pub const DEFAULT_P_IN: f64 = 0.15;
pub const DEFAULT_P_OUT: f64 = 0.002;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantedPartition {
    pub nodes: usize,
    pub communities: usize,
    pub p_in: f64,
    pub p_out: f64,
    pub seed: u64,
}

impl Default for PlantedPartition {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES,
            communities: DEFAULT_COMMUNITIES,
            p_in: DEFAULT_P_IN,
            p_out: DEFAULT_P_OUT,
            seed: DEFAULT_SEED,
        }
    }
}

impl PlantedPartition {
    /// # Errors
    /// Returns [`GraphError::Generator`] when there are no vertices, more
    /// blocks than vertices, a probability outside `[0, 1]`, or more vertices
    /// than a 32-bit id can address.
    pub fn validate(&self) -> Result<(), GraphError> {
        if self.nodes == 0 {
            return Err(GraphError::Generator("nodes must be positive".into()));
        }
        if VertexId::try_from(self.nodes - 1).is_err() {
            return Err(GraphError::TooManyVertices(self.nodes));
        }
        if self.communities == 0 || self.communities > self.nodes {
            return Err(GraphError::Generator(format!(
                "communities must be in 1..={}, got {}",
                self.nodes, self.communities
            )));
        }
        for (name, p) in [("p_in", self.p_in), ("p_out", self.p_out)] {
            if !(0.0..=1.0).contains(&p) {
                return Err(GraphError::Generator(format!(
                    "{name} must be in [0, 1], got {p}"
                )));
            }
        }
        Ok(())
    }

    /// Vertex ranges of each block. The first `nodes % communities` blocks
    /// hold one extra vertex.
    #[must_use]
    pub fn blocks(&self) -> Vec<Range<usize>> {
        let base = self.nodes / self.communities;
        let extra = self.nodes % self.communities;
        let mut start = 0;
        (0..self.communities)
            .map(|i| {
                let len = base + usize::from(i < extra);
                let block = start..start + len;
                start += len;
                block
            })
            .collect()
    }

    /// Block index of every vertex.
    #[must_use]
    pub fn membership(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes);
        for (i, block) in self.blocks().into_iter().enumerate() {
            out.extend(block.map(|_| i));
        }
        out
    }

    /// Draws the edge set, sorted by `(u, v)` with `u < v`.
    ///
    /// # Errors
    /// See [`PlantedPartition::validate`].
    pub fn generate(&self) -> Result<Vec<(VertexId, VertexId)>, GraphError> {
        self.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let blocks = self.blocks();
        let mut edges = Vec::new();

        for block in &blocks {
            for u in block.clone() {
                for v in u + 1..block.end {
                    if rng.gen::<f64>() < self.p_in {
                        edges.push((u, v));
                    }
                }
            }
        }
        for (i, left) in blocks.iter().enumerate() {
            for right in &blocks[i + 1..] {
                for u in left.clone() {
                    for v in right.clone() {
                        if rng.gen::<f64>() < self.p_out {
                            edges.push((u, v));
                        }
                    }
                }
            }
        }

        edges.sort_unstable();
        debug!(
            nodes = self.nodes,
            communities = self.communities,
            edges = edges.len(),
            "planted partition generated"
        );
        // validate() bounds every id below u32::MAX
        #[allow(clippy::cast_possible_truncation)]
        let edges = edges
            .into_iter()
            .map(|(u, v)| (u as VertexId, v as VertexId))
            .collect();
        Ok(edges)
    }
}

/// Writes one `u v` line per edge.
///
/// # Errors
/// Returns the underlying I/O error.
pub fn write_edge_list<W: Write>(mut w: W, edges: &[(VertexId, VertexId)]) -> std::io::Result<()> {
    for (u, v) in edges {
        writeln!(w, "{u} {v}")?;
    }
    w.flush()
}

/// Writes `edges` to `path` as a text edge list.
///
/// # Errors
/// Returns [`ExportError::Io`] naming `path` on failure.
pub fn write_edge_list_file(path: &Path, edges: &[(VertexId, VertexId)]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(e, path))?;
    write_edge_list(BufWriter::new(file), edges).map_err(|e| ExportError::io(e, path))
}
