// src/rank/mod.rs
//! Per-vertex scoring used to size vertices in exported layouts.

pub mod pagerank;

pub use pagerank::PageRankParams;

use crate::error::RankError;
use crate::graph::{Graph, GraphType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RankingAlgorithm {
    /// `PageRank` over a directed graph.
    PageRankDirected,
    /// `PageRank` over an undirected graph (each edge counts both ways).
    PageRankUndirected,
    /// Number of neighbours.
    Neighbourhood,
    /// Declared extension point; not built yet.
    EigenvectorCentrality,
}

impl RankingAlgorithm {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::PageRankDirected => "pagerank-directed",
            Self::PageRankUndirected => "pagerank-undirected",
            Self::Neighbourhood => "neighbourhood",
            Self::EigenvectorCentrality => "eigenvector",
        }
    }
}

impl fmt::Display for RankingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RankingAlgorithm {
    type Err = RankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neighbourhood" | "neighborhood" | "degree" => Ok(Self::Neighbourhood),
            "pagerank-directed" | "page_rank_directed" => Ok(Self::PageRankDirected),
            "pagerank-undirected" | "page_rank_undirected" => Ok(Self::PageRankUndirected),
            "eigenvector" => Ok(Self::EigenvectorCentrality),
            _ => Err(RankError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl TryFrom<String> for RankingAlgorithm {
    type Error = RankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RankingAlgorithm> for String {
    fn from(algorithm: RankingAlgorithm) -> Self {
        algorithm.name().to_string()
    }
}

/// Scores every vertex of `graph` with `algorithm`.
///
/// # Errors
/// Returns [`RankError::GraphTypeMismatch`] when a `PageRank` variant is
/// asked to rank the other kind of graph, and [`RankError::NotImplemented`]
/// for variants that have no implementation yet. A failed ranking is never
/// reported as an all-zero vector.
pub fn rank(
    graph: &Graph,
    algorithm: RankingAlgorithm,
    params: PageRankParams,
) -> Result<Vec<f64>, RankError> {
    match algorithm {
        RankingAlgorithm::Neighbourhood => Ok(neighbourhood(graph)),
        RankingAlgorithm::PageRankDirected => {
            require(graph, GraphType::Directed, algorithm)?;
            Ok(pagerank::compute(graph, params))
        }
        RankingAlgorithm::PageRankUndirected => {
            require(graph, GraphType::Undirected, algorithm)?;
            Ok(pagerank::compute(graph, params))
        }
        RankingAlgorithm::EigenvectorCentrality => {
            Err(RankError::NotImplemented(algorithm.name()))
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn neighbourhood(graph: &Graph) -> Vec<f64> {
    graph
        .vertices()
        .map(|v| graph.neighbors(v).len() as f64)
        .collect()
}

fn require(graph: &Graph, expected: GraphType, algorithm: RankingAlgorithm) -> Result<(), RankError> {
    if graph.graph_type() == expected {
        Ok(())
    } else {
        Err(RankError::GraphTypeMismatch {
            algorithm: algorithm.name(),
            expected: match expected {
                GraphType::Directed => "directed",
                GraphType::Undirected => "undirected",
            },
        })
    }
}

/// Vertices sorted by descending rank, ties by ascending id.
#[must_use]
pub fn ranked_vertices(ranks: &[f64]) -> Vec<(usize, f64)> {
    let mut ranked: Vec<_> = ranks.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });
    ranked
}
