// src/ingest.rs
//! Edge-list ingestion.
//!
//! Text input holds one `source target` pair per line. Blank lines and lines
//! starting with `#` or `%` are skipped. Files ending in `.csr` are binary
//! graph exports and are loaded as-is.

use crate::error::{FdlError, GraphError, Result};
use crate::export::binary;
use crate::graph::{Graph, GraphType, VertexId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

pub const BINARY_EXTENSION: &str = "csr";
/// Largest vertex count a text edge list may imply (`max id + 1`).
pub const DEFAULT_MAX_VERTICES: usize = 1 << 27;

/// How text edge lists are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    pub graph_type: GraphType,
    pub max_vertices: usize,
}

impl IngestOptions {
    #[must_use]
    pub fn new(graph_type: GraphType) -> Self {
        Self {
            graph_type,
            max_vertices: DEFAULT_MAX_VERTICES,
        }
    }

    #[must_use]
    pub fn max_vertices(mut self, limit: usize) -> Self {
        self.max_vertices = limit;
        self
    }
}

impl From<GraphType> for IngestOptions {
    fn from(graph_type: GraphType) -> Self {
        Self::new(graph_type)
    }
}

/// Loads a graph from `path`, picking the reader by extension.
///
/// The graph type is ignored for binary files, which record their own type.
///
/// # Errors
/// Returns an I/O error if the file cannot be read, or a [`GraphError`] if
/// its contents do not describe a valid graph.
pub fn load(path: &Path, options: impl Into<IngestOptions>) -> Result<Graph> {
    let options = options.into();
    let is_binary = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(BINARY_EXTENSION));

    let graph = if is_binary {
        binary::read_graph_file(path)?
    } else {
        let file = File::open(path).map_err(|e| FdlError::io(e, path))?;
        read_edge_list(BufReader::new(file), options).map_err(|e| match e {
            FdlError::Io { source, .. } => FdlError::io(source, path),
            other => other,
        })?
    };

    debug!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        kind = %graph.graph_type(),
        "graph loaded"
    );
    Ok(graph)
}

/// Parses a text edge list into a graph with `max id + 1` vertices.
///
/// # Errors
/// Returns [`GraphError::Parse`] for a malformed line,
/// [`GraphError::EmptyGraph`] when the input names no edges at all and
/// [`GraphError::VertexLimit`] when the largest id implies more vertices than
/// `options.max_vertices`.
pub fn read_edge_list<R: BufRead>(reader: R, options: impl Into<IngestOptions>) -> Result<Graph> {
    let options = options.into();
    let mut edges = Vec::new();
    let mut max_id: Option<VertexId> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let Some((u, v)) = parse_line(&line, index + 1)? else {
            continue;
        };
        max_id = Some(max_id.map_or(u.max(v), |m| m.max(u).max(v)));
        edges.push((u, v));
    }

    let Some(max_id) = max_id else {
        return Err(GraphError::EmptyGraph.into());
    };
    let vertex_count = max_id as usize + 1;
    if vertex_count > options.max_vertices {
        return Err(GraphError::VertexLimit {
            max_id,
            requested: vertex_count,
            limit: options.max_vertices,
        }
        .into());
    }
    Ok(Graph::from_edges(options.graph_type, vertex_count, &edges)?)
}

fn parse_line(line: &str, number: usize) -> Result<Option<(VertexId, VertexId)>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
        return Ok(None);
    }

    let malformed = || GraphError::Parse {
        line: number,
        content: trimmed.to_string(),
    };
    let mut tokens = trimmed.split_whitespace();
    let (Some(a), Some(b)) = (tokens.next(), tokens.next()) else {
        return Err(malformed().into());
    };
    let u = a.parse::<VertexId>().map_err(|_| malformed())?;
    let v = b.parse::<VertexId>().map_err(|_| malformed())?;
    Ok(Some((u, v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, graph_type: GraphType) -> Result<Graph> {
        read_edge_list(text.as_bytes(), graph_type)
    }

    #[test]
    fn reads_pairs_and_sizes_by_max_id() {
        let g = parse("0 1\n1 2\n\n# comment\n2 4\n", GraphType::Undirected).expect("valid");
        assert_eq!(g.vertex_count(), 5);
        assert_eq!(g.edge_count(), 6);
        assert!(g.is_isolated(3));
    }

    #[test]
    fn extra_columns_are_ignored() {
        let g = parse("0 1 0.5\n", GraphType::Directed).expect("valid");
        assert_eq!(g.neighbors(0), &[1]);
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let err = parse("0 1\n1 x\n", GraphType::Undirected).expect_err("bad token");
        assert!(matches!(
            err,
            FdlError::Graph(GraphError::Parse { line: 2, .. })
        ));
    }

    #[test]
    fn single_id_is_rejected() {
        let err = parse("7\n", GraphType::Undirected).expect_err("missing target");
        assert!(matches!(err, FdlError::Graph(GraphError::Parse { line: 1, .. })));
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert!(parse("-1 2\n", GraphType::Undirected).is_err());
    }

    #[test]
    fn huge_id_hits_the_vertex_limit() {
        let err = parse("0 1\n1 4000000000\n", GraphType::Undirected).expect_err("too large");
        assert!(matches!(
            err,
            FdlError::Graph(GraphError::VertexLimit {
                max_id: 4_000_000_000,
                ..
            })
        ));
    }

    #[test]
    fn limit_is_configurable() {
        let options = IngestOptions::new(GraphType::Directed).max_vertices(3);
        assert!(read_edge_list("0 2\n".as_bytes(), options).is_ok());
        assert!(matches!(
            read_edge_list("0 3\n".as_bytes(), options),
            Err(FdlError::Graph(GraphError::VertexLimit { requested: 4, limit: 3, .. }))
        ));
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = parse("# nothing\n\n", GraphType::Undirected).expect_err("no edges");
        assert!(matches!(err, FdlError::Graph(GraphError::EmptyGraph)));
    }
}
