// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Structural problems detected while building or loading a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("graph has no vertices")]
    EmptyGraph,

    #[error("offsets must have {expected} entries (vertex count + 1), found {found}")]
    OffsetsLength { expected: usize, found: usize },

    #[error("offsets must start at 0 and end at the edge count {edges}: first {first}, last {last}")]
    InvalidOffsets { first: u32, last: u32, edges: usize },

    #[error("offsets decrease at vertex {vertex}: {prev} -> {next}")]
    NonMonotonicOffsets { vertex: usize, prev: u32, next: u32 },

    #[error("target {target} at position {position} is outside [0, {vertex_count})")]
    TargetOutOfRange {
        position: usize,
        target: u32,
        vertex_count: usize,
    },

    #[error("degree of vertex {vertex} is {stored} but its CSR row holds {actual} targets")]
    DegreeMismatch {
        vertex: usize,
        stored: u32,
        actual: u32,
    },

    #[error("vertex count {0} does not fit a 32-bit vertex id")]
    TooManyVertices(usize),

    #[error("vertex id {max_id} implies {requested} vertices, above the limit of {limit}")]
    VertexLimit {
        max_id: u32,
        requested: usize,
        limit: usize,
    },

    #[error("invalid generator parameters: {0}")]
    Generator(String),

    #[error("line {line}: expected two vertex ids, found {content:?}")]
    Parse { line: usize, content: String },

    #[error("unsupported binary graph: {0}")]
    BinaryFormat(String),
}

/// Failures selecting or computing a vertex ranking.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("ranking algorithm '{0}' is not implemented")]
    NotImplemented(&'static str),

    #[error("unknown ranking algorithm '{0}' (expected neighbourhood, pagerank-directed or pagerank-undirected)")]
    UnknownAlgorithm(String),

    #[error("'{algorithm}' requires a {expected} graph")]
    GraphTypeMismatch {
        algorithm: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("cannot lay out a graph with no vertices")]
    EmptyGraph,

    #[error("invalid layout parameter: {0}")]
    InvalidParameter(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("failed to parse {path}: {source}")]
    Toml {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum FdlError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Rank(#[from] RankError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FdlError {
    /// Attaches a path to a raw I/O error.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    /// True for errors caused by the input graph rather than the environment.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        match self {
            Self::Config(e) => e.is_invalid_input(),
            Self::Graph(_) | Self::Rank(_) | Self::Layout(_) => true,
            Self::Io { .. } | Self::Export(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, FdlError>;

// Allow `?` on std::io::Error by converting to FdlError::Io with unknown path.
impl From<std::io::Error> for FdlError {
    fn from(source: std::io::Error) -> Self {
        FdlError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl ConfigError {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }

    /// False when the environment failed rather than the file's contents.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Toml { .. } | Self::Invalid(_))
    }
}

impl ExportError {
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}
