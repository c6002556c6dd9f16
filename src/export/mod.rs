// src/export/mod.rs
//! Result export: binary CSR graph, binary community labels, JSON layout
//! snapshots.
//!
//! Export failures are returned to the caller and never touch the in-memory
//! graph or layout.

pub mod binary;
pub mod json;

use std::path::{Path, PathBuf};

/// Output file names derived from the input file's stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub initial_snapshot: PathBuf,
    pub final_snapshot: PathBuf,
    pub communities: PathBuf,
    pub graph: PathBuf,
}

impl OutputPaths {
    /// `data/g.txt` with `out_dir = out` gives `out/g0-fdl.json`,
    /// `out/g1-fdl.json`, `out/g-communities.bin` and `out/g.csr`.
    #[must_use]
    pub fn for_input(input: &Path, out_dir: &Path) -> Self {
        let stem = input
            .file_stem()
            .map_or_else(|| "graph".to_string(), |s| s.to_string_lossy().into_owned());

        Self {
            initial_snapshot: out_dir.join(format!("{stem}0-fdl.json")),
            final_snapshot: out_dir.join(format!("{stem}1-fdl.json")),
            communities: out_dir.join(format!("{stem}-communities.bin")),
            graph: out_dir.join(format!("{stem}.{}", crate::ingest::BINARY_EXTENSION)),
        }
    }
}
