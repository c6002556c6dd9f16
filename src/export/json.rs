// src/export/json.rs
//! JSON layout snapshots.

use crate::error::ExportError;
use crate::layout::LayoutSnapshot;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes `snapshot` as pretty-printed JSON to `path`.
///
/// # Errors
/// Returns [`ExportError::Io`] if the file cannot be created or written and
/// [`ExportError::Json`] if serialization fails.
pub fn write_snapshot(path: &Path, snapshot: &LayoutSnapshot) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(e, path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.write_all(b"\n").map_err(|e| ExportError::io(e, path))?;
    writer.flush().map_err(|e| ExportError::io(e, path))
}

/// Reads a snapshot written by [`write_snapshot`].
///
/// # Errors
/// Returns [`ExportError::Io`] if the file cannot be opened and
/// [`ExportError::Json`] if it is not a snapshot.
pub fn read_snapshot(path: &Path) -> Result<LayoutSnapshot, ExportError> {
    let file = File::open(path).map_err(|e| ExportError::io(e, path))?;
    Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}
