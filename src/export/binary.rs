// src/export/binary.rs
//! Fixed-width binary formats.
//!
//! Graph file (little-endian):
//!
//! | field   | type          |
//! |---------|---------------|
//! | type    | `u8` (0 = undirected, 1 = directed) |
//! | version | `u8`          |
//! | V       | `u64`         |
//! | E       | `u64`         |
//! | offsets | `u32` x (V+1) |
//! | targets | `u32` x E     |
//!
//! Community file: V little-endian `u32` labels in vertex order.

use crate::error::{ExportError, FdlError, GraphError};
use crate::graph::{Graph, GraphType, VertexId};
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub const FORMAT_VERSION: u8 = 1;
/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 1 + 1 + 8 + 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub graph_type: GraphType,
    pub version: u8,
    pub vertex_count: u64,
    pub edge_count: u64,
}

/// Writes `graph` in the binary CSR format.
///
/// # Errors
/// Propagates any write failure.
pub fn write_graph<W: Write>(mut w: W, graph: &Graph) -> std::io::Result<()> {
    w.write_u8(graph.graph_type().tag())?;
    w.write_u8(FORMAT_VERSION)?;
    w.write_u64::<LittleEndian>(graph.vertex_count() as u64)?;
    w.write_u64::<LittleEndian>(graph.edge_count() as u64)?;
    for &offset in graph.offsets() {
        w.write_u32::<LittleEndian>(offset)?;
    }
    for &target in graph.targets() {
        w.write_u32::<LittleEndian>(target)?;
    }
    w.flush()
}

/// Writes community labels as consecutive `u32` values.
///
/// # Errors
/// Propagates any write failure.
pub fn write_communities<W: Write>(mut w: W, labels: &[VertexId]) -> std::io::Result<()> {
    for &label in labels {
        w.write_u32::<LittleEndian>(label)?;
    }
    w.flush()
}

/// Reads the header only.
///
/// # Errors
/// Returns [`GraphError::BinaryFormat`] for an unknown type tag or version.
pub fn read_header<R: Read>(r: &mut R) -> Result<Header, FdlError> {
    let tag = r.read_u8()?;
    let version = r.read_u8()?;
    let vertex_count = r.read_u64::<LittleEndian>()?;
    let edge_count = r.read_u64::<LittleEndian>()?;

    let graph_type = GraphType::from_tag(tag)
        .ok_or_else(|| GraphError::BinaryFormat(format!("unknown graph type tag {tag}")))?;
    if version != FORMAT_VERSION {
        return Err(GraphError::BinaryFormat(format!(
            "unsupported format version {version} (expected {FORMAT_VERSION})"
        ))
        .into());
    }

    Ok(Header {
        graph_type,
        version,
        vertex_count,
        edge_count,
    })
}

/// Reads a binary graph and re-validates it.
///
/// # Errors
/// Returns an I/O error on truncated input and a [`GraphError`] if the
/// stored CSR breaks an invariant.
pub fn read_graph<R: Read>(mut r: R) -> Result<Graph, FdlError> {
    let header = read_header(&mut r)?;
    // offsets are u32, so neither count can exceed u32::MAX
    let (Ok(vertices), Ok(edges)) = (
        u32::try_from(header.vertex_count),
        u32::try_from(header.edge_count),
    ) else {
        return Err(GraphError::BinaryFormat(format!(
            "{} vertices / {} edges exceed 32-bit ids",
            header.vertex_count, header.edge_count
        ))
        .into());
    };
    let (vertex_count, edge_count) = (vertices as usize, edges as usize);

    let offsets = read_u32s(&mut r, vertex_count + 1)?;
    let targets = read_u32s(&mut r, edge_count)?;
    let degrees = offsets
        .windows(2)
        .map(|w| w[1].saturating_sub(w[0]))
        .collect();

    Ok(Graph::new(header.graph_type, offsets, targets, degrees)?)
}

/// Reads community labels until end of input.
///
/// # Errors
/// Returns [`GraphError::BinaryFormat`] if the input length is not a whole
/// number of labels.
pub fn read_communities<R: Read>(mut r: R) -> Result<Vec<VertexId>, FdlError> {
    let mut bytes = Vec::new();
    r.read_to_end(&mut bytes)?;
    if bytes.len() % 4 != 0 {
        return Err(GraphError::BinaryFormat(format!(
            "community file length {} is not a multiple of 4",
            bytes.len()
        ))
        .into());
    }
    let mut labels = vec![0; bytes.len() / 4];
    bytes.as_slice().read_u32_into::<LittleEndian>(&mut labels)?;
    Ok(labels)
}

/// Values read per chunk; memory tracks the bytes actually present rather
/// than the count a header claims.
const CHUNK: usize = 1 << 16;

fn read_u32s<R: Read>(r: &mut R, count: usize) -> std::io::Result<Vec<u32>> {
    let mut values = Vec::with_capacity(count.min(CHUNK));
    let mut chunk = vec![0; CHUNK];
    while values.len() < count {
        let n = (count - values.len()).min(CHUNK);
        r.read_u32_into::<LittleEndian>(&mut chunk[..n])?;
        values.extend_from_slice(&chunk[..n]);
    }
    Ok(values)
}

/// Writes `graph` to `path`.
///
/// # Errors
/// Returns [`ExportError::Io`] naming `path` on failure.
pub fn write_graph_file(path: &Path, graph: &Graph) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(e, path))?;
    write_graph(BufWriter::new(file), graph).map_err(|e| ExportError::io(e, path))
}

/// Writes community labels to `path`.
///
/// # Errors
/// Returns [`ExportError::Io`] naming `path` on failure.
pub fn write_communities_file(path: &Path, labels: &[VertexId]) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|e| ExportError::io(e, path))?;
    write_communities(BufWriter::new(file), labels).map_err(|e| ExportError::io(e, path))
}

/// Reads a binary graph from `path`.
///
/// # Errors
/// See [`read_graph`].
pub fn read_graph_file(path: &Path) -> Result<Graph, FdlError> {
    let file = File::open(path).map_err(|e| FdlError::io(e, path))?;
    read_graph(BufReader::new(file)).map_err(|e| match e {
        FdlError::Io { source, .. } => FdlError::io(source, path),
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Graph {
        Graph::from_edges(GraphType::Undirected, 4, &[(0, 1), (1, 2), (2, 3), (3, 0)])
            .expect("valid edges")
    }

    #[test]
    fn header_layout_is_fixed() {
        let mut buf = Vec::new();
        write_graph(&mut buf, &square()).expect("write");

        assert_eq!(buf[0], 0, "undirected tag");
        assert_eq!(buf[1], FORMAT_VERSION);
        assert_eq!(&buf[2..10], &4u64.to_le_bytes());
        assert_eq!(&buf[10..18], &8u64.to_le_bytes());
        assert_eq!(buf.len(), HEADER_LEN + 4 * (5 + 8));
    }

    #[test]
    fn reader_restores_csr() {
        let g = square();
        let mut buf = Vec::new();
        write_graph(&mut buf, &g).expect("write");

        let back = read_graph(buf.as_slice()).expect("read");
        assert_eq!(back.graph_type(), GraphType::Undirected);
        assert_eq!(back.offsets(), g.offsets());
        assert_eq!(back.targets(), g.targets());
    }

    #[test]
    fn truncated_input_fails() {
        let mut buf = Vec::new();
        write_graph(&mut buf, &square()).expect("write");
        buf.truncate(buf.len() - 2);
        assert!(matches!(read_graph(buf.as_slice()), Err(FdlError::Io { .. })));
    }

    #[test]
    fn inflated_header_fails_without_allocating_it() {
        let mut buf = Vec::new();
        write_graph(&mut buf, &square()).expect("write");
        buf[2..10].copy_from_slice(&4_000_000_000u64.to_le_bytes());
        assert!(matches!(read_graph(buf.as_slice()), Err(FdlError::Io { .. })));
    }

    #[test]
    fn corrupt_offsets_are_rejected_on_load() {
        let mut buf = Vec::new();
        write_graph(&mut buf, &square()).expect("write");
        // last offset (offsets[V]) lives right before the targets
        let last = HEADER_LEN + 4 * 4;
        buf[last..last + 4].copy_from_slice(&99u32.to_le_bytes());
        assert!(matches!(
            read_graph(buf.as_slice()),
            Err(FdlError::Graph(GraphError::InvalidOffsets { .. }))
        ));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut buf = Vec::new();
        write_graph(&mut buf, &square()).expect("write");
        buf[1] = 42;
        assert!(matches!(
            read_graph(buf.as_slice()),
            Err(FdlError::Graph(GraphError::BinaryFormat(_)))
        ));
    }

    #[test]
    fn communities_are_packed_u32() {
        let mut buf = Vec::new();
        write_communities(&mut buf, &[3, 3, 7]).expect("write");
        assert_eq!(buf.len(), 12);
        assert_eq!(read_communities(buf.as_slice()).expect("read"), vec![3, 3, 7]);
    }
}
