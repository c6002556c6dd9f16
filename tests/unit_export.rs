// tests/unit_export.rs
use fdlgraph_core::error::ExportError;
use fdlgraph_core::export::{binary, json, OutputPaths};
use fdlgraph_core::graph::{Graph, GraphType};
use fdlgraph_core::ingest;
use fdlgraph_core::layout::{Layout, LayoutParams, SnapshotOptions};

fn path_graph() -> Graph {
    // vertex 3 is isolated
    Graph::from_edges(GraphType::Undirected, 4, &[(0, 1), (1, 2)]).unwrap()
}

fn params() -> LayoutParams {
    LayoutParams {
        seed: Some(12),
        max_iterations: 10,
        ..LayoutParams::default()
    }
}

#[test]
fn test_binary_file_loads_through_ingest() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("g.csr");
    let g = path_graph();
    binary::write_graph_file(&path, &g).unwrap();

    // graph type comes from the file header, not the argument
    let back = ingest::load(&path, GraphType::Directed).unwrap();
    assert_eq!(back.graph_type(), GraphType::Undirected);
    assert_eq!(back.offsets(), g.offsets());
    assert_eq!(back.targets(), g.targets());
}

#[test]
fn test_community_file_is_raw_u32() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("g-communities.bin");
    binary::write_communities_file(&path, &[0, 0, 2, 5]).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[12..16], &5u32.to_le_bytes());
}

#[test]
fn test_snapshot_hides_isolated_by_default() {
    let g = path_graph();
    let layout = Layout::new(&g, params()).unwrap();
    let ranks = vec![1.0, 2.0, 1.0, 0.0];
    let snap = layout.snapshot(SnapshotOptions::default(), Some(ranks.as_slice()));

    let ids: Vec<u32> = snap.nodes.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(snap.edges.len(), g.edge_count());
    assert_eq!(snap.nodes[1].neighbours, Some(2));
    assert_eq!(snap.nodes[1].rank, Some(2.0));
}

#[test]
fn test_snapshot_options_drop_optional_fields() {
    let g = path_graph();
    let layout = Layout::new(&g, params()).unwrap();
    let options = SnapshotOptions {
        show_isolated: true,
        include_neighbours: false,
        include_rank: false,
    };
    let snap = layout.snapshot(options, Some(&[1.0; 4][..]));
    assert_eq!(snap.nodes.len(), 4);
    assert!(snap.nodes.iter().all(|n| n.neighbours.is_none() && n.rank.is_none()));

    let text = serde_json::to_string(&snap).unwrap();
    assert!(!text.contains("neighbours"));
    assert!(!text.contains("rank"));
}

#[test]
fn test_snapshot_json_round_trip_on_disk() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("g0-fdl.json");
    let g = path_graph();
    let layout = Layout::new(&g, params()).unwrap();
    let snap = layout.snapshot(SnapshotOptions::default(), None);
    json::write_snapshot(&path, &snap).unwrap();

    let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(value["nodes"].is_array());
    assert!(value["edges"][0]["source"].is_u64());
    assert_eq!(json::read_snapshot(&path).unwrap(), snap);
}

#[test]
fn test_write_failure_names_the_path() {
    let d = tempfile::tempdir().unwrap();
    let path = d.path().join("missing-dir").join("g1-fdl.json");
    let g = path_graph();
    let layout = Layout::new(&g, params()).unwrap();
    let err = json::write_snapshot(&path, &layout.snapshot(SnapshotOptions::default(), None))
        .unwrap_err();
    match err {
        ExportError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("expected an I/O error, got {other}"),
    }
}

#[test]
fn test_output_paths_use_out_dir() {
    let paths = OutputPaths::for_input(std::path::Path::new("in/web.txt"), std::path::Path::new("res"));
    assert_eq!(paths.final_snapshot, std::path::Path::new("res/web1-fdl.json"));
}
