//! Integration tests: run the `fdlgraph` binary end to end inside temp
//! directories so no config or output leaks between tests.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SQUARE: &str = "# 4-cycle plus a tail\n0 1\n1 2\n2 3\n3 0\n3 4\n";

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    std::fs::write(dir.path().join("square.txt"), SQUARE).expect("failed to write graph");
    dir
}

fn run(dir: &TempDir, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fdlgraph"))
        .args(args)
        .current_dir(dir.path())
        .output()
        .expect("failed to execute fdlgraph")
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path).expect("missing snapshot");
    serde_json::from_str(&text).expect("snapshot is not valid JSON")
}

#[test]
fn process_writes_every_export() {
    let dir = workspace();
    let out = run(
        &dir,
        &["process", "square.txt", "--out", "res", "--seed", "3", "--iterations", "20", "--quiet"],
    );
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let res = dir.path().join("res");
    for name in ["square0-fdl.json", "square1-fdl.json", "square-communities.bin", "square.csr"] {
        assert!(res.join(name).exists(), "missing {name}");
    }

    let last = read_json(&res.join("square1-fdl.json"));
    assert_eq!(last["nodes"].as_array().map(Vec::len), Some(5));
    assert_eq!(last["edges"].as_array().map(Vec::len), Some(10));
    assert!(last["nodes"][0]["rank"].is_number());

    let labels = std::fs::read(res.join("square-communities.bin")).expect("labels");
    assert_eq!(labels.len(), 5 * 4);
}

#[test]
fn process_is_deterministic_with_seed() {
    let dir = workspace();
    let args = ["process", "square.txt", "--seed", "11", "--iterations", "15", "--quiet"];
    assert!(run(&dir, &args).status.success());
    let first = read_json(&dir.path().join("square1-fdl.json"));
    assert!(run(&dir, &args).status.success());
    let second = read_json(&dir.path().join("square1-fdl.json"));
    assert_eq!(first, second);
}

#[test]
fn malformed_graph_exits_with_invalid_input() {
    let dir = workspace();
    std::fs::write(dir.path().join("bad.txt"), "0 1\nfoo bar\n").expect("write");
    let out = run(&dir, &["process", "bad.txt", "--quiet"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn huge_vertex_id_exits_with_invalid_input() {
    let dir = workspace();
    std::fs::write(dir.path().join("wide.txt"), "0 1\n1 4000000000\n").expect("write");
    let out = run(&dir, &["convert", "wide.txt"]);
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("above the limit"), "stderr: {stderr}");
}

#[test]
fn vertex_limit_comes_from_config() {
    let dir = workspace();
    std::fs::write(dir.path().join("fdlgraph.toml"), "[ingest]\nmax_vertices = 4\n")
        .expect("write config");
    assert_eq!(run(&dir, &["convert", "square.txt"]).status.code(), Some(2));
}

#[test]
fn unwritable_output_exits_with_export_failure() {
    let dir = workspace();
    // a regular file where the output directory should be
    std::fs::write(dir.path().join("blocked"), "").expect("write");
    let out = run(
        &dir,
        &["process", "square.txt", "--out", "blocked", "--iterations", "5", "--quiet"],
    );
    assert_eq!(out.status.code(), Some(3));
}

#[test]
fn config_file_is_honoured() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("fdlgraph.toml"),
        "[export]\ninclude_rank = false\nshow_isolated = true\n[layout]\nmax_iterations = 5\n",
    )
    .expect("write config");
    let out = run(&dir, &["process", "square.txt", "--seed", "1", "--quiet"]);
    assert!(out.status.success());
    let snap = read_json(&dir.path().join("square0-fdl.json"));
    assert!(snap["nodes"][0].get("rank").is_none());
}

#[test]
fn convert_then_inspect() {
    let dir = workspace();
    assert!(run(&dir, &["convert", "square.txt"]).status.success());
    let out = run(&dir, &["inspect", "square.csr"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("vertices  5"), "stdout: {stdout}");
    assert!(stdout.contains("edges     10"), "stdout: {stdout}");
}

#[test]
fn rank_json_lists_top_vertices() {
    let dir = workspace();
    let out = run(&dir, &["rank", "square.txt", "--top", "2", "--json"]);
    assert!(out.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("stdout is not valid JSON");
    assert_eq!(value["algorithm"], "neighbourhood");
    assert_eq!(value["top"][0]["vertex"], 3);
    assert_eq!(value["top"].as_array().map(Vec::len), Some(2));
}

#[test]
fn rank_rejects_mismatched_pagerank() {
    let dir = workspace();
    let out = run(&dir, &["rank", "square.txt", "--algorithm", "pagerank-directed"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn communities_writes_label_file() {
    let dir = workspace();
    let out = run(&dir, &["communities", "square.txt", "--seed", "4"]);
    assert!(out.status.success());
    let labels = std::fs::read(dir.path().join("square-communities.bin")).expect("labels");
    assert_eq!(labels.len(), 20);
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = workspace();
    assert!(run(&dir, &["init"]).status.success());
    assert!(dir.path().join("fdlgraph.toml").exists());
    assert!(!run(&dir, &["init"]).status.success());
}

#[test]
fn generate_writes_a_loadable_edge_list() {
    let dir = workspace();
    let args = ["generate", "--nodes", "90", "-k", "3", "--seed", "5", "--out", "gen.txt"];
    assert!(run(&dir, &args).status.success());
    let first = std::fs::read_to_string(dir.path().join("gen.txt")).expect("edge list");
    assert!(first.lines().count() > 0);

    assert!(run(&dir, &args).status.success());
    let second = std::fs::read_to_string(dir.path().join("gen.txt")).expect("edge list");
    assert_eq!(first, second);

    let out = run(&dir, &["communities", "gen.txt", "--seed", "1"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn generate_rejects_bad_probability() {
    let dir = workspace();
    let out = run(&dir, &["generate", "--p-in", "1.5", "--out", "gen.txt"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(!dir.path().join("gen.txt").exists());
}
