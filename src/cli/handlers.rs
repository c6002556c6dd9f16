// src/cli/handlers.rs
use crate::cli::args::{GraphInput, ProcessArgs};
use crate::community::LabelPropagation;
use crate::config::{Config, CONFIG_FILE};
use crate::error::{ExportError, FdlError};
use crate::exit::FdlExit;
use crate::export::{binary, json, OutputPaths};
use crate::generate::{self, PlantedPartition};
use crate::graph::{Graph, GraphType};
use crate::ingest;
use crate::layout::Layout;
use crate::progress::ProgressBar;
use crate::rank::{self, RankingAlgorithm};
use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

fn load_config() -> Result<Config> {
    let config = Config::load().map_err(FdlError::from)?;
    Ok(config)
}

fn load_graph(input: &GraphInput, config: &Config) -> Result<Graph> {
    let options = config.ingest_options(GraphType::from_directed(input.directed));
    let graph = ingest::load(&input.input, options)
        .with_context(|| format!("failed to load graph from {}", input.input.display()))?;
    Ok(graph)
}

fn print_graph_summary(graph: &Graph) {
    println!(
        "{} {} vertices, {} edges ({})",
        "graph".cyan().bold(),
        graph.vertex_count(),
        graph.edge_count(),
        graph.graph_type()
    );
}

fn label_propagation(config: &Config) -> LabelPropagation {
    let lp = &config.labelprop;
    let engine = match lp.seed {
        Some(seed) => LabelPropagation::seeded(lp.max_passes, seed),
        None => LabelPropagation::new(lp.max_passes),
    };
    engine.stop_when_stable(lp.stop_when_stable)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Exports written and failed during one `process` run.
#[derive(Default)]
struct ExportLog {
    written: Vec<PathBuf>,
    failed: Vec<ExportError>,
}

impl ExportLog {
    fn record(&mut self, path: &Path, result: std::result::Result<(), ExportError>) {
        match result {
            Ok(()) => {
                debug!(path = %path.display(), "export written");
                self.written.push(path.to_path_buf());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "export failed");
                self.failed.push(e);
            }
        }
    }
}

/// Handles the process command: ingest, communities, layout, exports.
///
/// A failed export does not stop the run. Every remaining export is still
/// attempted and the command exits with [`FdlExit::ExportFailure`].
///
/// # Errors
/// Returns error if the config or graph is invalid or the layout cannot start.
pub fn handle_process(args: &ProcessArgs) -> Result<FdlExit> {
    let mut config = load_config()?;
    if let Some(seed) = args.seed {
        config.layout.seed = Some(seed);
        config.labelprop.seed = Some(seed);
    }
    if let Some(iterations) = args.iterations {
        config.layout.max_iterations = iterations;
    }
    if let Some(passes) = args.passes {
        config.labelprop.max_passes = passes;
    }
    if args.quiet {
        config.preferences.progress_bars = false;
    }
    config.validate().map_err(FdlError::from)?;

    let mut graph = load_graph(&args.graph, &config)?;
    print_graph_summary(&graph);

    let report = label_propagation(&config).run(&mut graph);
    println!(
        "{} {} communities after {} passes{}",
        "labels".cyan().bold(),
        graph.community_count(),
        report.passes_run,
        if report.converged { " (stable)" } else { "" }
    );

    let ranks = if config.export.include_rank {
        let scores = rank::rank(&graph, config.ranking.algorithm, config.pagerank_params())
            .map_err(FdlError::from)?;
        Some(scores)
    } else {
        None
    };

    let mut log = ExportLog::default();
    if let Err(e) = fs::create_dir_all(&args.out) {
        log.record(&args.out, Err(ExportError::io(e, &args.out)));
    }
    let paths = OutputPaths::for_input(&args.graph.input, &args.out);
    let options = config.snapshot_options();

    let mut layout = Layout::new(&graph, config.layout_params()).map_err(FdlError::from)?;
    info!(seed = layout.seed(), k = layout.k(), "layout started");
    let initial = layout.snapshot(options, ranks.as_deref());
    log.record(
        &paths.initial_snapshot,
        json::write_snapshot(&paths.initial_snapshot, &initial),
    );

    let mut bar = ProgressBar::start(
        "layout",
        layout.max_iterations(),
        config.preferences.progress_bars,
    );
    layout.run_with(|stats| {
        bar.update(stats.iteration, &format!("t={:.3}", stats.next_temperature));
    });
    bar.finish(true);
    println!(
        "{} {} iterations, seed {}",
        "layout".cyan().bold(),
        layout.iteration(),
        layout.seed()
    );

    let last = layout.snapshot(options, ranks.as_deref());
    log.record(
        &paths.final_snapshot,
        json::write_snapshot(&paths.final_snapshot, &last),
    );
    log.record(
        &paths.communities,
        binary::write_communities_file(&paths.communities, graph.communities()),
    );
    if same_file(&paths.graph, &args.graph.input) {
        debug!(path = %paths.graph.display(), "input is already the binary export");
    } else {
        log.record(&paths.graph, binary::write_graph_file(&paths.graph, &graph));
    }

    for path in &log.written {
        println!("   {} {}", "wrote".green(), path.display());
    }
    if log.failed.is_empty() {
        return Ok(FdlExit::Success);
    }
    for e in &log.failed {
        eprintln!("   {} {e}", "failed".red().bold());
    }
    Ok(FdlExit::ExportFailure)
}

/// Handles the convert command.
///
/// # Errors
/// Returns error if the input cannot be loaded or the output not written.
pub fn handle_convert(input: &GraphInput, out: Option<&Path>) -> Result<FdlExit> {
    let target = out.map_or_else(
        || input.input.with_extension(ingest::BINARY_EXTENSION),
        Path::to_path_buf,
    );
    if same_file(&target, &input.input) {
        anyhow::bail!("refusing to overwrite {} with itself", target.display());
    }

    let config = load_config()?;
    let graph = load_graph(input, &config)?;
    print_graph_summary(&graph);
    binary::write_graph_file(&target, &graph).map_err(FdlError::from)?;
    println!("   {} {}", "wrote".green(), target.display());
    Ok(FdlExit::Success)
}

/// Handles the rank command.
///
/// # Errors
/// Returns error if the algorithm is unknown, does not fit the graph, or is
/// not implemented.
pub fn handle_rank(
    input: &GraphInput,
    algorithm: Option<&str>,
    top: usize,
    json: bool,
) -> Result<FdlExit> {
    let config = load_config()?;
    let algorithm = match algorithm {
        Some(name) => name.parse::<RankingAlgorithm>().map_err(FdlError::from)?,
        None => config.ranking.algorithm,
    };

    let graph = load_graph(input, &config)?;
    let scores =
        rank::rank(&graph, algorithm, config.pagerank_params()).map_err(FdlError::from)?;
    let ranked: Vec<_> = rank::ranked_vertices(&scores).into_iter().take(top).collect();

    if json {
        let rows: Vec<_> = ranked
            .iter()
            .map(|&(vertex, score)| serde_json::json!({ "vertex": vertex, "score": score }))
            .collect();
        let payload = serde_json::json!({ "algorithm": algorithm.name(), "top": rows });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(FdlExit::Success);
    }

    print_graph_summary(&graph);
    println!("{} {}", "rank".cyan().bold(), algorithm);
    for (position, (vertex, score)) in ranked.iter().enumerate() {
        println!("   {:>3}. vertex {vertex:<8} {score:.6}", position + 1);
    }
    Ok(FdlExit::Success)
}

/// Handles the communities command.
///
/// # Errors
/// Returns error if the graph cannot be loaded or the labels not written.
pub fn handle_communities(
    input: &GraphInput,
    passes: Option<usize>,
    seed: Option<u64>,
    out: Option<&Path>,
) -> Result<FdlExit> {
    let mut config = load_config()?;
    if let Some(passes) = passes {
        config.labelprop.max_passes = passes;
    }
    if seed.is_some() {
        config.labelprop.seed = seed;
    }

    let mut graph = load_graph(input, &config)?;
    print_graph_summary(&graph);
    let report = label_propagation(&config).run(&mut graph);

    let mut sizes: HashMap<u32, usize> = HashMap::new();
    for &label in graph.communities() {
        *sizes.entry(label).or_default() += 1;
    }
    let largest = sizes.values().copied().max().unwrap_or(0);
    println!(
        "{} {} communities, largest {largest}, {} passes{}",
        "labels".cyan().bold(),
        sizes.len(),
        report.passes_run,
        if report.converged { " (stable)" } else { "" }
    );

    let target = out.map_or_else(
        || OutputPaths::for_input(&input.input, Path::new(".")).communities,
        Path::to_path_buf,
    );
    binary::write_communities_file(&target, graph.communities()).map_err(FdlError::from)?;
    println!("   {} {}", "wrote".green(), target.display());
    Ok(FdlExit::Success)
}

/// Handles the inspect command.
///
/// # Errors
/// Returns error if the file is not a valid binary graph.
pub fn handle_inspect(path: &Path) -> Result<FdlExit> {
    let file = File::open(path).map_err(|e| FdlError::io(e, path))?;
    let header = binary::read_header(&mut BufReader::new(file))
        .with_context(|| format!("failed to read header of {}", path.display()))?;
    println!("{} {}", "file".cyan().bold(), path.display());
    println!("   type      {}", header.graph_type);
    println!("   version   {}", header.version);
    println!("   vertices  {}", header.vertex_count);
    println!("   edges     {}", header.edge_count);

    let graph = binary::read_graph_file(path)
        .with_context(|| format!("failed to read graph from {}", path.display()))?;
    let degrees = graph.degrees();
    let min = degrees.iter().copied().min().unwrap_or(0);
    let max = degrees.iter().copied().max().unwrap_or(0);
    #[allow(clippy::cast_precision_loss)]
    let mean = if degrees.is_empty() {
        0.0
    } else {
        graph.edge_count() as f64 / degrees.len() as f64
    };
    let isolated = graph.vertices().filter(|&v| graph.is_isolated(v)).count();
    println!("   degree    min {min}, max {max}, mean {mean:.2}");
    println!("   isolated  {isolated}");
    Ok(FdlExit::Success)
}

/// Handles the init command.
///
/// # Errors
/// Returns error if the config file cannot be written.
pub fn handle_init() -> Result<FdlExit> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() {
        eprintln!("{} {CONFIG_FILE} already exists", "skipped".yellow());
        return Ok(FdlExit::Error);
    }
    Config::new().save(path).map_err(FdlError::from)?;
    println!("   {} {CONFIG_FILE}", "wrote".green());
    Ok(FdlExit::Success)
}

/// Handles the generate command.
///
/// # Errors
/// Returns error if the parameters are invalid or the file not written.
pub fn handle_generate(params: &PlantedPartition, out: &Path) -> Result<FdlExit> {
    let edges = params.generate().map_err(FdlError::from)?;
    generate::write_edge_list_file(out, &edges).map_err(FdlError::from)?;
    println!(
        "{} {} edges over {} vertices in {} communities",
        "generated".cyan().bold(),
        edges.len(),
        params.nodes,
        params.communities
    );
    println!("   {} {}", "wrote".green(), out.display());
    Ok(FdlExit::Success)
}
