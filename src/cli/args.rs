use crate::generate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fdlgraph",
    version,
    about = "Community detection, ranking and force-directed layout for large graphs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    /// Log at debug level (overrides `RUST_LOG`)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Input graph shared by every command that loads one.
#[derive(Args, Debug, Clone)]
pub struct GraphInput {
    /// Edge list (`u v` per line) or a binary `.csr` export
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// Treat each line as a one-way edge
    #[arg(long)]
    pub directed: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect communities, lay out the graph and write every export
    Process {
        #[command(flatten)]
        graph: GraphInput,
        /// Directory for output files
        #[arg(long, short, value_name = "DIR", default_value = ".")]
        out: PathBuf,
        /// Seed for both label propagation and layout
        #[arg(long)]
        seed: Option<u64>,
        /// Layout iteration budget
        #[arg(long)]
        iterations: Option<usize>,
        /// Label propagation pass budget
        #[arg(long)]
        passes: Option<usize>,
        /// Suppress the progress bar
        #[arg(long, short)]
        quiet: bool,
    },
    /// Convert a text edge list to the binary CSR format
    Convert {
        #[command(flatten)]
        graph: GraphInput,
        /// Output file (defaults to the input with a `.csr` extension)
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Score vertices and print the highest ranked
    Rank {
        #[command(flatten)]
        graph: GraphInput,
        /// neighbourhood, pagerank-directed, pagerank-undirected
        #[arg(long, short)]
        algorithm: Option<String>,
        /// How many vertices to print
        #[arg(long, default_value = "10")]
        top: usize,
        #[arg(long)]
        json: bool,
    },
    /// Run label propagation and write the community labels
    Communities {
        #[command(flatten)]
        graph: GraphInput,
        #[arg(long)]
        passes: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Output file (defaults to `<stem>-communities.bin`)
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Print the header and degree summary of a binary graph
    Inspect {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Write a default `fdlgraph.toml` to the working directory
    Init,
    /// Write a random edge list with planted communities
    Generate {
        #[arg(long, short, default_value_t = generate::DEFAULT_NODES)]
        nodes: usize,
        /// Number of equally sized vertex blocks
        #[arg(long, short = 'k', default_value_t = generate::DEFAULT_COMMUNITIES)]
        communities: usize,
        /// Edge probability inside a block
        #[arg(long, default_value_t = generate::DEFAULT_P_IN)]
        p_in: f64,
        /// Edge probability between blocks
        #[arg(long, default_value_t = generate::DEFAULT_P_OUT)]
        p_out: f64,
        #[arg(long, short, default_value_t = generate::DEFAULT_SEED)]
        seed: u64,
        #[arg(long, short, value_name = "FILE", default_value = "graph.txt")]
        out: PathBuf,
    },
}

/// Overrides `process` applies on top of the loaded config.
#[derive(Debug, Clone)]
pub struct ProcessArgs {
    pub graph: GraphInput,
    pub out: PathBuf,
    pub seed: Option<u64>,
    pub iterations: Option<usize>,
    pub passes: Option<usize>,
    pub quiet: bool,
}
