//! Command dispatch, kept out of the binary so `main` stays small.

use super::{
    args::{Commands, ProcessArgs},
    handlers,
};
use crate::exit::FdlExit;
use crate::generate::PlantedPartition;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<FdlExit> {
    match command {
        Commands::Process {
            graph,
            out,
            seed,
            iterations,
            passes,
            quiet,
        } => handlers::handle_process(&ProcessArgs {
            graph,
            out,
            seed,
            iterations,
            passes,
            quiet,
        }),
        Commands::Convert { graph, out } => handlers::handle_convert(&graph, out.as_deref()),
        Commands::Rank {
            graph,
            algorithm,
            top,
            json,
        } => handlers::handle_rank(&graph, algorithm.as_deref(), top, json),
        Commands::Communities {
            graph,
            passes,
            seed,
            out,
        } => handlers::handle_communities(&graph, passes, seed, out.as_deref()),
        Commands::Inspect { file } => handlers::handle_inspect(&file),
        Commands::Init => handlers::handle_init(),
        Commands::Generate {
            nodes,
            communities,
            p_in,
            p_out,
            seed,
            out,
        } => handlers::handle_generate(
            &PlantedPartition {
                nodes,
                communities,
                p_in,
                p_out,
                seed,
            },
            &out,
        ),
    }
}
