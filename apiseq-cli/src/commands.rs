use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute every node of a sequence in order.
    Run {
        path: PathBuf,
        /// Skip nodes before this zero-based index.
        #[arg(long, default_value_t = 0)]
        start_step: usize,
        #[command(flatten)]
        variables: VariableArgs,
        #[command(flatten)]
        runner: RunnerArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Parse and validate a sequence without running it.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the nodes of a sequence.
    Nodes {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}
