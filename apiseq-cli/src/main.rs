use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "apiseq", version, about = "Run declarative HTTP request sequences")]
struct Cli {
    /// Log substitutions and request/response detail.
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command, cli.debug));
    std::process::exit(exit_code);
}

fn init_tracing(debug: bool) {
    let default = if debug { "warn,apiseq_exec=debug,apiseq_cli=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run_command(command: Command, debug: bool) -> i32 {
    match command {
        Command::Run {
            path,
            start_step,
            variables,
            runner,
            output,
        } => cmd::run::run_cmd(&path, start_step, variables, runner, debug, output).await,
        Command::Validate { path, output } => cmd::validate::validate_cmd(&path, output).await,
        Command::Nodes { path, output } => cmd::nodes::nodes_cmd(&path, output).await,
    }
}
