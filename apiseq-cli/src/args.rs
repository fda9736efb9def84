use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct VariableArgs {
    /// Override or add a sequence variable.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set_vars: Vec<String>,
    /// Pre-answer a user prompt instead of reading stdin.
    #[arg(long = "input", value_name = "KEY=VALUE")]
    pub inputs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventsMode {
    None,
    Stdout,
}

#[derive(Debug, Args, Clone)]
pub struct RunnerArgs {
    #[arg(long, value_enum, default_value_t = EventsMode::None)]
    pub events: EventsMode,
    /// Never open a browser for `launchBrowser` nodes.
    #[arg(long)]
    pub no_browser: bool,
    /// Fallback request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,
    #[arg(long, default_value_t = 10_485_760)]
    pub max_response_bytes: usize,
}
