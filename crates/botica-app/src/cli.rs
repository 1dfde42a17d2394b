use clap::Parser;

/// Botica: a terminal chat client for Gemini with voice and document export.
#[derive(Parser, Debug)]
#[command(name = "botica", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// History file path override.
    #[arg(long)]
    pub history: Option<String>,

    /// Gemini model override.
    #[arg(long)]
    pub model: Option<String>,

    /// Log level override (e.g. debug, info, warn, error, or a full filter directive).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
