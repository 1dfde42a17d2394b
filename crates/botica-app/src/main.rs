mod app_state;
mod cli;
mod commands;

use std::path::{Path, PathBuf};

use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use botica_config::BoticaConfig;

/// Load environment variables from a .env file (KEY=VALUE lines).
///
/// Variables already set in the environment win.
fn load_dotenv() {
    let mut candidates = vec![PathBuf::from(".env")];
    if let Ok(dir) = botica_platform::config_dir() {
        candidates.push(dir.join(".env"));
    }

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in parse_dotenv(&contents) {
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
            return;
        }
    }
}

fn parse_dotenv(contents: &str) -> Vec<(&str, &str)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim();
            let key = key.strip_prefix("export ").map(str::trim).unwrap_or(key);
            (key, value.trim().trim_matches('"').trim_matches('\''))
        })
        .collect()
}

fn init_logging(directive: &str) {
    let directive: Directive = directive
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .with_writer(std::io::stderr)
        .init();
}

/// A bare level like `debug` applies to botica crates only; anything else is
/// taken as a full filter directive.
fn log_directive(level: &str) -> String {
    match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            format!("botica={}", level.to_ascii_lowercase())
        }
        _ => level.to_string(),
    }
}

fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("botica-worker")
        .build()
}

fn main() {
    // .env is applied while the process is still single-threaded.
    load_dotenv();

    let runtime = match build_runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("botica: failed to start async runtime: {e}");
            std::process::exit(1);
        }
    };
    runtime.block_on(run());
}

async fn run() {
    let args = cli::parse();

    // Config first: it carries the default log level
    let config_path = args.config.as_deref().map(Path::new);
    let loaded = botica_config::load_config(config_path);

    let directive = match (&args.log_level, &loaded) {
        (Some(level), _) => log_directive(level),
        (None, Ok(config)) => config.logging.level.directive().to_string(),
        (None, Err(_)) => botica_config::schema::LogLevel::default()
            .directive()
            .to_string(),
    };
    init_logging(&directive);

    tracing::info!("Botica v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {path}");
    }
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        BoticaConfig::default()
    });
    if let Some(ref model) = args.model {
        config.gemini.model = model.clone();
    }
    tracing::info!("Config loaded (model: {})", config.gemini.model);

    if args.print_config {
        println!("{}", botica_config::config_to_json(&config));
        return;
    }

    // Ensure platform directories exist
    if let Err(e) = botica_platform::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let app = match app_state::ChatApp::from_config(config, &args) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = app.run().await {
        tracing::error!("Chat loop error: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
