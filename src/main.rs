//! footprint-gen: parametric footprint package generator
//!
//! Generates one package directory per part and keeps element UUIDs
//! stable through a CSV cache. Do not run two instances against the same
//! cache file at once.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use footprint_gen::config;
use footprint_gen::generate::generate_family;
use footprint_gen::library::{DirectoryStore, LibraryResult, UuidCache};

/// Parametric footprint package generator.
///
/// Generates footprint packages for two-terminal chip components, keeping
/// element UUIDs stable across runs.
#[derive(Parser, Debug)]
#[command(name = "footprint-gen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Output directory (overrides the configuration)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// UUID cache file (overrides the configuration)
    #[arg(long, value_name = "FILE")]
    cache: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN,
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Opens the cache, generates the library and saves the cache.
///
/// The cache is saved even when generation fails part-way, so the UUIDs
/// of packages already written stay stable.
fn run(cfg: &config::Config, output_dir: PathBuf, cache_path: &Path) -> LibraryResult<usize> {
    let mut cache = UuidCache::open(cache_path)?;
    let mut store = DirectoryStore::create(output_dir)?;

    let result = generate_family(
        &cfg.chip,
        &cfg.style,
        &mut cache,
        &mut store,
        chrono::Utc::now(),
    );

    cache.save(cache_path)?;

    Ok(result?.len())
}

/// Entry point for footprint-gen.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    let output_dir = args.output.unwrap_or_else(|| cfg.output_dir.clone());
    let cache_path = args.cache.unwrap_or_else(|| cfg.uuid_cache.clone());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        output = %output_dir.display(),
        cache = %cache_path.display(),
        parts = cfg.chip.parts.len(),
        "Starting footprint-gen"
    );

    match run(&cfg, output_dir, &cache_path) {
        Ok(count) => {
            info!(count, "Done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Generation failed");
            ExitCode::FAILURE
        }
    }
}
