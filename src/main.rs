//! benchcollate - criterion benchmark collator
//!
//! Scans a criterion results tree for `estimates.json` files of one profile
//! and writes a single report mapping each benchmark group to its mean,
//! lower and upper estimates per case.
//!
//! Exit codes:
//!   0 - Success (including when no results were found)
//!   1 - Invalid arguments, unreadable or malformed results, or write failure

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod report;
mod scanner;

use anyhow::{Context, Result};
use cli::Args;
use config::Config;
use scanner::{ResultScanner, ScanConfig};
use std::io::IsTerminal;
use tracing::{debug, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("benchcollate v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .benchcollate.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            config::CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::CONFIG_FILE))?;

    println!("Created {} with default settings.", config::CONFIG_FILE);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr; stdout carries the run summary.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Discover, extract, project and emit.
fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args)?;
    config.merge_with_args(args);
    cli::validate_profile(&config.scan.profile).map_err(anyhow::Error::msg)?;

    let paths = config.resolve_paths();
    let scanner = ResultScanner::new(paths.results_dir.clone(), ScanConfig::from(&config.scan));

    if args.dry_run {
        return handle_dry_run(&scanner, &config.scan.profile);
    }

    info!(
        "Collating '{}' results from {}",
        config.scan.profile,
        paths.results_dir.display()
    );

    let index = analysis::build_index(scanner.discover())?;
    if index.is_empty() {
        warn!("No '{}' results found; writing an empty report", config.scan.profile);
    }
    let report = analysis::project(&index);

    let content = report::render_report(&report, config.report.format)?;
    report::write_report(&content, &paths.output)?;

    if !args.quiet {
        println!(
            "Collated {} results in {} groups into {}",
            index.len(),
            index.group_count(),
            paths.output.display()
        );
    }

    Ok(())
}

/// Handle --dry-run: list discovered result files without reading them.
fn handle_dry_run(scanner: &ResultScanner, profile: &str) -> Result<()> {
    let locations: Vec<_> = scanner.discover().collect();

    if locations.is_empty() {
        println!(
            "No '{}' results found under {}",
            profile,
            scanner.results_root().display()
        );
        return Ok(());
    }

    for location in &locations {
        println!(
            "{}/{}\t{}",
            location.group,
            location.case,
            location.path.display()
        );
    }
    println!("Total: {} result files", locations.len());

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// A config file that exists but cannot be read or parsed is fatal.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default()? {
        Some(config) => {
            info!("Loaded default config from {}", config::CONFIG_FILE);
            Ok(config)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
