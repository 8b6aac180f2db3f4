//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Values left unset here fall back to the
//! configuration file and then to the built-in defaults.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// benchcollate - collate criterion benchmark estimates
///
/// Finds every `<group>/<case>/<profile>/estimates.json` written by criterion
/// and joins the mean and its confidence interval into a single report.
///
/// Examples:
///   benchcollate
///   benchcollate --profile new --output target/new.json
///   benchcollate --root ../lexical-benchmark --format markdown -o report.md
///   benchcollate --dry-run
///   benchcollate --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Output file path for the report
    ///
    /// Defaults to <root>/target/profiling.json. The parent directory must exist.
    #[arg(short, long, alias = "output-file", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Name of the criterion profile to load results from
    ///
    /// Criterion saves the last run as "base" and the current run as "new".
    #[arg(short, long, value_name = "NAME", env = "BENCHCOLLATE_PROFILE")]
    pub profile: Option<String>,

    /// Root directory the default paths are computed from
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Criterion results directory
    ///
    /// Defaults to <root>/target/criterion.
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Match result files at any depth below the results directory
    #[arg(long)]
    pub recursive: bool,

    /// Output format (json, markdown)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .benchcollate.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Dry run: list the result files that would be collated and exit
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .benchcollate.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// Markdown format
    Markdown,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref profile) = self.profile {
            validate_profile(profile)?;
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// A profile names a single directory level.
pub fn validate_profile(profile: &str) -> Result<(), String> {
    if profile.is_empty() {
        return Err("Profile name must not be empty".to_string());
    }
    if profile.contains(['/', '\\']) || profile == "." || profile == ".." {
        return Err(format!("Invalid profile name: {}", profile));
    }
    Ok(())
}
