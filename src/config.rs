//! Configuration file handling.
//!
//! This module handles loading `.benchcollate.toml`, merging it with CLI
//! arguments, and computing the default result and output paths from a root
//! directory.

use crate::cli::OutputFormat;
use crate::scanner::DEFAULT_PROFILE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE: &str = ".benchcollate.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Discovery settings.
    #[serde(default)]
    pub scan: ScanSettings,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Input and output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root directory the defaults below are computed from.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Criterion results directory (default: `<root>/target/criterion`).
    #[serde(default)]
    pub results_dir: Option<PathBuf>,

    /// Report destination (default: `<root>/target/profiling.json`).
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            results_dir: None,
            output: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSettings {
    /// Criterion profile directory to read.
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Match result files at any depth.
    #[serde(default)]
    pub recursive: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            recursive: false,
        }
    }
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,
}

/// Resolved locations for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilingPaths {
    pub results_dir: PathBuf,
    pub output: PathBuf,
}

impl ProfilingPaths {
    /// Default locations relative to a root: `target/criterion` and
    /// `target/profiling.json`.
    pub fn from_root(root: &Path) -> Self {
        let target = root.join("target");
        Self {
            results_dir: target.join("criterion"),
            output: target.join("profiling.json"),
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref root) = args.root {
            self.paths.root = root.clone();
        }
        if let Some(ref results_dir) = args.results_dir {
            self.paths.results_dir = Some(results_dir.clone());
        }
        if let Some(ref output) = args.output {
            self.paths.output = Some(output.clone());
        }

        if let Some(ref profile) = args.profile {
            self.scan.profile = profile.clone();
        }
        if args.recursive {
            self.scan.recursive = true;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
    }

    /// Resolve the results directory and output path for this run.
    pub fn resolve_paths(&self) -> ProfilingPaths {
        let defaults = ProfilingPaths::from_root(&self.paths.root);

        ProfilingPaths {
            results_dir: self
                .paths
                .results_dir
                .clone()
                .unwrap_or(defaults.results_dir),
            output: self.paths.output.clone().unwrap_or(defaults.output),
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
