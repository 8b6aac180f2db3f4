//! Discovery of criterion result files.
//!
//! Criterion writes one `estimates.json` per benchmark and profile under
//! `<results_root>/<group>/<case>/<profile>/`. This module walks the results
//! root and yields a [`ResultLocation`] for every file of that shape.

use crate::models::ResultLocation;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// File name criterion uses for its point estimates.
pub const ESTIMATES_FILE: &str = "estimates.json";

/// Default profile (criterion's saved baseline).
pub const DEFAULT_PROFILE: &str = "base";

/// Depth of `<group>/<case>/<profile>/estimates.json` below the results root.
const RESULT_DEPTH: usize = 4;

/// Configuration for result discovery.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Profile directory to select (e.g. "base", "new").
    pub profile: String,
    /// Match the result shape at any depth instead of directly under the root.
    pub recursive: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            profile: DEFAULT_PROFILE.to_string(),
            recursive: false,
        }
    }
}

impl From<&crate::config::ScanSettings> for ScanConfig {
    fn from(settings: &crate::config::ScanSettings) -> Self {
        Self {
            profile: settings.profile.clone(),
            recursive: settings.recursive,
        }
    }
}

/// Scanner over a criterion results tree.
pub struct ResultScanner {
    config: ScanConfig,
    results_root: PathBuf,
}

impl ResultScanner {
    /// Create a new result scanner.
    pub fn new(results_root: PathBuf, config: ScanConfig) -> Self {
        Self {
            config,
            results_root,
        }
    }

    pub fn results_root(&self) -> &Path {
        &self.results_root
    }

    /// Lazily discover every result file for the configured profile.
    ///
    /// A missing results root yields nothing. Entries are visited in file
    /// name order, so repeated scans of the same tree agree on ordering.
    /// Symbolic links are followed; link loops are skipped.
    pub fn discover(&self) -> impl Iterator<Item = ResultLocation> + '_ {
        let walker = if self.results_root.is_dir() {
            let mut walker = WalkDir::new(&self.results_root)
                .min_depth(RESULT_DEPTH)
                .follow_links(true)
                .sort_by_file_name();
            if !self.config.recursive {
                walker = walker.max_depth(RESULT_DEPTH);
            }
            Some(walker)
        } else {
            info!(
                "Results root {} does not exist; no benchmarks to collate",
                self.results_root.display()
            );
            None
        };

        walker
            .into_iter()
            .flat_map(|walker| walker.into_iter())
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_file() => self.match_location(entry.path()),
                Ok(_) => None,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
    }

    /// Map a path under the results root to a result location, if it has the
    /// expected shape.
    pub fn match_location(&self, path: &Path) -> Option<ResultLocation> {
        let relative = path.strip_prefix(&self.results_root).ok()?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => match name.to_str() {
                    Some(name) => segments.push(name),
                    None => {
                        debug!("Skipping non UTF-8 path: {}", path.display());
                        return None;
                    }
                },
                _ => return None,
            }
        }

        let depth = segments.len();
        if depth < RESULT_DEPTH || (!self.config.recursive && depth != RESULT_DEPTH) {
            return None;
        }

        let tail = &segments[depth - RESULT_DEPTH..];
        if tail[3] != ESTIMATES_FILE || tail[2] != self.config.profile {
            return None;
        }

        debug!("Found result {}/{} at {}", tail[0], tail[1], path.display());

        Some(ResultLocation {
            group: tail[0].to_string(),
            case: tail[1].to_string(),
            path: path.to_path_buf(),
        })
    }
}
