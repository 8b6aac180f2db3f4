//! Fatal error conditions of a profiling run.
//!
//! Every variant aborts the run. A missing results root is not an error and
//! has no variant here; discovery simply yields nothing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while extracting estimates or emitting the report.
#[derive(Error, Debug)]
pub enum ProfilingError {
    #[error("Failed to read result file {}", .path.display())]
    UnreadableResultFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Result file {} is not valid JSON", .path.display())]
    MalformedResultFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Result file {} is missing numeric field `{field}`", .path.display())]
    MissingMetricField { path: PathBuf, field: &'static str },

    #[error("Failed to write report to {}", .path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report")]
    Serialize(#[from] serde_json::Error),
}
