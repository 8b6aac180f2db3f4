//! Estimate extraction and report projection.
//!
//! Extraction reads each discovered result file into a [`ResultsIndex`];
//! projection reshapes that index into the per-metric [`ProfilingReport`].

use crate::error::ProfilingError;
use crate::models::{Estimate, Metric, ProfilingReport, ResultLocation, ResultsIndex};
use serde_json::{Number, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read and parse one `estimates.json` file.
pub fn read_estimate(path: &Path) -> Result<Estimate, ProfilingError> {
    let bytes = fs::read(path).map_err(|source| ProfilingError::UnreadableResultFile {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value =
        serde_json::from_slice(&bytes).map_err(|source| ProfilingError::MalformedResultFile {
            path: path.to_path_buf(),
            source,
        })?;

    extract_estimate(path, &value)
}

/// Pull the three metrics out of a parsed result document.
pub fn extract_estimate(path: &Path, value: &Value) -> Result<Estimate, ProfilingError> {
    let field = |metric: Metric| -> Result<Number, ProfilingError> {
        let found = metric
            .pointers()
            .iter()
            .find_map(|pointer| value.pointer(pointer));

        match found {
            Some(Value::Number(n)) => Ok(n.clone()),
            _ => Err(ProfilingError::MissingMetricField {
                path: path.to_path_buf(),
                field: metric.field(),
            }),
        }
    };

    Ok(Estimate {
        mean: field(Metric::Mean)?,
        lower: field(Metric::Lower)?,
        upper: field(Metric::Upper)?,
    })
}

/// Read every location into an index. The first failure aborts.
///
/// A later location for an already indexed (group, case) replaces the
/// earlier one.
pub fn build_index<I>(locations: I) -> Result<ResultsIndex, ProfilingError>
where
    I: IntoIterator<Item = ResultLocation>,
{
    let mut index = ResultsIndex::new();

    for location in locations {
        let estimate = read_estimate(&location.path)?;
        debug!(
            "{}/{}: mean={} [{}, {}]",
            location.group, location.case, estimate.mean, estimate.lower, estimate.upper
        );

        if index
            .insert(&location.group, &location.case, estimate)
            .is_some()
        {
            warn!(
                "Duplicate result for {}/{}; using {}",
                location.group,
                location.case,
                location.path.display()
            );
        }
    }

    Ok(index)
}

/// Reshape the index into group → metric → case.
pub fn project(index: &ResultsIndex) -> ProfilingReport {
    let mut report = ProfilingReport::new();

    for (group, cases) in index.groups() {
        for (case, estimate) in cases {
            for metric in Metric::ALL {
                report.insert(group, metric, case, estimate.value(metric).clone());
            }
        }
    }

    report
}
