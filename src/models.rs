//! Data models for the profiling collator.
//!
//! This module contains the structures that flow through a run: discovered
//! result locations, the estimates read from them, the per-case index and the
//! final per-metric report.

use serde::Serialize;
use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A discovered `estimates.json` file and the benchmark it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLocation {
    /// Benchmark group (directory two levels above the profile directory).
    pub group: String,
    /// Benchmark case within the group.
    pub case: String,
    /// Full path to the estimates file.
    pub path: PathBuf,
}

/// The statistic reported for each benchmark case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    /// Mean point estimate
    Mean,
    /// Lower bound of the mean's confidence interval
    Lower,
    /// Upper bound of the mean's confidence interval
    Upper,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Metric {
    /// All metrics, in report order.
    pub const ALL: [Metric; 3] = [Metric::Mean, Metric::Lower, Metric::Upper];

    /// Key used for this metric in the report.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Mean => "mean",
            Metric::Lower => "lower",
            Metric::Upper => "upper",
        }
    }

    /// Dotted field path in criterion's `estimates.json`.
    pub fn field(&self) -> &'static str {
        match self {
            Metric::Mean => "mean.point_estimate",
            Metric::Lower => "mean.confidence_interval.lower_bound",
            Metric::Upper => "mean.confidence_interval.upper_bound",
        }
    }

    /// JSON pointers for the field, criterion's spelling first, then camelCase.
    pub fn pointers(&self) -> [&'static str; 2] {
        match self {
            Metric::Mean => ["/mean/point_estimate", "/mean/pointEstimate"],
            Metric::Lower => [
                "/mean/confidence_interval/lower_bound",
                "/mean/confidenceInterval/lowerBound",
            ],
            Metric::Upper => [
                "/mean/confidence_interval/upper_bound",
                "/mean/confidenceInterval/upperBound",
            ],
        }
    }
}

/// The three numbers kept from one result file.
///
/// Values keep the JSON number form they were read in, so an integer
/// estimate is written back as an integer.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub mean: Number,
    pub lower: Number,
    pub upper: Number,
}

impl Estimate {
    /// Value of a single metric.
    pub fn value(&self, metric: Metric) -> &Number {
        match metric {
            Metric::Mean => &self.mean,
            Metric::Lower => &self.lower,
            Metric::Upper => &self.upper,
        }
    }
}

/// Estimates keyed by group, then case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsIndex {
    groups: BTreeMap<String, BTreeMap<String, Estimate>>,
}

impl ResultsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an estimate, returning the one it replaced, if any.
    pub fn insert(&mut self, group: &str, case: &str, estimate: Estimate) -> Option<Estimate> {
        self.groups
            .entry(group.to_string())
            .or_default()
            .insert(case.to_string(), estimate)
    }

    #[allow(dead_code)] // Lookup utility for callers inspecting the index
    pub fn get(&self, group: &str, case: &str) -> Option<&Estimate> {
        self.groups.get(group).and_then(|cases| cases.get(case))
    }

    /// Iterate over groups and their cases, in key order.
    pub fn groups(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Estimate>)> {
        self.groups.iter()
    }

    /// Number of groups.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of (group, case) entries.
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Per-metric case values for one group.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GroupMetrics {
    pub mean: BTreeMap<String, Number>,
    pub lower: BTreeMap<String, Number>,
    pub upper: BTreeMap<String, Number>,
}

impl GroupMetrics {
    pub fn metric(&self, metric: Metric) -> &BTreeMap<String, Number> {
        match metric {
            Metric::Mean => &self.mean,
            Metric::Lower => &self.lower,
            Metric::Upper => &self.upper,
        }
    }

    pub fn metric_mut(&mut self, metric: Metric) -> &mut BTreeMap<String, Number> {
        match metric {
            Metric::Mean => &mut self.mean,
            Metric::Lower => &mut self.lower,
            Metric::Upper => &mut self.upper,
        }
    }

    /// Case names present in this group.
    pub fn cases(&self) -> impl Iterator<Item = &String> {
        self.mean.keys()
    }
}

/// The emitted report: group → metric → case → value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProfilingReport {
    groups: BTreeMap<String, GroupMetrics>,
}

impl ProfilingReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `report[group][metric][case] = value`.
    pub fn insert(&mut self, group: &str, metric: Metric, case: &str, value: Number) {
        self.groups
            .entry(group.to_string())
            .or_default()
            .metric_mut(metric)
            .insert(case.to_string(), value);
    }

    #[allow(dead_code)] // Lookup utility for callers inspecting the report
    pub fn get(&self, group: &str, metric: Metric, case: &str) -> Option<&Number> {
        self.groups
            .get(group)
            .and_then(|g| g.metric(metric).get(case))
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &GroupMetrics)> {
        self.groups.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
