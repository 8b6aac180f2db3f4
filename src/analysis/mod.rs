//! Analysis modules.
//!
//! Turns discovered result files into the collated profiling report.

pub mod aggregator;

pub use aggregator::*;
