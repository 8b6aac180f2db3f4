//! Report generation.

pub mod generator;

pub use generator::{render_report, write_report};
