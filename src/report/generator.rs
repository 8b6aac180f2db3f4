//! Report rendering and emission.
//!
//! The report is rendered to a string first and then written through a
//! temporary file in the destination directory, so the destination is either
//! fully replaced or left untouched.

use crate::cli::OutputFormat;
use crate::error::ProfilingError;
use crate::models::{GroupMetrics, Metric, ProfilingReport};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Render the report in the requested format.
pub fn render_report(
    report: &ProfilingReport,
    format: OutputFormat,
) -> Result<String, ProfilingError> {
    match format {
        OutputFormat::Json => generate_json_report(report),
        OutputFormat::Markdown => Ok(generate_markdown_report(report)),
    }
}

/// Generate a JSON report with 2-space indentation.
pub fn generate_json_report(report: &ProfilingReport) -> Result<String, ProfilingError> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate a Markdown report with one table per group.
pub fn generate_markdown_report(report: &ProfilingReport) -> String {
    let mut output = String::new();

    output.push_str("# Profiling Report\n\n");

    if report.is_empty() {
        output.push_str("No benchmark results were found.\n");
        return output;
    }

    for (group, metrics) in report.groups() {
        output.push_str(&generate_group_section(group, metrics));
    }

    output
}

/// Generate the table for a single group.
fn generate_group_section(group: &str, metrics: &GroupMetrics) -> String {
    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", group));
    section.push_str("| Case | Mean | Lower | Upper |\n");
    section.push_str("|:---|---:|---:|---:|\n");

    for case in metrics.cases() {
        let cell = |metric: Metric| {
            metrics
                .metric(metric)
                .get(case)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string())
        };

        section.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            case,
            cell(Metric::Mean),
            cell(Metric::Lower),
            cell(Metric::Upper)
        ));
    }
    section.push('\n');

    section
}

/// Write rendered report content to `path`, replacing any existing file.
///
/// The parent directory must already exist. A replaced report keeps its
/// permissions; a new one gets the umask defaults of a plain file.
pub fn write_report(content: &str, path: &Path) -> Result<(), ProfilingError> {
    let failure = |source: std::io::Error| ProfilingError::OutputWriteFailure {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut file = builder.tempfile_in(parent).map_err(failure)?;
    if let Ok(existing) = fs::metadata(path) {
        file.as_file()
            .set_permissions(existing.permissions())
            .map_err(failure)?;
    }

    file.write_all(content.as_bytes()).map_err(failure)?;
    file.flush().map_err(failure)?;
    file.persist(path).map_err(|e| failure(e.error))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;
    use tempfile::TempDir;

    fn create_test_report() -> ProfilingReport {
        let mut report = ProfilingReport::new();
        let rows = [("small", 120.5, 118.0, 123.0), ("large", 980.2, 970.0, 990.0)];
        for (case, mean, lower, upper) in rows {
            for (metric, value) in [
                (Metric::Mean, mean),
                (Metric::Lower, lower),
                (Metric::Upper, upper),
            ] {
                report.insert("parse", metric, case, Number::from_f64(value).unwrap());
            }
        }
        report
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_report()).unwrap();

        assert!(json.starts_with("{\n  \"parse\": {\n    \"mean\": {"));
        assert!(json.contains("\"small\": 120.5"));
        assert!(json.contains("\"large\": 970.0"));
    }

    #[test]
    fn test_generate_json_report_empty() {
        let json = generate_json_report(&ProfilingReport::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_report());

        assert!(markdown.contains("# Profiling Report"));
        assert!(markdown.contains("## parse"));
        assert!(markdown.contains("| small | 120.5 | 118.0 | 123.0 |"));
        assert!(markdown.contains("| large | 980.2 | 970.0 | 990.0 |"));
    }

    #[test]
    fn test_generate_markdown_report_empty() {
        let markdown = generate_markdown_report(&ProfilingReport::new());
        assert!(markdown.contains("No benchmark results were found."));
    }

    #[test]
    fn test_write_report_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profiling.json");
        fs::write(&path, "stale").unwrap();

        write_report("{}", &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_write_report_missing_parent_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("profiling.json");

        let err = write_report("{}", &path).unwrap_err();
        assert!(matches!(err, ProfilingError::OutputWriteFailure { .. }));
        assert!(!dir.path().join("missing").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_report_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profiling.json");
        fs::write(&path, "stale").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_report("{}", &path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_report_new_file_uses_umask_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let reference = dir.path().join("reference.json");
        fs::write(&reference, "{}").unwrap();
        let path = dir.path().join("profiling.json");

        write_report("{}", &path).unwrap();

        let expected = fs::metadata(&reference).unwrap().permissions().mode();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, expected & 0o777);
    }
}
