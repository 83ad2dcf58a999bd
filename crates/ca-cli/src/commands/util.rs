//! Shared utilities for CLI commands.

use std::path::Path;

use anyhow::{Context, Result, bail};
use ca_core::Series;

/// Placeholder for values that cannot be rendered.
pub const MISSING: &str = "--";

/// Reads and parses a record file.
///
/// Only `.csv` files are accepted.
pub fn load_series(path: &Path) -> Result<Series> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        bail!("{} is not a CSV file", path.display());
    }

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let series =
        ca_core::parse(&raw).with_context(|| format!("failed to load {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        samples = series.len(),
        dual_channel = series.is_dual_channel(),
        "loaded current record"
    );
    Ok(series)
}

/// File name for display, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_csv_record() {
        let temp = tempfile::tempdir().unwrap();
        let path = fixtures::write_dual(temp.path());
        let series = load_series(&path).unwrap();
        assert_eq!(series.len(), 4);
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let temp = tempfile::tempdir().unwrap();
        let path = fixtures::write_dual(temp.path());
        let upper = temp.path().join("RUN.CSV");
        std::fs::rename(&path, &upper).unwrap();
        assert!(load_series(&upper).is_ok());
    }

    #[test]
    fn rejects_non_csv_files() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("run.txt");
        std::fs::write(&path, "irrelevant").unwrap();
        let err = load_series(&path).unwrap_err();
        assert!(err.to_string().ends_with("run.txt is not a CSV file"));
    }

    #[test]
    fn parse_failure_names_file_and_rule() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("bad.csv");
        std::fs::write(&path, "Timestamp, Value\n1, 2\n3, 4\n").unwrap();
        let err = load_series(&path).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("bad.csv"), "{chain}");
        assert!(chain.contains("incorrect file header format"), "{chain}");
    }

    #[test]
    fn display_name_strips_directories() {
        assert_eq!(display_name(Path::new("/data/logs/run.csv")), "run.csv");
    }
}
