//! CSV loading for the command line.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use health_facade::{AnalysisConfig, Table};

use crate::CliResult;

/// Load a CSV file with a header row into a [`Table`].
///
/// Rows may have differing lengths here; the table constructor reports
/// ragged rows with their position.
pub fn load_csv_table(path: &Path) -> CliResult<Table> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| format!("Failed to read headers: {}", e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| format!("Failed to read record: {}", e))?;
        // Fully blank lines carry no observation.
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Table::from_string_rows(headers, rows).map_err(|e| e.to_string())
}

/// Load a JSON-serialized [`AnalysisConfig`]. Missing fields take defaults.
pub fn load_config(path: &Path) -> CliResult<AnalysisConfig> {
    let file = File::open(path).map_err(|e| format!("Failed to open config: {}", e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse config: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_facade::{Cell, Polarity};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv_table() {
        let file = write_temp("date,steps,mood\n2024-01-01, 8000 ,good\n2024-01-02,,ok\n");
        let table = load_csv_table(file.path()).unwrap();

        assert_eq!(table.columns(), &["date", "steps", "mood"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0][1], Cell::Number(8000.0));
        assert!(table.rows()[1][1].is_missing());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let file = write_temp("date,steps\n2024-01-01,8000\n,\n2024-01-02,8100\n");
        let table = load_csv_table(file.path()).unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_ragged_row_is_reported() {
        let file = write_temp("date,steps\n2024-01-01,8000\n2024-01-02,8100,extra\n");
        let error = load_csv_table(file.path()).unwrap_err();
        assert!(error.contains("row 1"), "{}", error);
    }

    #[test]
    fn test_missing_file() {
        let error = load_csv_table(Path::new("/nonexistent/health.csv")).unwrap_err();
        assert!(error.starts_with("Failed to open file"));
    }

    #[test]
    fn test_load_partial_config() {
        let file = write_temp(
            r#"{"anomaly": {"threshold": 3.0}, "polarity": {"metrics": {"weight": "lower_is_better"}}}"#,
        );
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.anomaly.threshold, 3.0);
        assert_eq!(config.anomaly.window, 7);
        assert_eq!(config.rolling.long_window, Some(30));
        assert_eq!(config.polarity.get("weight"), Some(Polarity::LowerIsBetter));
        assert_eq!(config.polarity.get("steps"), Some(Polarity::HigherIsBetter));
    }

    #[test]
    fn test_malformed_config() {
        let file = write_temp("{ not json");
        let error = load_config(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config"));
    }
}
