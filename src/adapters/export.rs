//! Export target selection: spreadsheet first, CSV fallback.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::adapters::csv_export_adapter::CsvExporter;
use crate::domain::error::HitscanError;
use crate::domain::report::ExportRow;
use crate::ports::export_port::ExportPort;

fn preferred_extension() -> &'static str {
    if cfg!(feature = "xlsx") { "xlsx" } else { "csv" }
}

/// Default export file name for a scan window.
pub fn default_export_name(start_date: NaiveDate, end_date: NaiveDate) -> PathBuf {
    PathBuf::from(format!(
        "t4_hits_{}_{}.{}",
        start_date,
        end_date,
        preferred_extension()
    ))
}

/// Writes the export table, returning the path actually written. A `.csv`
/// target goes straight to CSV. Anything else tries the spreadsheet writer
/// and falls back to CSV beside it (extension swapped) when the
/// spreadsheet fails or the binary was built without it.
pub fn export_table(rows: &[ExportRow], output_path: &Path) -> Result<PathBuf, HitscanError> {
    if output_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    {
        CsvExporter.write(rows, output_path)?;
        return Ok(output_path.to_path_buf());
    }

    #[cfg(feature = "xlsx")]
    if crate::adapters::xlsx_export_adapter::XlsxExporter
        .write(rows, output_path)
        .is_ok()
    {
        return Ok(output_path.to_path_buf());
    }

    let fallback = output_path.with_extension("csv");
    CsvExporter.write(rows, &fallback)?;
    Ok(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn one_row() -> Vec<ExportRow> {
        vec![ExportRow {
            pair: "ETHUSDT".to_string(),
            entry: 2000.0,
            target4: 2500.0,
            gain_percent: 25.0,
            duration_minutes: 180.0,
            signal_time: "2024-05-01 10:00:00".to_string(),
            hit_time: "2024-05-01 13:00:00".to_string(),
        }]
    }

    #[test]
    fn default_name_covers_the_window() {
        let name = default_export_name(
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 7).unwrap(),
        );
        assert_eq!(
            name.file_stem().unwrap().to_str().unwrap(),
            "t4_hits_2024-05-01_2024-05-07"
        );
        assert_eq!(
            name.extension().unwrap().to_str().unwrap(),
            preferred_extension()
        );
    }

    #[test]
    fn csv_extension_goes_straight_to_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hits.csv");
        let written = export_table(&one_row(), &path).unwrap();
        assert_eq!(written, path);

        let content = fs::read_to_string(&written).unwrap();
        assert!(content.starts_with("Pair,Entry,Target 4"));
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn spreadsheet_target_written_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hits.xlsx");
        let written = export_table(&one_row(), &path).unwrap();
        assert_eq!(written, path);
        assert!(written.exists());
    }

    #[cfg(not(feature = "xlsx"))]
    #[test]
    fn spreadsheet_target_falls_back_to_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hits.xlsx");
        let written = export_table(&one_row(), &path).unwrap();
        assert_eq!(written, dir.path().join("hits.csv"));
    }

    #[test]
    fn terminal_failure_is_an_export_error() {
        let err = export_table(&one_row(), Path::new("/nonexistent/dir/hits.csv")).unwrap_err();
        assert!(matches!(err, HitscanError::Export { .. }));
    }
}
