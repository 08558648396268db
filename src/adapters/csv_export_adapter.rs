//! CSV export adapter.

use std::path::Path;

use crate::domain::error::HitscanError;
use crate::domain::report::{ExportRow, EXPORT_COLUMNS};
use crate::ports::export_port::ExportPort;

pub struct CsvExporter;

impl ExportPort for CsvExporter {
    fn write(&self, rows: &[ExportRow], output_path: &Path) -> Result<(), HitscanError> {
        let mut writer =
            csv::Writer::from_path(output_path).map_err(|e| HitscanError::Export {
                reason: format!("failed to open {}: {}", output_path.display(), e),
            })?;

        writer
            .write_record(EXPORT_COLUMNS)
            .map_err(|e| HitscanError::Export {
                reason: format!("CSV header write failed: {}", e),
            })?;

        for row in rows {
            writer
                .write_record(&[
                    row.pair.clone(),
                    row.entry.to_string(),
                    row.target4.to_string(),
                    row.gain_percent.to_string(),
                    row.duration_minutes.to_string(),
                    row.signal_time.clone(),
                    row.hit_time.clone(),
                ])
                .map_err(|e| HitscanError::Export {
                    reason: format!("CSV row write failed: {}", e),
                })?;
        }

        writer.flush().map_err(|e| HitscanError::Export {
            reason: format!("CSV flush failed: {}", e),
        })?;
        Ok(())
    }
}
