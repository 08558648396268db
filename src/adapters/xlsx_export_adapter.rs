//! Spreadsheet export adapter (`xlsx` feature).

use std::path::Path;

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::domain::error::HitscanError;
use crate::domain::report::{ExportRow, EXPORT_COLUMNS};
use crate::ports::export_port::ExportPort;

const SHEET_NAME: &str = "Target4_Hits";

pub struct XlsxExporter;

fn export_err(e: XlsxError) -> HitscanError {
    HitscanError::Export {
        reason: format!("spreadsheet write failed: {}", e),
    }
}

impl ExportPort for XlsxExporter {
    fn write(&self, rows: &[ExportRow], output_path: &Path) -> Result<(), HitscanError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME).map_err(export_err)?;

        for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *title)
                .map_err(export_err)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let r = (index + 1) as u32;
            worksheet.write_string(r, 0, &row.pair).map_err(export_err)?;
            worksheet.write_number(r, 1, row.entry).map_err(export_err)?;
            worksheet
                .write_number(r, 2, row.target4)
                .map_err(export_err)?;
            worksheet
                .write_number(r, 3, row.gain_percent)
                .map_err(export_err)?;
            worksheet
                .write_number(r, 4, row.duration_minutes)
                .map_err(export_err)?;
            worksheet
                .write_string(r, 5, &row.signal_time)
                .map_err(export_err)?;
            worksheet
                .write_string(r, 6, &row.hit_time)
                .map_err(export_err)?;
        }

        workbook.save(output_path).map_err(|e| HitscanError::Export {
            reason: format!("failed to save {}: {}", output_path.display(), e),
        })
    }
}
