//! Tabular export port trait.

use std::path::Path;

use crate::domain::error::HitscanError;
use crate::domain::report::ExportRow;

/// Writes the export projection to a file. Implementations must emit
/// exactly [`crate::domain::report::EXPORT_COLUMNS`] as the header and
/// preserve the row order handed in; that is the whole contract.
pub trait ExportPort {
    fn write(&self, rows: &[ExportRow], output_path: &Path) -> Result<(), HitscanError>;
}
