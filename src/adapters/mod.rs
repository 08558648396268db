//! Concrete adapter implementations for ports.

pub mod csv_export_adapter;
pub mod export;
pub mod file_config_adapter;
pub mod json_source_adapter;
#[cfg(feature = "xlsx")]
pub mod xlsx_export_adapter;
