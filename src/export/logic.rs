// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::export::xlsx::export_xlsx;
use crate::models::ServiceRecord;
use crate::ui::messages::warning;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export `records` (already filtered and ordered) to `file`.
    /// Returns the number of exported rows.
    pub fn export(
        records: &[&ServiceRecord],
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        ensure_writable(path, force)?;

        if records.is_empty() {
            warning("No service records to export.");
            return Ok(0);
        }

        let rows: Vec<RecordExport> = records.iter().map(|r| RecordExport::from(*r)).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Xlsx => export_xlsx(&rows, path)?,
        }

        Ok(rows.len())
    }
}
