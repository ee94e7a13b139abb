use super::fs_utils::ensure_writable;
use super::json_csv::{export_csv, export_json};
use super::{ExportFormat, RecordExport};
use crate::errors::AppResult;
use crate::models::{DayKey, Record};
use std::path::Path;
use tracing::info;

pub struct ExportLogic;

impl ExportLogic {
    /// Writes one day's records to `path` in the requested format.
    pub fn export(
        day: &DayKey,
        records: &[Record],
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<()> {
        ensure_writable(path, force)?;

        let rows = RecordExport::from_records(records);
        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        info!(%day, format = format.as_str(), path = %path.display(), "day exported");
        Ok(())
    }
}
