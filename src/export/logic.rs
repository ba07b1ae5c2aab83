use crate::core::entries::EntriesLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{EntryExport, breakdown_rows};
use crate::export::range::parse_range;
use crate::export::{BreakdownExport, ExportFormat};
use crate::ui::messages::warning;
use crate::utils::path::expand_tilde;

pub struct ExportLogic;

impl ExportLogic {
    /// Export time entries (or, with `breakdown`, one row per breakdown
    /// item) to CSV or JSON.
    ///
    /// - `file`: absolute path of the output file (`~/` is expanded)
    /// - `range`: `None`, `"all"`, `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or
    ///   `START:END` of any of these
    ///
    /// Returns the number of exported rows.
    #[allow(clippy::too_many_arguments)]
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: &Option<String>,
        crew_id: Option<i64>,
        member_id: Option<i64>,
        breakdown: bool,
        force: bool,
    ) -> AppResult<usize> {
        let path = expand_tilde(file);
        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds = match range {
            None => None,
            Some(r) => parse_range(r)?,
        };

        let views = EntriesLogic::list(&pool.conn, bounds, crew_id, member_id)?;

        if views.is_empty() {
            warning("No time entries found for the selected range. Nothing to export.");
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        if breakdown {
            let rows: Vec<BreakdownExport> = views.iter().flat_map(breakdown_rows).collect();
            if rows.is_empty() {
                warning("No breakdown rows found for the selected range. Nothing to export.");
                return Ok(0);
            }
            match format {
                ExportFormat::Csv => export_csv(&rows, &path)?,
                ExportFormat::Json => export_json(&rows, &path)?,
            }
            Ok(rows.len())
        } else {
            let rows: Vec<EntryExport> = views.iter().map(EntryExport::from).collect();
            match format {
                ExportFormat::Csv => export_csv(&rows, &path)?,
                ExportFormat::Json => export_json(&rows, &path)?,
            }
            Ok(rows.len())
        }
    }
}
