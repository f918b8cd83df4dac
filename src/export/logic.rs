use crate::core::report::ReportLogic;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::SortOrder;
use crate::db::queries::reports::ReportFilter;
use crate::errors::AppResult;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{ExportFormat, ReportExport, ensure_writable};
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Load the rows to export, oldest first.
    ///
    /// `range`: `None`, `"all"` or a period such as `YYYY`, `YYYY-MM`,
    /// `YYYY-MM-DD` or `start:end` of the same shape.
    pub fn collect(pool: &DbPool, range: Option<&str>) -> AppResult<Vec<ReportExport>> {
        let date_range = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_period(r)?),
        };
        let filter = ReportFilter {
            date_range,
            ..ReportFilter::default()
        };

        let listing = ReportLogic::list(pool, &filter, SortOrder::Asc)?;
        let mut rows: Vec<ReportExport> = listing
            .groups
            .iter()
            .flat_map(|g| g.rows.iter())
            .map(|a| ReportExport::from_annotated(a, &listing.directory))
            .collect();
        rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    /// Returns the number of exported reports.
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        path: &Path,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let rows = Self::collect(pool, range)?;
        if rows.is_empty() {
            warning("No reports found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        audit_quiet(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} reports as {}", rows.len(), format.as_str()),
        );
        Ok(rows.len())
    }
}
