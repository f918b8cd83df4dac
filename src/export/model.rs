use crate::core::ledger::AnnotatedReport;
use crate::core::lookup::Directory;
use serde::Serialize;

/// Flat report row for CSV / JSON export. `run_km` is the ledger value,
/// not the stored hint.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ReportExport {
    pub id: i64,
    pub date: String,
    pub vehicle_id: i64,
    pub vehicle: String,
    pub driver_id: i64,
    pub driver: String,
    pub site: String,
    pub destination: String,
    pub odometer_km: Option<i64>,
    pub run_km: i64,
    pub condition: String,
    pub issue_detail: String,
    pub warnings: String,
}

impl ReportExport {
    pub fn from_annotated(a: &AnnotatedReport, directory: &Directory) -> Self {
        let r = &a.report;
        Self {
            id: r.id,
            date: r.date_str(),
            vehicle_id: r.vehicle_id,
            vehicle: directory.vehicle_label(r.vehicle_id),
            driver_id: r.driver_id,
            driver: directory.driver_label(r.driver_id),
            site: r.site_name.clone(),
            destination: r.destination.clone(),
            odometer_km: r.last_odometer_km,
            run_km: a.run_km,
            condition: r.condition.to_db_str().to_string(),
            issue_detail: r.issue_detail.clone().unwrap_or_default(),
            warnings: a
                .warnings
                .iter()
                .map(|w| w.label())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}
