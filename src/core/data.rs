//! Whole-database JSON backup document (`data export` / `data import`).

use crate::core::{driver, report, vehicle};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{drivers, reports, vehicles};
use crate::errors::AppResult;
use crate::export::ensure_writable;
use crate::models::{Driver, TripReport, Vehicle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// `{ "vehicles": [...], "drivers": [...], "reports": [...] }`.
/// On import a missing array leaves that collection untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackupDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicles: Option<Vec<Vehicle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drivers: Option<Vec<Driver>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports: Option<Vec<TripReport>>,
}

/// Rows written per collection; `None` for collections not in the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub vehicles: Option<usize>,
    pub drivers: Option<usize>,
    pub reports: Option<usize>,
}

impl BackupDocument {
    /// Apply the same field rules as the vehicle, driver and report forms.
    pub fn validate(&self) -> AppResult<()> {
        for v in self.vehicles.iter().flatten() {
            vehicle::validate_name(&v.name)?;
            vehicle::validate_baseline(v.oil_change_baseline_km)?;
        }
        for d in self.drivers.iter().flatten() {
            driver::validate_name(&d.name)?;
        }
        // unreadable readings are kept as they are
        for r in self.reports.iter().flatten() {
            if let Some(km) = r.last_odometer_km {
                report::validate_odometer(km)?;
            }
        }
        Ok(())
    }
}

impl ImportSummary {
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_none() && self.drivers.is_none() && self.reports.is_none()
    }
}

pub struct DataLogic;

impl DataLogic {
    pub fn snapshot(pool: &DbPool) -> AppResult<BackupDocument> {
        Ok(BackupDocument {
            vehicles: Some(vehicles::select_all(&pool.conn)?),
            drivers: Some(drivers::select_all(&pool.conn)?),
            reports: Some(reports::select_all(&pool.conn)?),
        })
    }

    pub fn export(pool: &mut DbPool, path: &Path, force: bool) -> AppResult<BackupDocument> {
        ensure_writable(path, force)?;

        let doc = Self::snapshot(pool)?;
        let json = serde_json::to_string_pretty(&doc)?;
        fs::write(path, json)?;

        audit_quiet(
            &pool.conn,
            "data_export",
            &path.to_string_lossy(),
            &format!(
                "{} vehicles, {} drivers, {} reports",
                doc.vehicles.as_ref().map_or(0, Vec::len),
                doc.drivers.as_ref().map_or(0, Vec::len),
                doc.reports.as_ref().map_or(0, Vec::len),
            ),
        );
        Ok(doc)
    }

    pub fn read(path: &Path) -> AppResult<BackupDocument> {
        let text = fs::read_to_string(path)?;
        let doc: BackupDocument = serde_json::from_str(&text)?;
        doc.validate()?;
        Ok(doc)
    }

    /// Replace every collection present in `doc`, keeping ids, in one
    /// transaction.
    pub fn import(pool: &mut DbPool, doc: &BackupDocument) -> AppResult<ImportSummary> {
        doc.validate()?;

        let summary = pool.with_conn(|conn| {
            let tx = conn.transaction()?;
            let mut summary = ImportSummary::default();

            if let Some(list) = &doc.vehicles {
                vehicles::delete_all(&tx)?;
                for v in list {
                    vehicles::insert_with_id(&tx, v)?;
                }
                summary.vehicles = Some(list.len());
            }
            if let Some(list) = &doc.drivers {
                drivers::delete_all(&tx)?;
                for d in list {
                    drivers::insert_with_id(&tx, d)?;
                }
                summary.drivers = Some(list.len());
            }
            if let Some(list) = &doc.reports {
                reports::delete_all(&tx)?;
                for r in list {
                    reports::insert_with_id(&tx, r)?;
                }
                summary.reports = Some(list.len());
            }

            tx.commit()?;
            Ok(summary)
        })?;

        audit_quiet(
            &pool.conn,
            "data_import",
            "",
            &format!(
                "vehicles: {:?}, drivers: {:?}, reports: {:?}",
                summary.vehicles, summary.drivers, summary.reports
            ),
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::Condition;
    use chrono::NaiveDate;

    fn seeded() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        let vid = vehicles::insert(&pool.conn, &Vehicle::new("Hiace", 1000, false)).unwrap();
        let did = drivers::insert(&pool.conn, &Driver::new("Sato")).unwrap();
        let mut r = TripReport::new(vid, did, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(), 1500);
        r.site_name = "Kobe yard".into();
        r.set_condition(Condition::Issue, Some("wiper".into()));
        reports::insert(&pool.conn, &r).unwrap();
        pool
    }

    #[test]
    fn snapshot_then_import_reproduces_collections() {
        let source = seeded();
        let doc = DataLogic::snapshot(&source).unwrap();
        let json = serde_json::to_string(&doc).unwrap();

        let mut target = DbPool::in_memory().unwrap();
        vehicles::insert(&target.conn, &Vehicle::new("stale", 0, true)).unwrap();

        let parsed: BackupDocument = serde_json::from_str(&json).unwrap();
        let summary = DataLogic::import(&mut target, &parsed).unwrap();
        assert_eq!(summary.reports, Some(1));

        let again = DataLogic::snapshot(&target).unwrap();
        assert_eq!(again.vehicles, doc.vehicles);
        assert_eq!(again.drivers, doc.drivers);
        assert_eq!(again.reports, doc.reports);
    }

    #[test]
    fn missing_arrays_leave_collections_untouched() {
        let mut pool = seeded();
        let doc: BackupDocument = serde_json::from_str(r#"{"drivers": []}"#).unwrap();

        let summary = DataLogic::import(&mut pool, &doc).unwrap();
        assert_eq!(summary.vehicles, None);
        assert_eq!(summary.drivers, Some(0));
        assert_eq!(vehicles::select_all(&pool.conn).unwrap().len(), 1);
        assert!(drivers::select_all(&pool.conn).unwrap().is_empty());
        assert_eq!(reports::count(&pool.conn).unwrap(), 1);
    }

    #[test]
    fn invalid_rows_are_rejected_before_any_write() {
        let mut pool = seeded();
        let doc: BackupDocument = serde_json::from_str(
            r#"{"vehicles":[{"id":1,"name":"X","oilChangeBaselineKm":-4000}],
                "drivers":[{"id":1,"name":"   "}]}"#,
        )
        .unwrap();

        assert!(matches!(
            DataLogic::import(&mut pool, &doc),
            Err(AppError::Validation(_))
        ));
        let stored = vehicles::select_all(&pool.conn).unwrap();
        assert_eq!(stored[0].oil_change_baseline_km, 1000);
        assert_eq!(drivers::select_all(&pool.conn).unwrap()[0].name, "Sato");

        let blank_driver: BackupDocument =
            serde_json::from_str(r#"{"drivers":[{"id":1,"name":"   "}]}"#).unwrap();
        assert!(matches!(
            blank_driver.validate(),
            Err(AppError::Validation(_))
        ));

        let negative_reading: BackupDocument = serde_json::from_str(
            r#"{"reports":[{"id":1,"vehicleId":1,"driverId":1,"date":"2025-08-01","lastOdometerKm":-5}]}"#,
        )
        .unwrap();
        assert!(matches!(
            DataLogic::import(&mut pool, &negative_reading),
            Err(AppError::Validation(_))
        ));
        assert_eq!(reports::count(&pool.conn).unwrap(), 1);
    }
}
