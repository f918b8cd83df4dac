use crate::core::ledger::{MaintenanceThresholds, VehicleLedger, build_vehicle_ledger};
use crate::core::vehicle;
use crate::db::pool::DbPool;
use crate::db::queries::{reports, vehicles};
use crate::errors::AppResult;

pub struct StatusLogic;

impl StatusLogic {
    /// One ledger per vehicle, built from a single snapshot of the reports.
    /// With `only` set, that vehicle must exist.
    pub fn dashboard(
        pool: &DbPool,
        thresholds: &MaintenanceThresholds,
        only: Option<i64>,
    ) -> AppResult<Vec<VehicleLedger>> {
        let targets = match only {
            Some(id) => vec![vehicle::load(pool, id)?],
            None => vehicles::select_all(&pool.conn)?,
        };
        let all_reports = reports::select_all(&pool.conn)?;

        let ledgers: Vec<VehicleLedger> = targets
            .iter()
            .map(|v| build_vehicle_ledger(v, &all_reports, thresholds))
            .collect();

        for l in ledgers.iter().filter(|l| l.drift.is_some()) {
            tracing::debug!(vehicle_id = l.vehicle.id, "cached odometer out of date");
        }
        Ok(ledgers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::models::{TripReport, Vehicle};
    use chrono::NaiveDate;

    #[test]
    fn dangling_reports_do_not_disturb_known_vehicles() {
        let pool = DbPool::in_memory().unwrap();
        let id = vehicles::insert(&pool.conn, &Vehicle::new("Canter", 0, true)).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        reports::insert(&pool.conn, &TripReport::new(id, 1, date, 4600)).unwrap();
        reports::insert(&pool.conn, &TripReport::new(id + 10, 1, date, 99_999)).unwrap();

        let ledgers =
            StatusLogic::dashboard(&pool, &MaintenanceThresholds::default(), None).unwrap();
        assert_eq!(ledgers.len(), 1);
        assert_eq!(ledgers[0].current_km, 4600);
        assert_eq!(ledgers[0].status.remaining_km, 400);
        assert!(ledgers[0].status.oil_due);
        assert!(!ledgers[0].status.urgent);

        assert!(matches!(
            StatusLogic::dashboard(&pool, &MaintenanceThresholds::default(), Some(id + 10)),
            Err(AppError::NotFound { .. })
        ));
    }
}
