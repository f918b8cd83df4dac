use crate::core::ledger::{self, OdometerDrift, compute_run_distances, current_odometer};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::reports::ReportFilter;
use crate::db::queries::{SortOrder, reports, vehicles};
use crate::errors::{AppError, AppResult};
use crate::models::vehicle::Vehicle;

/// Optional fields of the vehicle form; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct VehicleForm {
    pub name: Option<String>,
    pub baseline_km: Option<i64>,
    pub element_changed: Option<bool>,
}

/// High-level business logic for the `vehicle` commands.
pub struct VehicleLogic;

pub(crate) fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("vehicle name is required".into()));
    }
    Ok(())
}

pub(crate) fn validate_baseline(km: i64) -> AppResult<()> {
    if km < 0 {
        return Err(AppError::Validation(format!(
            "oil-change baseline cannot be negative ({km})"
        )));
    }
    Ok(())
}

pub fn load(pool: &DbPool, id: i64) -> AppResult<Vehicle> {
    vehicles::get(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Vehicle", id))
}

impl VehicleLogic {
    pub fn add(pool: &mut DbPool, form: &VehicleForm) -> AppResult<Vehicle> {
        let name = form.name.as_deref().unwrap_or("");
        validate_name(name)?;

        let baseline = form
            .baseline_km
            .ok_or_else(|| AppError::Validation("oil-change baseline (km) is required".into()))?;
        validate_baseline(baseline)?;

        let mut vehicle = Vehicle::new(name, baseline, form.element_changed.unwrap_or(false));
        vehicle.id = vehicles::insert(&pool.conn, &vehicle)?;

        audit_quiet(
            &pool.conn,
            "vehicle_add",
            &vehicle.name,
            &format!("Registered vehicle #{} with baseline {} km", vehicle.id, baseline),
        );
        Ok(vehicle)
    }

    pub fn edit(pool: &mut DbPool, id: i64, form: &VehicleForm) -> AppResult<Vehicle> {
        let mut vehicle = load(pool, id)?;

        if let Some(name) = &form.name {
            validate_name(name)?;
            vehicle.name = name.trim().to_string();
        }
        if let Some(km) = form.baseline_km {
            validate_baseline(km)?;
            vehicle.oil_change_baseline_km = km;
        }
        if let Some(changed) = form.element_changed {
            vehicle.element_change_parity = Vehicle::parity_from_element_changed(changed);
        }

        vehicles::update(&pool.conn, &vehicle)?;
        audit_quiet(
            &pool.conn,
            "vehicle_edit",
            &vehicle.name,
            &format!("Updated vehicle #{}", vehicle.id),
        );
        Ok(vehicle)
    }

    /// Delete a vehicle. Its reports stay and will show an unknown vehicle.
    /// Returns the number of reports left without a vehicle.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<usize> {
        let vehicle = load(pool, id)?;
        let orphaned =
            reports::select(&pool.conn, &ReportFilter::for_vehicle(id), SortOrder::Asc)?.len();

        vehicles::delete_by_id(&pool.conn, id)?;
        audit_quiet(
            &pool.conn,
            "vehicle_del",
            &vehicle.name,
            &format!("Deleted vehicle #{id} ({orphaned} reports kept)"),
        );
        Ok(orphaned)
    }

    /// Record an oil change at `odometer`, or at the current reading from the
    /// report history when not given.
    pub fn oil_change(pool: &mut DbPool, id: i64, odometer: Option<i64>) -> AppResult<Vehicle> {
        let vehicle = load(pool, id)?;

        let at_km = match odometer {
            Some(km) => km,
            None => {
                let history = reports::select(
                    &pool.conn,
                    &ReportFilter::for_vehicle(id),
                    SortOrder::Asc,
                )?;
                current_odometer(&compute_run_distances(&history))
                    .unwrap_or(vehicle.oil_change_baseline_km)
            }
        };

        let updated = ledger::record_oil_change(&vehicle, at_km)?;
        vehicles::update(&pool.conn, &updated)?;

        audit_quiet(
            &pool.conn,
            "oil_change",
            &updated.name,
            &format!(
                "Oil change at {} km (element {})",
                at_km,
                if updated.element_changed() {
                    "replaced"
                } else {
                    "kept"
                }
            ),
        );
        Ok(updated)
    }

    /// Recompute `last_known_km` from the report history and store it where
    /// it drifted. Vehicles without readable history are left alone.
    pub fn sync(pool: &mut DbPool, id: Option<i64>) -> AppResult<Vec<(Vehicle, OdometerDrift)>> {
        let targets = match id {
            Some(id) => vec![load(pool, id)?],
            None => vehicles::select_all(&pool.conn)?,
        };

        let mut repaired = Vec::new();
        for vehicle in targets {
            let history = reports::select(
                &pool.conn,
                &ReportFilter::for_vehicle(vehicle.id),
                SortOrder::Asc,
            )?;
            let annotated = compute_run_distances(&history);

            if let Some(drift) = ledger::detect_drift(&vehicle, &annotated) {
                vehicles::update_last_known_km(&pool.conn, vehicle.id, drift.actual_km)?;
                tracing::info!(
                    vehicle_id = vehicle.id,
                    cached = drift.cached_km,
                    actual = drift.actual_km,
                    "odometer cache repaired"
                );
                audit_quiet(
                    &pool.conn,
                    "vehicle_sync",
                    &vehicle.name,
                    &format!("last_km {} -> {}", drift.cached_km, drift.actual_km),
                );
                repaired.push((vehicle, drift));
            }
        }
        Ok(repaired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::TripReport;
    use chrono::NaiveDate;

    fn form(name: &str, baseline: Option<i64>) -> VehicleForm {
        VehicleForm {
            name: Some(name.into()),
            baseline_km: baseline,
            element_changed: Some(true),
        }
    }

    #[test]
    fn add_requires_name_and_baseline() {
        let mut pool = DbPool::in_memory().unwrap();
        assert!(matches!(
            VehicleLogic::add(&mut pool, &form("  ", Some(0))),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            VehicleLogic::add(&mut pool, &form("Hiace", None)),
            Err(AppError::Validation(_))
        ));
        assert!(vehicles::select_all(&pool.conn).unwrap().is_empty());
    }

    #[test]
    fn oil_change_uses_history_and_rejects_backwards() {
        let mut pool = DbPool::in_memory().unwrap();
        let v = VehicleLogic::add(&mut pool, &form("Hiace", Some(1000))).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        reports::insert(&pool.conn, &TripReport::new(v.id, 1, date, 5800)).unwrap();

        let after = VehicleLogic::oil_change(&mut pool, v.id, None).unwrap();
        assert_eq!(after.oil_change_baseline_km, 5800);
        assert!(!after.element_changed());

        let err = VehicleLogic::oil_change(&mut pool, v.id, Some(5000)).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        assert_eq!(load(&pool, v.id).unwrap().oil_change_baseline_km, 5800);
    }

    #[test]
    fn sync_repairs_drifted_cache() {
        let mut pool = DbPool::in_memory().unwrap();
        let v = VehicleLogic::add(&mut pool, &form("Canter", Some(0))).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        // simulate a report write whose follow-up cache update never happened
        reports::insert(&pool.conn, &TripReport::new(v.id, 1, date, 742)).unwrap();

        let repaired = VehicleLogic::sync(&mut pool, None).unwrap();
        assert_eq!(repaired.len(), 1);
        assert_eq!(repaired[0].1.actual_km, 742);
        assert_eq!(load(&pool, v.id).unwrap().last_known_km, 742);

        assert!(VehicleLogic::sync(&mut pool, Some(v.id)).unwrap().is_empty());
    }

    #[test]
    fn delete_keeps_reports() {
        let mut pool = DbPool::in_memory().unwrap();
        let v = VehicleLogic::add(&mut pool, &form("Canter", Some(0))).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        reports::insert(&pool.conn, &TripReport::new(v.id, 1, date, 10)).unwrap();

        assert_eq!(VehicleLogic::delete(&mut pool, v.id).unwrap(), 1);
        assert_eq!(reports::count(&pool.conn).unwrap(), 1);
        assert!(matches!(
            VehicleLogic::delete(&mut pool, v.id),
            Err(AppError::NotFound { .. })
        ));
    }
}
