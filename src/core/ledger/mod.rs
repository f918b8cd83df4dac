//! Mileage ledger: pure functions over a snapshot of one vehicle's
//! reports. Nothing here touches the database.

pub mod maintenance;
pub mod run_distance;

pub use maintenance::{
    MaintenanceStatus, MaintenanceThresholds, maintenance_status, record_oil_change,
};
pub use run_distance::{
    AnnotatedReport, DataIntegrityWarning, compute_run_distances, current_odometer,
};

use crate::models::report::TripReport;
use crate::models::vehicle::Vehicle;

/// Cached `last_known_km` disagreeing with the report history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OdometerDrift {
    pub cached_km: i64,
    pub actual_km: i64,
}

/// Compare the vehicle's cached reading with the history.
/// Returns `None` when they agree or when there is no readable history.
pub fn detect_drift(vehicle: &Vehicle, annotated: &[AnnotatedReport]) -> Option<OdometerDrift> {
    let actual_km = current_odometer(annotated)?;
    if actual_km == vehicle.last_known_km {
        return None;
    }
    Some(OdometerDrift {
        cached_km: vehicle.last_known_km,
        actual_km,
    })
}

/// Everything the dashboard shows for one vehicle.
#[derive(Debug, Clone)]
pub struct VehicleLedger {
    pub vehicle: Vehicle,
    pub history: Vec<AnnotatedReport>,
    /// Reading the status was computed against.
    pub current_km: i64,
    pub status: MaintenanceStatus,
    pub drift: Option<OdometerDrift>,
}

/// Build the full ledger for a vehicle from its reports.
///
/// Reports belonging to other vehicles are ignored. Without any readable
/// history the oil-change baseline is used as the current reading.
pub fn build_vehicle_ledger(
    vehicle: &Vehicle,
    reports: &[TripReport],
    thresholds: &MaintenanceThresholds,
) -> VehicleLedger {
    let own: Vec<TripReport> = reports
        .iter()
        .filter(|r| r.vehicle_id == vehicle.id)
        .cloned()
        .collect();

    let history = compute_run_distances(&own);
    let current_km = current_odometer(&history).unwrap_or(vehicle.oil_change_baseline_km);
    let status = maintenance_status(vehicle, current_km, thresholds);
    let drift = detect_drift(vehicle, &history);

    VehicleLedger {
        vehicle: vehicle.clone(),
        history,
        current_km,
        status,
        drift,
    }
}
