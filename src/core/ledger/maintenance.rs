//! Oil-change and filter-element schedule.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::vehicle::Vehicle;
use serde::Serialize;

pub const DEFAULT_SERVICE_INTERVAL_KM: i64 = 5000;
pub const DEFAULT_DUE_THRESHOLD_KM: i64 = 500;
pub const DEFAULT_URGENT_THRESHOLD_KM: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaintenanceThresholds {
    pub service_interval_km: i64,
    pub due_threshold_km: i64,
    pub urgent_threshold_km: i64,
}

impl Default for MaintenanceThresholds {
    fn default() -> Self {
        Self {
            service_interval_km: DEFAULT_SERVICE_INTERVAL_KM,
            due_threshold_km: DEFAULT_DUE_THRESHOLD_KM,
            urgent_threshold_km: DEFAULT_URGENT_THRESHOLD_KM,
        }
    }
}

impl From<&Config> for MaintenanceThresholds {
    fn from(cfg: &Config) -> Self {
        Self {
            service_interval_km: cfg.service_interval_km,
            due_threshold_km: cfg.due_threshold_km,
            urgent_threshold_km: cfg.urgent_threshold_km,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaintenanceStatus {
    /// Distance left before the next oil change; negative when overdue.
    pub remaining_km: i64,
    pub oil_due: bool,
    pub urgent: bool,
    /// The next oil change must also replace the filter element.
    pub element_due: bool,
}

/// Compute the maintenance indicators for a vehicle at a given odometer.
///
/// `current_odometer` should come from the report history
/// (`current_odometer` on the annotated reports), not from the vehicle's
/// cached `last_known_km`.
pub fn maintenance_status(
    vehicle: &Vehicle,
    current_odometer: i64,
    thresholds: &MaintenanceThresholds,
) -> MaintenanceStatus {
    let remaining_km =
        (vehicle.oil_change_baseline_km + thresholds.service_interval_km) - current_odometer;

    MaintenanceStatus {
        remaining_km,
        oil_due: remaining_km <= thresholds.due_threshold_km,
        urgent: remaining_km <= thresholds.urgent_threshold_km,
        element_due: vehicle.element_change_parity % 2 == 1,
    }
}

/// Apply an "oil change performed" action.
///
/// The returned vehicle has its baseline moved to `current_odometer` and its
/// element parity flipped; the caller persists it. A reading below the
/// current baseline is rejected.
pub fn record_oil_change(vehicle: &Vehicle, current_odometer: i64) -> AppResult<Vehicle> {
    if current_odometer < vehicle.oil_change_baseline_km {
        return Err(AppError::InvalidInput(format!(
            "odometer {} km is below the current oil-change baseline of {} km for '{}'",
            current_odometer, vehicle.oil_change_baseline_km, vehicle.name
        )));
    }

    let mut updated = vehicle.clone();
    updated.oil_change_baseline_km = current_odometer;
    updated.element_change_parity = (vehicle.element_change_parity + 1) % 2;
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(baseline: i64, parity: u8) -> Vehicle {
        let mut v = Vehicle::new("Hiace", baseline, true);
        v.id = 1;
        v.element_change_parity = parity;
        v
    }

    #[test]
    fn due_threshold_is_inclusive() {
        let t = MaintenanceThresholds::default();
        let v = vehicle(0, 0);

        let at = maintenance_status(&v, 4500, &t);
        assert_eq!(at.remaining_km, 500);
        assert!(at.oil_due);
        assert!(!at.urgent);

        let before = maintenance_status(&v, 4499, &t);
        assert_eq!(before.remaining_km, 501);
        assert!(!before.oil_due);
    }

    #[test]
    fn urgent_and_overdue() {
        let t = MaintenanceThresholds::default();
        let v = vehicle(10_000, 0);

        let urgent = maintenance_status(&v, 14_900, &t);
        assert_eq!(urgent.remaining_km, 100);
        assert!(urgent.oil_due && urgent.urgent);

        let overdue = maintenance_status(&v, 15_250, &t);
        assert_eq!(overdue.remaining_km, -250);
        assert!(overdue.oil_due && overdue.urgent);
    }

    #[test]
    fn custom_interval() {
        let t = MaintenanceThresholds {
            service_interval_km: 3000,
            due_threshold_km: 300,
            urgent_threshold_km: 50,
        };
        let s = maintenance_status(&vehicle(1000, 0), 3600, &t);
        assert_eq!(s.remaining_km, 400);
        assert!(!s.oil_due);
    }

    #[test]
    fn element_alternates_across_oil_changes() {
        let t = MaintenanceThresholds::default();
        let v0 = vehicle(0, 0);

        let v1 = record_oil_change(&v0, 5000).unwrap();
        assert!(maintenance_status(&v1, 5000, &t).element_due);

        let v2 = record_oil_change(&v1, 10_000).unwrap();
        assert!(!maintenance_status(&v2, 10_000, &t).element_due);

        let mut v = v2;
        let mut last = maintenance_status(&v, v.oil_change_baseline_km, &t).element_due;
        for step in 1..=6 {
            v = record_oil_change(&v, 10_000 + step * 5000).unwrap();
            let now = maintenance_status(&v, v.oil_change_baseline_km, &t).element_due;
            assert_ne!(now, last);
            last = now;
        }
    }

    #[test]
    fn oil_change_moves_baseline_and_resets_remaining() {
        let t = MaintenanceThresholds::default();
        let v = record_oil_change(&vehicle(0, 0), 4800).unwrap();
        assert_eq!(v.oil_change_baseline_km, 4800);
        assert_eq!(maintenance_status(&v, 4800, &t).remaining_km, 5000);
    }

    #[test]
    fn oil_change_rejects_backward_baseline() {
        let v = vehicle(8000, 0);
        let err = record_oil_change(&v, 7999).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
        // equal reading is accepted
        assert!(record_oil_change(&v, 8000).is_ok());
    }
}
