//! Name resolution for the weak vehicle/driver references held by reports.

use crate::db::queries::{drivers, vehicles};
use crate::errors::AppResult;
use crate::models::{Driver, Vehicle};
use rusqlite::Connection;
use std::collections::HashMap;

pub const UNKNOWN_VEHICLE: &str = "(unknown vehicle)";
pub const UNKNOWN_DRIVER: &str = "(unknown driver)";

/// Outcome of looking up a reference. A missing row is a normal result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a, T> {
    Known(&'a T),
    Unknown,
}

impl<T> Resolved<'_, T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Resolved::Known(_))
    }
}

/// Snapshot of all vehicles and drivers, keyed by id.
#[derive(Debug, Default)]
pub struct Directory {
    vehicles: HashMap<i64, Vehicle>,
    drivers: HashMap<i64, Driver>,
}

impl Directory {
    pub fn new(vehicle_list: Vec<Vehicle>, driver_list: Vec<Driver>) -> Self {
        Self {
            vehicles: vehicle_list.into_iter().map(|v| (v.id, v)).collect(),
            drivers: driver_list.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    pub fn load(conn: &Connection) -> AppResult<Self> {
        Ok(Self::new(
            vehicles::select_all(conn)?,
            drivers::select_all(conn)?,
        ))
    }

    pub fn vehicle(&self, id: i64) -> Resolved<'_, Vehicle> {
        match self.vehicles.get(&id) {
            Some(v) => Resolved::Known(v),
            None => Resolved::Unknown,
        }
    }

    pub fn driver(&self, id: i64) -> Resolved<'_, Driver> {
        match self.drivers.get(&id) {
            Some(d) => Resolved::Known(d),
            None => Resolved::Unknown,
        }
    }

    pub fn vehicle_label(&self, id: i64) -> String {
        match self.vehicle(id) {
            Resolved::Known(v) => v.name.clone(),
            Resolved::Unknown => UNKNOWN_VEHICLE.to_string(),
        }
    }

    pub fn driver_label(&self, id: i64) -> String {
        match self.driver(id) {
            Resolved::Known(d) => d.name.clone(),
            Resolved::Unknown => UNKNOWN_DRIVER.to_string(),
        }
    }

    /// Find a vehicle id by exact name (case-insensitive).
    pub fn vehicle_by_name(&self, name: &str) -> Option<i64> {
        let wanted = name.trim().to_lowercase();
        let mut hits: Vec<i64> = self
            .vehicles
            .values()
            .filter(|v| v.name.to_lowercase() == wanted)
            .map(|v| v.id)
            .collect();
        hits.sort_unstable();
        hits.first().copied()
    }

    pub fn driver_by_name(&self, name: &str) -> Option<i64> {
        let wanted = name.trim().to_lowercase();
        let mut hits: Vec<i64> = self
            .drivers
            .values()
            .filter(|d| d.name.to_lowercase() == wanted)
            .map(|d| d.id)
            .collect();
        hits.sort_unstable();
        hits.first().copied()
    }
}
