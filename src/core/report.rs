use crate::core::ledger::{AnnotatedReport, compute_run_distances, current_odometer};
use crate::core::lookup::Directory;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::reports::{ReportFilter, TextColumn};
use crate::db::queries::{SortOrder, drivers, reports, vehicles};
use crate::errors::{AppError, AppResult};
use crate::models::condition::Condition;
use crate::models::report::TripReport;
use crate::utils::date::today;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Fields of the report form. On `add` the vehicle, driver and odometer
/// are required; on `edit` every `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ReportInput {
    pub vehicle_id: Option<i64>,
    pub driver_id: Option<i64>,
    pub odometer_km: Option<i64>,
    pub date: Option<NaiveDate>,
    pub site_name: Option<String>,
    pub destination: Option<String>,
    /// Setting an issue text marks the report as `issue`.
    pub issue: Option<String>,
    /// Mark the report as `good` and drop any issue text.
    pub good: bool,
}

/// Reading of the latest report of a vehicle, shown before a new entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousReading {
    pub date: NaiveDate,
    pub odometer_km: i64,
}

/// Reports of one vehicle, as shown by `report list`.
#[derive(Debug, Clone)]
pub struct VehicleReports {
    pub vehicle_id: i64,
    pub label: String,
    pub known: bool,
    pub rows: Vec<AnnotatedReport>,
}

#[derive(Debug)]
pub struct ReportListing {
    pub directory: Directory,
    pub groups: Vec<VehicleReports>,
}

impl ReportListing {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}

/// High-level business logic for the `report` commands.
pub struct ReportLogic;

fn require_vehicle(pool: &DbPool, id: i64) -> AppResult<()> {
    vehicles::get(&pool.conn, id)?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found("Vehicle", id))
}

fn require_driver(pool: &DbPool, id: i64) -> AppResult<()> {
    drivers::get(&pool.conn, id)?
        .map(|_| ())
        .ok_or_else(|| AppError::not_found("Driver", id))
}

pub(crate) fn validate_odometer(km: i64) -> AppResult<()> {
    if km < 0 {
        return Err(AppError::Validation(format!(
            "odometer reading cannot be negative ({km})"
        )));
    }
    Ok(())
}

fn apply_condition(report: &mut TripReport, input: &ReportInput) -> AppResult<()> {
    match (input.good, &input.issue) {
        (true, Some(_)) => Err(AppError::Validation(
            "a report cannot be both good and carry an issue".into(),
        )),
        (true, None) => {
            report.set_condition(Condition::Good, None);
            Ok(())
        }
        (false, Some(text)) => {
            if text.trim().is_empty() {
                return Err(AppError::Validation(
                    "issue description cannot be empty".into(),
                ));
            }
            report.set_condition(Condition::Issue, Some(text.clone()));
            Ok(())
        }
        (false, None) => Ok(()),
    }
}

impl ReportLogic {
    pub fn add(pool: &mut DbPool, input: &ReportInput) -> AppResult<TripReport> {
        let vehicle_id = input
            .vehicle_id
            .ok_or_else(|| AppError::Validation("vehicle is required".into()))?;
        let driver_id = input
            .driver_id
            .ok_or_else(|| AppError::Validation("driver is required".into()))?;
        let odometer = input
            .odometer_km
            .ok_or_else(|| AppError::Validation("odometer reading (km) is required".into()))?;
        validate_odometer(odometer)?;

        require_vehicle(pool, vehicle_id)?;
        require_driver(pool, driver_id)?;

        let date = input.date.unwrap_or_else(today);
        let mut report = TripReport::new(vehicle_id, driver_id, date, odometer);
        if let Some(site) = &input.site_name {
            report.site_name = site.trim().to_string();
        }
        if let Some(dest) = &input.destination {
            report.destination = dest.trim().to_string();
        }
        apply_condition(&mut report, input)?;

        report.id = reports::insert(&pool.conn, &report)?;
        audit_quiet(
            &pool.conn,
            "report_add",
            &report.date_str(),
            &format!(
                "Report #{} for vehicle #{} at {} km",
                report.id, vehicle_id, odometer
            ),
        );

        Self::refresh_vehicle(pool, vehicle_id)?;
        Self::reload(pool, report.id)
    }

    pub fn edit(pool: &mut DbPool, id: i64, input: &ReportInput) -> AppResult<TripReport> {
        let mut report =
            reports::get(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Report", id))?;
        let old_vehicle = report.vehicle_id;

        if let Some(v) = input.vehicle_id
            && v != report.vehicle_id
        {
            require_vehicle(pool, v)?;
            report.vehicle_id = v;
        }
        if let Some(d) = input.driver_id
            && d != report.driver_id
        {
            require_driver(pool, d)?;
            report.driver_id = d;
        }
        if let Some(km) = input.odometer_km {
            validate_odometer(km)?;
            report.last_odometer_km = Some(km);
        }
        if let Some(date) = input.date {
            report.date = date;
        }
        if let Some(site) = &input.site_name {
            report.site_name = site.trim().to_string();
        }
        if let Some(dest) = &input.destination {
            report.destination = dest.trim().to_string();
        }
        apply_condition(&mut report, input)?;

        reports::update(&pool.conn, &report)?;
        audit_quiet(
            &pool.conn,
            "report_edit",
            &report.date_str(),
            &format!("Updated report #{id}"),
        );

        Self::refresh_vehicle(pool, report.vehicle_id)?;
        if old_vehicle != report.vehicle_id {
            Self::refresh_vehicle(pool, old_vehicle)?;
        }
        Self::reload(pool, id)
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<TripReport> {
        let report =
            reports::get(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Report", id))?;
        reports::delete_by_id(&pool.conn, id)?;

        audit_quiet(
            &pool.conn,
            "report_del",
            &report.date_str(),
            &format!("Deleted report #{id} of vehicle #{}", report.vehicle_id),
        );

        Self::refresh_vehicle(pool, report.vehicle_id)?;
        Ok(report)
    }

    fn reload(pool: &DbPool, id: i64) -> AppResult<TripReport> {
        reports::get(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Report", id))
    }

    /// Re-derive the stored `run_km` hints of one vehicle from its history,
    /// then update the vehicle's cached odometer.
    ///
    /// The cache update is a separate write: when it fails only a warning
    /// is printed and `vehicle sync` (or any later report write) repairs it.
    pub fn refresh_vehicle(pool: &mut DbPool, vehicle_id: i64) -> AppResult<()> {
        let history = reports::select(
            &pool.conn,
            &ReportFilter::for_vehicle(vehicle_id),
            SortOrder::Asc,
        )?;
        let annotated = compute_run_distances(&history);

        for a in &annotated {
            if a.report.run_km != Some(a.run_km) {
                reports::update_run_km(&pool.conn, a.report.id, a.run_km)?;
            }
        }

        let Some(vehicle) = vehicles::get(&pool.conn, vehicle_id)? else {
            // reports of a deleted vehicle still get their hints
            return Ok(());
        };

        if let Some(km) = current_odometer(&annotated)
            && km != vehicle.last_known_km
            && let Err(e) = vehicles::update_last_known_km(&pool.conn, vehicle_id, km)
        {
            let err = AppError::Persistence(format!(
                "cached odometer of '{}' not updated: {e}",
                vehicle.name
            ));
            tracing::warn!(vehicle_id, error = %err, "vehicle cache write failed");
            crate::ui::messages::warning(format!("Report saved. {err}"));
        }
        Ok(())
    }

    /// Latest readable reading of a vehicle, if any.
    pub fn previous_reading(pool: &DbPool, vehicle_id: i64) -> AppResult<Option<PreviousReading>> {
        let history = reports::select(
            &pool.conn,
            &ReportFilter::for_vehicle(vehicle_id),
            SortOrder::Asc,
        )?;

        Ok(compute_run_distances(&history)
            .into_iter()
            .rev()
            .find(|a| a.has_readable_odometer())
            .map(|a| PreviousReading {
                date: a.report.date,
                odometer_km: a.odometer_km,
            }))
    }

    /// Reports grouped per vehicle.
    ///
    /// Run distances are always computed over each vehicle's complete
    /// history; the filter only selects which rows are shown.
    pub fn list(pool: &DbPool, filter: &ReportFilter, order: SortOrder) -> AppResult<ReportListing> {
        let directory = Directory::load(&pool.conn)?;

        let history_filter = ReportFilter {
            vehicle_id: filter.vehicle_id,
            ..ReportFilter::default()
        };
        let all = reports::select(&pool.conn, &history_filter, SortOrder::Asc)?;

        let mut by_vehicle: BTreeMap<i64, Vec<TripReport>> = BTreeMap::new();
        for r in all {
            by_vehicle.entry(r.vehicle_id).or_default().push(r);
        }

        let mut groups = Vec::new();
        for (vehicle_id, history) in by_vehicle {
            let mut rows: Vec<AnnotatedReport> = compute_run_distances(&history)
                .into_iter()
                .filter(|a| filter.matches(&a.report))
                .collect();
            if rows.is_empty() {
                continue;
            }
            if order == SortOrder::Desc {
                rows.reverse();
            }

            let known = directory.vehicle(vehicle_id).is_known();
            groups.push(VehicleReports {
                vehicle_id,
                label: directory.vehicle_label(vehicle_id),
                known,
                rows,
            });
        }

        // known vehicles by name, dangling ones last
        groups.sort_by(|a, b| {
            b.known
                .cmp(&a.known)
                .then_with(|| a.label.to_lowercase().cmp(&b.label.to_lowercase()))
                .then(a.vehicle_id.cmp(&b.vehicle_id))
        });

        Ok(ReportListing { directory, groups })
    }

    pub fn suggestions(pool: &DbPool, column: TextColumn) -> AppResult<Vec<String>> {
        reports::distinct_values(&pool.conn, column)
    }
}
