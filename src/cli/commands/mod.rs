pub mod backup;
pub mod config;
pub mod data;
pub mod db;
pub mod driver;
pub mod export;
pub mod init;
pub mod log;
pub mod login;
pub mod report;
pub mod status;
pub mod vehicle;

use crate::core::lookup::Directory;
use crate::errors::{AppError, AppResult};
use crate::utils::date::{parse_date_arg, today};
use chrono::NaiveDate;

/// `--vehicle` accepts an id or an exact name.
pub(crate) fn resolve_vehicle(dir: &Directory, arg: &str) -> AppResult<i64> {
    if let Ok(id) = arg.trim().parse::<i64>() {
        return Ok(id);
    }
    dir.vehicle_by_name(arg)
        .ok_or_else(|| AppError::InvalidInput(format!("no vehicle named '{}'", arg.trim())))
}

/// `--driver` accepts an id or an exact name.
pub(crate) fn resolve_driver(dir: &Directory, arg: &str) -> AppResult<i64> {
    if let Ok(id) = arg.trim().parse::<i64>() {
        return Ok(id);
    }
    dir.driver_by_name(arg)
        .ok_or_else(|| AppError::InvalidInput(format!("no driver named '{}'", arg.trim())))
}

pub(crate) fn parse_date_opt(arg: Option<&str>) -> AppResult<Option<NaiveDate>> {
    arg.map(|s| parse_date_arg(s, today())).transpose()
}
