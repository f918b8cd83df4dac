use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::drivers;
use crate::errors::{AppError, AppResult};
use crate::models::driver::Driver;

/// High-level business logic for the `driver` commands.
pub struct DriverLogic;

pub(crate) fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("driver name is required".into()));
    }
    Ok(())
}

impl DriverLogic {
    pub fn add(pool: &mut DbPool, name: &str) -> AppResult<Driver> {
        validate_name(name)?;

        let mut driver = Driver::new(name);
        driver.id = drivers::insert(&pool.conn, &driver)?;

        audit_quiet(
            &pool.conn,
            "driver_add",
            &driver.name,
            &format!("Registered driver #{}", driver.id),
        );
        Ok(driver)
    }

    pub fn rename(pool: &mut DbPool, id: i64, name: &str) -> AppResult<Driver> {
        validate_name(name)?;

        let mut driver =
            drivers::get(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Driver", id))?;
        let old = std::mem::replace(&mut driver.name, name.trim().to_string());
        drivers::update(&pool.conn, &driver)?;

        audit_quiet(
            &pool.conn,
            "driver_edit",
            &driver.name,
            &format!("Renamed driver #{id} (was '{old}')"),
        );
        Ok(driver)
    }

    /// Reports keep the dangling driver id and show an unknown driver.
    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<Driver> {
        let driver =
            drivers::get(&pool.conn, id)?.ok_or_else(|| AppError::not_found("Driver", id))?;
        drivers::delete_by_id(&pool.conn, id)?;

        audit_quiet(
            &pool.conn,
            "driver_del",
            &driver.name,
            &format!("Deleted driver #{id}"),
        );
        Ok(driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rename_delete() {
        let mut pool = DbPool::in_memory().unwrap();
        let d = DriverLogic::add(&mut pool, " Tanaka ").unwrap();
        assert_eq!(d.name, "Tanaka");

        let renamed = DriverLogic::rename(&mut pool, d.id, "Tanaka K.").unwrap();
        assert_eq!(renamed.name, "Tanaka K.");

        assert!(matches!(
            DriverLogic::rename(&mut pool, d.id, ""),
            Err(AppError::Validation(_))
        ));

        DriverLogic::delete(&mut pool, d.id).unwrap();
        assert!(drivers::select_all(&pool.conn).unwrap().is_empty());
    }
}
