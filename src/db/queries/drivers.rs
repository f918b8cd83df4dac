use crate::errors::{AppError, AppResult};
use crate::models::driver::Driver;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Driver> {
    Ok(Driver {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert(conn: &Connection, driver: &Driver) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO drivers (name, created_at) VALUES (?1, ?2)",
        params![driver.name, driver.created_at],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, "driver inserted");
    Ok(id)
}

/// Insert keeping the given id (backup import).
pub fn insert_with_id(conn: &Connection, driver: &Driver) -> AppResult<()> {
    conn.execute(
        "INSERT INTO drivers (id, name, created_at) VALUES (?1, ?2, ?3)",
        params![driver.id, driver.name, driver.created_at],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, driver: &Driver) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE drivers SET name = ?1 WHERE id = ?2",
        params![driver.name, driver.id],
    )?;
    if changed == 0 {
        return Err(AppError::not_found("Driver", driver.id));
    }
    Ok(())
}

pub fn delete_by_id(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM drivers WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::not_found("Driver", id));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Option<Driver>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM drivers WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// All drivers in registration order.
pub fn select_all(conn: &Connection) -> AppResult<Vec<Driver>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM drivers ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_all(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM drivers", [])?)
}
