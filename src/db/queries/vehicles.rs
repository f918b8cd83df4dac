use crate::errors::{AppError, AppResult};
use crate::models::vehicle::Vehicle;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        id: row.get("id")?,
        name: row.get("name")?,
        oil_change_baseline_km: row.get("oil_change_km")?,
        element_change_parity: row.get("element_parity")?,
        last_known_km: row.get("last_km")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert(conn: &Connection, v: &Vehicle) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO vehicles (name, oil_change_km, element_parity, last_km, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            v.name,
            v.oil_change_baseline_km,
            v.element_change_parity,
            v.last_known_km,
            v.created_at,
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, "vehicle inserted");
    Ok(id)
}

/// Insert keeping the given id (backup import).
pub fn insert_with_id(conn: &Connection, v: &Vehicle) -> AppResult<()> {
    conn.execute(
        "INSERT INTO vehicles (id, name, oil_change_km, element_parity, last_km, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            v.id,
            v.name,
            v.oil_change_baseline_km,
            v.element_change_parity % 2,
            v.last_known_km,
            v.created_at,
        ],
    )?;
    Ok(())
}

/// Full replace of the mutable fields.
pub fn update(conn: &Connection, v: &Vehicle) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE vehicles
         SET name = ?1, oil_change_km = ?2, element_parity = ?3, last_km = ?4
         WHERE id = ?5",
        params![
            v.name,
            v.oil_change_baseline_km,
            v.element_change_parity,
            v.last_known_km,
            v.id,
        ],
    )?;
    if changed == 0 {
        return Err(AppError::not_found("Vehicle", v.id));
    }
    Ok(())
}

/// Write only the cached odometer.
pub fn update_last_known_km(conn: &Connection, id: i64, km: i64) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE vehicles SET last_km = ?1 WHERE id = ?2",
        params![km, id],
    )?;
    if changed == 0 {
        return Err(AppError::not_found("Vehicle", id));
    }
    Ok(())
}

pub fn delete_by_id(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM vehicles WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::not_found("Vehicle", id));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Option<Vehicle>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM vehicles WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// All vehicles, newest registration first (as the vehicle page lists them).
pub fn select_all(conn: &Connection) -> AppResult<Vec<Vehicle>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM vehicles ORDER BY id DESC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_all(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM vehicles", [])?)
}
