use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

const INITIAL_SCHEMA: &str = "20250901_0001_initial_schema";
const RUN_KM_HINT: &str = "20251010_0002_add_run_km_hint";

/// Ensure that the `log` table exists. It also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Vehicles, drivers and reports. References between them are plain
/// integers without FOREIGN KEY constraints: deleting a vehicle or a driver
/// leaves its reports in place.
fn create_base_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS vehicles (
            id                     INTEGER PRIMARY KEY AUTOINCREMENT,
            name                   TEXT NOT NULL,
            oil_change_km          INTEGER NOT NULL DEFAULT 0,
            element_parity         INTEGER NOT NULL DEFAULT 0 CHECK(element_parity IN (0,1)),
            last_km                INTEGER NOT NULL DEFAULT 0,
            created_at             TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS drivers (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS reports (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            vehicle_id    INTEGER NOT NULL,
            driver_id     INTEGER NOT NULL,
            date          TEXT NOT NULL,
            site_name     TEXT NOT NULL DEFAULT '',
            destination   TEXT NOT NULL DEFAULT '',
            last_km       INTEGER,
            condition     TEXT NOT NULL DEFAULT 'good' CHECK(condition IN ('good','issue')),
            issue_detail  TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reports_vehicle_date ON reports(vehicle_id, date);
        CREATE INDEX IF NOT EXISTS idx_reports_driver ON reports(driver_id);
        CREATE INDEX IF NOT EXISTS idx_reports_date ON reports(date);
        "#,
    )?;
    Ok(())
}

fn migrate_add_run_km_hint(conn: &Connection) -> Result<()> {
    if !table_has_column(conn, "reports", "run_km")? {
        conn.execute("ALTER TABLE reports ADD COLUMN run_km INTEGER;", [])?;
    }
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called from `db::initialize::init_db()` every time a database is opened,
/// so each step must be idempotent.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let steps: [(&str, &str, fn(&Connection) -> Result<()>); 2] = [
        (
            INITIAL_SCHEMA,
            "Created vehicles, drivers and reports tables",
            create_base_tables,
        ),
        (
            RUN_KM_HINT,
            "Added run_km column to reports",
            migrate_add_run_km_hint,
        ),
    ];

    for (version, message, apply) in steps {
        if is_applied(conn, version)? {
            continue;
        }

        apply(conn).map_err(|e| AppError::Migration(format!("{version}: {e}")))?;
        mark_applied(conn, version, message)?;
        tracing::info!(version, "migration applied");
        success(format!("Migration applied: {version}"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(applied, 2);
        assert!(table_has_column(&conn, "reports", "run_km").unwrap());
    }
}
