use super::SortOrder;
use crate::errors::{AppError, AppResult};
use crate::models::condition::Condition;
use crate::models::report::TripReport;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};

/// Equality / range filter for report selects. Empty filter = everything.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub vehicle_id: Option<i64>,
    pub driver_id: Option<i64>,
    /// Inclusive date bounds.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl ReportFilter {
    pub fn for_vehicle(vehicle_id: i64) -> Self {
        Self {
            vehicle_id: Some(vehicle_id),
            ..Self::default()
        }
    }

    /// Same test as the SQL `WHERE`, for rows already in memory.
    pub fn matches(&self, r: &TripReport) -> bool {
        self.vehicle_id.is_none_or(|v| r.vehicle_id == v)
            && self.driver_id.is_none_or(|d| r.driver_id == d)
            && self
                .date_range
                .is_none_or(|(from, to)| r.date >= from && r.date <= to)
    }

    fn where_clause(&self) -> (String, Vec<Value>) {
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        if let Some(v) = self.vehicle_id {
            clauses.push("vehicle_id = ?");
            values.push(Value::Integer(v));
        }
        if let Some(d) = self.driver_id {
            clauses.push("driver_id = ?");
            values.push(Value::Integer(d));
        }
        if let Some((from, to)) = self.date_range {
            clauses.push("date BETWEEN ? AND ?");
            values.push(Value::Text(from.format("%Y-%m-%d").to_string()));
            values.push(Value::Text(to.format("%Y-%m-%d").to_string()));
        }

        if clauses.is_empty() {
            (String::new(), values)
        } else {
            (format!("WHERE {}", clauses.join(" AND ")), values)
        }
    }
}

/// Read the odometer column leniently: legacy or imported rows may hold
/// NULL, text or a float.
fn odometer_from_value(value: Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(i),
        Value::Real(f) if f.is_finite() => Some(f as i64),
        Value::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn map_row(row: &Row) -> rusqlite::Result<TripReport> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let cond_str: String = row.get("condition")?;
    let condition = Condition::from_db_str(&cond_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidCondition(cond_str.clone())),
        )
    })?;

    Ok(TripReport {
        id: row.get("id")?,
        vehicle_id: row.get("vehicle_id")?,
        driver_id: row.get("driver_id")?,
        date,
        site_name: row.get("site_name")?,
        destination: row.get("destination")?,
        last_odometer_km: odometer_from_value(row.get("last_km")?),
        condition,
        issue_detail: row.get("issue_detail")?,
        run_km: row.get("run_km")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert(conn: &Connection, r: &TripReport) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO reports (vehicle_id, driver_id, date, site_name, destination,
                              last_km, condition, issue_detail, run_km, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            r.vehicle_id,
            r.driver_id,
            r.date_str(),
            r.site_name,
            r.destination,
            r.last_odometer_km,
            r.condition.to_db_str(),
            r.issue_detail,
            r.run_km,
            r.created_at,
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, vehicle_id = r.vehicle_id, "report inserted");
    Ok(id)
}

/// Insert keeping the given id (backup import).
pub fn insert_with_id(conn: &Connection, r: &TripReport) -> AppResult<()> {
    conn.execute(
        "INSERT INTO reports (id, vehicle_id, driver_id, date, site_name, destination,
                              last_km, condition, issue_detail, run_km, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            r.id,
            r.vehicle_id,
            r.driver_id,
            r.date_str(),
            r.site_name,
            r.destination,
            r.last_odometer_km,
            r.condition.to_db_str(),
            r.issue_detail,
            r.run_km,
            r.created_at,
        ],
    )?;
    Ok(())
}

/// Full replace of the mutable fields.
pub fn update(conn: &Connection, r: &TripReport) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE reports
         SET vehicle_id = ?1, driver_id = ?2, date = ?3, site_name = ?4, destination = ?5,
             last_km = ?6, condition = ?7, issue_detail = ?8, run_km = ?9
         WHERE id = ?10",
        params![
            r.vehicle_id,
            r.driver_id,
            r.date_str(),
            r.site_name,
            r.destination,
            r.last_odometer_km,
            r.condition.to_db_str(),
            r.issue_detail,
            r.run_km,
            r.id,
        ],
    )?;
    if changed == 0 {
        return Err(AppError::not_found("Report", r.id));
    }
    Ok(())
}

pub fn update_run_km(conn: &Connection, id: i64, run_km: i64) -> AppResult<()> {
    conn.execute(
        "UPDATE reports SET run_km = ?1 WHERE id = ?2",
        params![run_km, id],
    )?;
    Ok(())
}

pub fn delete_by_id(conn: &Connection, id: i64) -> AppResult<()> {
    let changed = conn.execute("DELETE FROM reports WHERE id = ?1", [id])?;
    if changed == 0 {
        return Err(AppError::not_found("Report", id));
    }
    Ok(())
}

pub fn get(conn: &Connection, id: i64) -> AppResult<Option<TripReport>> {
    let mut stmt = conn.prepare_cached("SELECT * FROM reports WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

/// Select with filter, ordered by date (ties by id in the same direction).
pub fn select(
    conn: &Connection,
    filter: &ReportFilter,
    order: SortOrder,
) -> AppResult<Vec<TripReport>> {
    let (where_sql, values) = filter.where_clause();
    let sql = format!(
        "SELECT * FROM reports {} ORDER BY date {dir}, id {dir}",
        where_sql,
        dir = order.sql()
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn select_all(conn: &Connection) -> AppResult<Vec<TripReport>> {
    select(conn, &ReportFilter::default(), SortOrder::Asc)
}

/// Distinct non-empty values of a free-text column, alphabetically.
pub fn distinct_values(conn: &Connection, column: TextColumn) -> AppResult<Vec<String>> {
    let sql = format!(
        "SELECT DISTINCT {col} FROM reports WHERE TRIM({col}) <> '' ORDER BY {col} ASC",
        col = column.name()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColumn {
    SiteName,
    Destination,
}

impl TextColumn {
    fn name(&self) -> &'static str {
        match self {
            TextColumn::SiteName => "site_name",
            TextColumn::Destination => "destination",
        }
    }
}

pub fn count(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))?)
}

pub fn delete_all(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM reports", [])?)
}
