use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count_rows(pool: &DbPool, table: &str) -> AppResult<i64> {
    Ok(pool
        .conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })?)
}

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) COLLECTIONS
    //
    for table in ["vehicles", "drivers", "reports"] {
        let n = count_rows(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, table, RESET, GREEN, n, RESET);
    }

    //
    // 3) REPORT DATE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row("SELECT MIN(date), MAX(date) FROM reports", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let dash = format!("{GREY}--{RESET}");

    println!("{}• Report dates:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(|| dash.clone()));
    println!("    to:   {}", last.unwrap_or(dash));

    //
    // 4) DANGLING REFERENCES
    //
    let dangling: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM reports
         WHERE vehicle_id NOT IN (SELECT id FROM vehicles)
            OR driver_id NOT IN (SELECT id FROM drivers)",
        [],
        |row| row.get(0),
    )?;
    if dangling > 0 {
        println!(
            "{}• Reports with unknown vehicle/driver:{} {}{}{}",
            CYAN, RESET, YELLOW, dangling, RESET
        );
    }

    println!();
    Ok(())
}
