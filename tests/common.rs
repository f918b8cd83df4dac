#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Private HOME for the binary, so a real user config never leaks in.
pub fn test_home() -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("fleetlog_home_{}", std::process::id()));
    fs::create_dir_all(&path).ok();
    path
}

pub fn fl() -> Command {
    let home = test_home();
    let mut cmd = cargo_bin_cmd!("fleetlog");
    cmd.env("HOME", &home)
        .env("APPDATA", &home)
        .env_remove("FLEETLOG_PASSWORD")
        .env_remove("FLEETLOG_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fleetlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Run a fleetlog command against `db_path` and expect success.
pub fn ok(db_path: &str, args: &[&str]) {
    fl().args(["--db", db_path]).args(args).assert().success();
}

/// Initialize DB with one vehicle (#1 "Hiace", baseline 0) and one
/// driver (#1 "Sato").
pub fn init_db_with_fleet(db_path: &str) {
    ok(db_path, &["--test", "init"]);
    ok(
        db_path,
        &["vehicle", "add", "--name", "Hiace", "--baseline", "0", "--element-changed"],
    );
    ok(db_path, &["driver", "add", "--name", "Sato"]);
}

/// `init_db_with_fleet` plus three reports at 100, 250 and 400 km.
pub fn init_db_with_reports(db_path: &str) {
    init_db_with_fleet(db_path);
    for (date, km) in [("2025-09-01", "100"), ("2025-09-02", "250"), ("2025-09-03", "400")] {
        ok(
            db_path,
            &[
                "report", "add", "--vehicle", "1", "--driver", "1", "--odometer", km, "--date",
                date,
            ],
        );
    }
}
