use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{fl, init_db_with_fleet, init_db_with_reports, setup_test_db, temp_out, test_home};

#[test]
fn test_log_records_mutations() {
    let db_path = setup_test_db("admin_log");
    init_db_with_reports(&db_path);

    fl().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(
            contains("migration_applied")
                .and(contains("vehicle_add"))
                .and(contains("report_add")),
        );
}

#[test]
fn test_db_check_and_info() {
    let db_path = setup_test_db("admin_db");
    init_db_with_reports(&db_path);

    fl().args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed").and(contains("reports")));
}

#[test]
fn test_backup_compressed() {
    let db_path = setup_test_db("admin_backup");
    let out = temp_out("admin_backup", "sqlite");
    let zipped = out.replace(".sqlite", ".zip");
    fs::remove_file(&zipped).ok();
    init_db_with_fleet(&db_path);

    fl().args(["--db", &db_path, "backup", "--file", &out, "--compress"])
        .assert()
        .success()
        .stdout(contains("Backup created"));

    assert!(fs::metadata(&zipped).is_ok());
}

#[test]
fn test_password_gate() {
    let db_path = setup_test_db("admin_password");
    init_db_with_fleet(&db_path);

    // a dedicated HOME holding a config with a password
    let home = test_home().join("locked");
    let conf_dir = home.join(".fleetlog");
    fs::create_dir_all(&conf_dir).expect("config dir");
    fs::write(
        conf_dir.join("fleetlog.conf"),
        format!("database: {db_path}\naccess_password: depot\n"),
    )
    .expect("write config");

    fl().env("HOME", &home)
        .args(["vehicle", "list"])
        .assert()
        .failure()
        .stderr(contains("Access denied"));

    fl().env("HOME", &home)
        .env("FLEETLOG_PASSWORD", "depot")
        .args(["vehicle", "list"])
        .assert()
        .success()
        .stdout(contains("Hiace"));

    fl().env("HOME", &home)
        .args(["--password", "wrong", "login"])
        .assert()
        .failure();

    fl().env("HOME", &home)
        .args(["--password", "depot", "login"])
        .assert()
        .success()
        .stdout(contains("Access granted"));
}
