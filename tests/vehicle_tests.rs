use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{fl, init_db_with_fleet, init_db_with_reports, ok, setup_test_db};

#[test]
fn test_vehicle_add_and_list() {
    let db_path = setup_test_db("vehicle_add_list");
    init_db_with_fleet(&db_path);

    fl().args(["--db", &db_path, "vehicle", "list"])
        .assert()
        .success()
        .stdout(contains("Hiace").and(contains("replaced")));
}

#[test]
fn test_vehicle_add_requires_name_and_baseline() {
    let db_path = setup_test_db("vehicle_add_required");
    ok(&db_path, &["--test", "init"]);

    fl().args(["--db", &db_path, "vehicle", "add", "--baseline", "100"])
        .assert()
        .failure()
        .stderr(contains("vehicle name is required"));

    fl().args(["--db", &db_path, "vehicle", "add", "--name", "Canter"])
        .assert()
        .failure()
        .stderr(contains("baseline"));

    fl().args(["--db", &db_path, "vehicle", "list"])
        .assert()
        .success()
        .stdout(contains("No vehicles registered"));
}

#[test]
fn test_vehicle_edit_and_missing_id() {
    let db_path = setup_test_db("vehicle_edit");
    init_db_with_fleet(&db_path);

    ok(&db_path, &["vehicle", "edit", "1", "--name", "Hiace 2", "--element-changed", "false"]);
    fl().args(["--db", &db_path, "vehicle", "list"])
        .assert()
        .success()
        .stdout(contains("Hiace 2").and(contains("kept")));

    fl().args(["--db", &db_path, "vehicle", "edit", "9", "--name", "x"])
        .assert()
        .failure()
        .stderr(contains("Vehicle #9 not found"));
}

#[test]
fn test_vehicle_delete_keeps_reports_with_placeholder() {
    let db_path = setup_test_db("vehicle_delete_placeholder");
    init_db_with_reports(&db_path);

    fl().args(["--db", &db_path, "vehicle", "del", "1", "--yes"])
        .assert()
        .success()
        .stdout(contains("3 reports kept"));

    fl().args(["--db", &db_path, "report", "list"])
        .assert()
        .success()
        .stdout(contains("(unknown vehicle)").and(contains("150 km")));
}

#[test]
fn test_oil_change_defaults_to_latest_reading() {
    let db_path = setup_test_db("vehicle_oil_change");
    init_db_with_reports(&db_path);

    fl().args(["--db", &db_path, "vehicle", "oil-change", "1"])
        .assert()
        .success()
        .stdout(contains("at 400 km").and(contains("Next oil change at 5,400 km")));

    fl().args(["--db", &db_path, "vehicle", "oil-change", "1", "--odometer", "300"])
        .assert()
        .failure()
        .stderr(contains("Invalid input"));
}

#[test]
fn test_sync_reports_nothing_when_cache_matches() {
    let db_path = setup_test_db("vehicle_sync");
    init_db_with_reports(&db_path);

    fl().args(["--db", &db_path, "vehicle", "sync"])
        .assert()
        .success()
        .stdout(contains("match the report history"));

    fl().args(["--db", &db_path, "vehicle", "list"])
        .assert()
        .success()
        .stdout(contains("400 km"));
}
