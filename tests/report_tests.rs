use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{fl, init_db_with_fleet, init_db_with_reports, ok, setup_test_db};

#[test]
fn test_report_runs_are_differences() {
    let db_path = setup_test_db("report_runs");
    init_db_with_reports(&db_path);

    fl().args(["--db", &db_path, "report", "list"])
        .assert()
        .success()
        .stdout(
            contains("Hiace")
                .and(contains("100 km"))
                .and(contains("150 km"))
                .and(contains("Sato")),
        );
}

#[test]
fn test_report_added_out_of_order() {
    let db_path = setup_test_db("report_out_of_order");
    init_db_with_fleet(&db_path);

    for (date, km) in [("2025-09-03", "400"), ("2025-09-01", "100")] {
        ok(
            &db_path,
            &["report", "add", "--vehicle", "Hiace", "--driver", "Sato", "--odometer", km, "--date", date],
        );
    }

    fl().args([
        "--db", &db_path, "report", "add", "--vehicle", "1", "--driver", "1", "--odometer",
        "250", "--date", "2025-09-02",
    ])
    .assert()
    .success()
    .stdout(contains("Run: 150 km"));
}

#[test]
fn test_rollback_is_flagged_not_clamped() {
    let db_path = setup_test_db("report_rollback");
    init_db_with_fleet(&db_path);

    ok(
        &db_path,
        &["report", "add", "--vehicle", "1", "--driver", "1", "--odometer", "300", "--date", "2025-09-01"],
    );
    fl().args([
        "--db", &db_path, "report", "add", "--vehicle", "1", "--driver", "1", "--odometer",
        "200", "--date", "2025-09-02",
    ])
    .assert()
    .success()
    .stdout(contains("lower than the previous reading").and(contains("-100 km")));

    fl().args(["--db", &db_path, "report", "list"])
        .assert()
        .success()
        .stdout(contains("-100 km").and(contains("odometer went backwards")));
}

#[test]
fn test_missing_odometer_shows_previous_reading() {
    let db_path = setup_test_db("report_missing_odometer");
    init_db_with_reports(&db_path);

    fl().args(["--db", &db_path, "report", "add", "--vehicle", "1", "--driver", "1"])
        .assert()
        .failure()
        .stdout(contains("Previous reading for Hiace: 400 km"))
        .stderr(contains("odometer reading (km) is required"));
}

#[test]
fn test_unknown_vehicle_is_rejected_on_add() {
    let db_path = setup_test_db("report_unknown_vehicle");
    init_db_with_fleet(&db_path);

    fl().args([
        "--db", &db_path, "report", "add", "--vehicle", "7", "--driver", "1", "--odometer", "10",
    ])
    .assert()
    .failure()
    .stderr(contains("Vehicle #7 not found"));
}

#[test]
fn test_issue_then_good() {
    let db_path = setup_test_db("report_issue_good");
    init_db_with_fleet(&db_path);

    fl().args([
        "--db", &db_path, "report", "add", "--vehicle", "1", "--driver", "1", "--odometer", "50",
        "--date", "2025-09-01", "--issue", "brake noise",
    ])
    .assert()
    .success()
    .stdout(contains("Issue reported"));

    fl().args(["--db", &db_path, "report", "list"])
        .assert()
        .success()
        .stdout(contains("brake noise"));

    ok(&db_path, &["report", "edit", "1", "--good"]);
    fl().args(["--db", &db_path, "report", "list"])
        .assert()
        .success()
        .stdout(contains("good").and(contains("brake noise").not()));
}

#[test]
fn test_list_filters_by_period_and_driver() {
    let db_path = setup_test_db("report_list_filters");
    init_db_with_reports(&db_path);
    ok(&db_path, &["driver", "add", "--name", "Suzuki"]);
    ok(
        &db_path,
        &["report", "add", "--vehicle", "1", "--driver", "Suzuki", "--odometer", "480", "--date", "2025-10-01"],
    );

    fl().args(["--db", &db_path, "report", "list", "--period", "2025-10"])
        .assert()
        .success()
        .stdout(contains("Suzuki").and(contains("80 km")).and(contains("2025-09-01").not()));

    fl().args(["--db", &db_path, "report", "list", "--driver", "Sato", "--date", "2025-09-02"])
        .assert()
        .success()
        .stdout(contains("150 km").and(contains("2025-09-03").not()));
}

#[test]
fn test_delete_recomputes_next_run() {
    let db_path = setup_test_db("report_delete");
    init_db_with_reports(&db_path);

    ok(&db_path, &["report", "del", "2", "--yes"]);
    fl().args(["--db", &db_path, "report", "list"])
        .assert()
        .success()
        .stdout(contains("300 km"));
}

#[test]
fn test_suggestions() {
    let db_path = setup_test_db("report_suggest");
    init_db_with_fleet(&db_path);
    ok(
        &db_path,
        &[
            "report", "add", "--vehicle", "1", "--driver", "1", "--odometer", "10", "--site",
            "Kobe yard", "--destination", "Osaka port",
        ],
    );

    fl().args(["--db", &db_path, "report", "suggest", "--sites"])
        .assert()
        .success()
        .stdout(contains("Kobe yard").and(contains("Osaka port").not()));
}

#[test]
fn test_relative_date_argument() {
    let db_path = setup_test_db("report_relative_date");
    init_db_with_fleet(&db_path);

    let yesterday = (chrono::Local::now().date_naive() - chrono::Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();

    fl().args([
        "--db", &db_path, "report", "add", "--vehicle", "1", "--driver", "1", "--odometer", "10",
        "--date", "-1",
    ])
    .assert()
    .success()
    .stdout(contains(yesterday));
}
