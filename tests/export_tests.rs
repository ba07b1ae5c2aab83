use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{ct, init_db_with_crew, setup_test_db, temp_out};

fn seed(db_path: &str) {
    init_db_with_crew(db_path);
    ct().args(["--db", db_path, "confirm", "2025-09-01", "--crew", "Alpha"])
        .assert()
        .success();
    ct().args([
        "--db", db_path, "correct", "2025-10-01", "--crew", "Alpha", "--in", "07:00", "--out",
        "18:00",
    ])
    .assert()
    .success();
}

#[test]
fn test_export_csv_with_range() {
    let db_path = setup_test_db("export_csv_range");
    let out = temp_out("export_csv_range", "csv");
    seed(&db_path);

    ct().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--range", "2025-09",
    ])
    .assert()
    .success()
    .stdout(contains("3 rows"));

    let content = fs::read_to_string(&out).expect("read csv");
    let mut lines = content.lines();
    let header = lines.next().expect("csv header");
    assert!(header.starts_with("id,date,crew,member,role,start_time,end_time,hours_total"));
    assert_eq!(lines.count(), 3);
    assert!(content.contains("Alice"));
    assert!(content.contains("8.5"));
    assert!(!content.contains("2025-10-01"));
}

#[test]
fn test_export_json_all() {
    let db_path = setup_test_db("export_json_all");
    let out = temp_out("export_json_all", "json");
    seed(&db_path);

    ct().args(["--db", &db_path, "export", "--format", "json", "--file", &out])
        .assert()
        .success();

    let content = fs::read_to_string(&out).expect("read json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 6);

    let alice_october = rows
        .iter()
        .find(|r| r["date"] == "2025-10-01" && r["member"] == "Alice")
        .expect("Alice on 2025-10-01");
    assert_eq!(alice_october["hours_total"], 11.0);
    assert_eq!(alice_october["hours_overtime"], 3.0);
    assert_eq!(alice_october["labor_cost"], 330.0);
    assert_eq!(alice_october["status"], "draft");
}

#[test]
fn test_export_breakdown_rows() {
    let db_path = setup_test_db("export_breakdown");
    let out = temp_out("export_breakdown", "csv");
    seed(&db_path);

    ct().args([
        "--db",
        &db_path,
        "breakdown",
        "2025-09-01",
        "--crew",
        "Alpha",
        "--member",
        "1",
        "--working",
        "6",
        "--item",
        "standby=15:00-17:00,Waiting for parts",
    ])
    .assert()
    .success();

    ct().args([
        "--db", &db_path, "export", "--file", &out, "--range", "2025-09-01", "--breakdown",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read csv");
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("Waiting for parts"));
    assert!(content.contains("15:00"));
}

#[test]
fn test_export_relative_path_is_rejected() {
    let db_path = setup_test_db("export_relative");
    seed(&db_path);

    ct().args(["--db", &db_path, "export", "--file", "relative.csv"])
        .assert()
        .failure()
        .stderr(contains("must be absolute"));
}

#[test]
fn test_export_empty_range_writes_nothing() {
    let db_path = setup_test_db("export_empty");
    let out = temp_out("export_empty", "csv");
    seed(&db_path);

    ct().args(["--db", &db_path, "export", "--file", &out, "--range", "2024"])
        .assert()
        .success()
        .stdout(contains("Nothing to export"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_list_period_filters_entries() {
    let db_path = setup_test_db("list_period");
    seed(&db_path);

    ct().args(["--db", &db_path, "list", "--period", "2025-10"])
        .assert()
        .success()
        .stdout(contains("2025-10-01"))
        .stdout(contains("2025-09-01").not())
        .stdout(contains("11.00"))
        .stdout(contains("draft"));

    ct().args(["--db", &db_path, "list", "--period", "2025-09:2025-10", "--crew", "Alpha"])
        .assert()
        .success()
        .stdout(contains("6 entries"));
}

#[test]
fn test_backup_copy_and_zip() {
    let db_path = setup_test_db("backup_db");
    let out = temp_out("backup_db", "sqlite");
    let zip = temp_out("backup_db", "zip");
    seed(&db_path);

    ct().args(["--db", &db_path, "backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup created"));
    assert!(std::path::Path::new(&out).exists());

    ct().args(["--db", &db_path, "backup", "--file", &out, "--compress", "-f"])
        .assert()
        .success();
    assert!(std::path::Path::new(&zip).exists());

    ct().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("backup"))
        .stdout(contains("confirm"));
}
