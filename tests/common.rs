#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use rusqlite::Connection;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ct() -> Command {
    cargo_bin_cmd!("crewtime")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_crewtime.sqlite", name));
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

/// Initialize the DB with crew "Alpha" (id 1) and three members:
///  - 1 Alice, foreman, rate 30, default shift 09:00-17:00
///  - 2 Bob, own shift 08:00-16:30
///  - 3 Carol, default shift
pub fn init_db_with_crew(db_path: &str) {
    ct().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    ct().args(["--db", db_path, "crew", "add", "Alpha"])
        .assert()
        .success();

    ct().args([
        "--db", db_path, "member", "add", "Alice", "--crew", "Alpha", "--role", "Foreman",
        "--rate", "30",
    ])
    .assert()
    .success();

    ct().args([
        "--db", db_path, "member", "add", "Bob", "--crew", "1", "--shift", "08:00-16:30",
    ])
    .assert()
    .success();

    ct().args(["--db", db_path, "member", "add", "Carol", "--crew", "Alpha"])
        .assert()
        .success();
}

pub fn open(db_path: &str) -> Connection {
    Connection::open(db_path).expect("open db")
}

pub fn count(db_path: &str, sql: &str) -> i64 {
    open(db_path)
        .query_row(sql, [], |r| r.get(0))
        .expect("count query")
}

/// (start, end, regular, overtime, status) of a member's entry on a date.
pub fn entry_of(db_path: &str, date: &str, member_id: i64) -> (String, String, i64, i64, String) {
    open(db_path)
        .query_row(
            "SELECT start_time, end_time, regular_minutes, overtime_minutes, status
             FROM time_entries WHERE date = ?1 AND member_id = ?2",
            rusqlite::params![date, member_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?)),
        )
        .expect("entry row")
}
