use predicates::str::contains;

mod common;
use common::{count, ct, init_db_with_crew, open, setup_test_db};

fn confirm(db_path: &str, date: &str) {
    ct().args(["--db", db_path, "confirm", date, "--crew", "Alpha"])
        .assert()
        .success();
}

fn buckets(db_path: &str, date: &str, member_id: i64) -> (i64, i64, i64) {
    open(db_path)
        .query_row(
            "SELECT working_minutes, traveling_minutes, standby_minutes
             FROM time_entries WHERE date = ?1 AND member_id = ?2",
            rusqlite::params![date, member_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .expect("entry row")
}

#[test]
fn test_member_breakdown_is_saved() {
    let db_path = setup_test_db("breakdown_member");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

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
        "--traveling",
        "1.5",
        "--item",
        "setup=07:45-08:15,Loading the van",
    ])
    .assert()
    .success()
    .stdout(contains("Breakdown saved for 1 entries"));

    assert_eq!(buckets(&db_path, "2025-09-01", 1), (360, 90, 0));
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM hours_breakdown"), 3);
    assert_eq!(
        count(
            &db_path,
            "SELECT minutes FROM hours_breakdown WHERE breakdown_type = 'setup'"
        ),
        30
    );
}

#[test]
fn test_breakdown_above_total_is_rejected() {
    let db_path = setup_test_db("breakdown_exceeds");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

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
        "7",
        "--standby",
        "1.5",
    ])
    .assert()
    .failure()
    .stderr(contains("exceed"));

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM hours_breakdown"), 0);
    assert_eq!(buckets(&db_path, "2025-09-01", 1), (0, 0, 0));
}

#[test]
fn test_group_breakdown_checks_every_member() {
    let db_path = setup_test_db("breakdown_group");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    // 8.25h fits Bob's 8.5h shift but not Alice's or Carol's 8h
    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--group", "--working",
        "8.25",
    ])
    .assert()
    .failure()
    .stderr(contains("Alice"));

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM hours_breakdown"), 0);

    // no --member: the whole crew
    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--working", "7",
        "--traveling", "1",
    ])
    .assert()
    .success()
    .stdout(contains("Breakdown saved for 3 entries"));

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM hours_breakdown"), 6);
    assert_eq!(buckets(&db_path, "2025-09-01", 2), (420, 60, 0));
}

#[test]
fn test_breakdown_without_entries_fails() {
    let db_path = setup_test_db("breakdown_no_entries");
    init_db_with_crew(&db_path);

    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--working", "1",
    ])
    .assert()
    .failure()
    .stderr(contains("No time entries"));
}

#[test]
fn test_unknown_category_is_rejected() {
    let db_path = setup_test_db("breakdown_bad_category");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--item", "lunch=1",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid breakdown category"));
}

#[test]
fn test_shorter_correction_clears_breakdown() {
    let db_path = setup_test_db("breakdown_cleared");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--member", "1",
        "--working", "7.5",
    ])
    .assert()
    .success();

    ct().args([
        "--db",
        &db_path,
        "correct",
        "2025-09-01",
        "--crew",
        "Alpha",
        "--member",
        "1=09:00-15:00",
    ])
    .assert()
    .success()
    .stdout(contains("Breakdown of Alice"));

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM hours_breakdown"), 0);
    assert_eq!(buckets(&db_path, "2025-09-01", 1), (0, 0, 0));
}

#[test]
fn test_breakdown_details_are_listed() {
    let db_path = setup_test_db("breakdown_details");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args([
        "--db",
        &db_path,
        "breakdown",
        "2025-09-01",
        "--crew",
        "Alpha",
        "--member",
        "2",
        "--item",
        "traveling=2,Drive to site",
    ])
    .assert()
    .success();

    ct().args([
        "--db", &db_path, "list", "--period", "2025-09-01", "--member", "2", "--details",
    ])
    .assert()
    .success()
    .stdout(contains("traveling"))
    .stdout(contains("Drive to site"));
}

#[test]
fn test_huge_hour_amounts_are_rejected() {
    let db_path = setup_test_db("breakdown_huge_hours");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--member", "1",
        "--working", "1e300", "--traveling", "1e300",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid hours"));

    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--member", "1",
        "--standby", "25",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid hours"));

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM hours_breakdown"), 0);
    assert_eq!(buckets(&db_path, "2025-09-01", 1), (0, 0, 0));
}

#[test]
fn test_timed_item_ending_before_start_is_rejected() {
    let db_path = setup_test_db("breakdown_reversed_item");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--member", "1",
        "--item", "traveling=08:30-08:00",
    ])
    .assert()
    .failure()
    .stderr(contains("must be later than start"));

    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--member", "1",
        "--item", "traveling=08:30-08:30",
    ])
    .assert()
    .failure();

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM hours_breakdown"), 0);
}

#[test]
fn test_breakdown_help_names_the_crew_default() {
    ct().args(["breakdown", "--help"])
        .assert()
        .success()
        .stdout(contains("default without --member"));
}
