use predicates::str::contains;

mod common;
use common::{count, ct, entry_of, init_db_with_crew, open, setup_test_db};

fn confirm(db_path: &str, date: &str) {
    ct().args(["--db", db_path, "confirm", date, "--crew", "Alpha"])
        .assert()
        .success();
}

#[test]
fn test_submit_stamps_submitter() {
    let db_path = setup_test_db("status_submit");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args([
        "--db", &db_path, "submit", "2025-09-01", "--crew", "Alpha", "--by", "Alice",
    ])
    .assert()
    .success()
    .stdout(contains("3 entries"));

    let by: String = open(&db_path)
        .query_row(
            "SELECT DISTINCT submitted_by FROM time_entries",
            [],
            |r| r.get(0),
        )
        .expect("submitted_by");
    assert_eq!(by, "Alice");

    // already submitted: nothing left to do
    ct().args([
        "--db", &db_path, "submit", "2025-09-01", "--crew", "Alpha", "--by", "Alice",
    ])
    .assert()
    .success()
    .stdout(contains("Nothing to submit"));
}

#[test]
fn test_submit_without_entries_fails() {
    let db_path = setup_test_db("status_submit_empty");
    init_db_with_crew(&db_path);

    ct().args(["--db", &db_path, "submit", "2025-09-01", "--crew", "Alpha"])
        .assert()
        .failure()
        .stderr(contains("No time entries"));
}

#[test]
fn test_approved_entries_are_locked() {
    let db_path = setup_test_db("status_locked");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args(["--db", &db_path, "submit", "2025-09-01", "--crew", "Alpha"])
        .assert()
        .success();

    ct().args([
        "--db", &db_path, "status", "2025-09-01", "--crew", "Alpha", "--set", "approved",
        "--by", "Supervisor",
    ])
    .assert()
    .success()
    .stdout(contains("3 entries set to approved"));

    ct().args([
        "--db", &db_path, "correct", "2025-09-01", "--crew", "Alpha", "--in", "08:00", "--out",
        "12:00",
    ])
    .assert()
    .failure()
    .stderr(contains("approved"));

    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--working", "1",
    ])
    .assert()
    .failure()
    .stderr(contains("approved"));

    ct().args(["--db", &db_path, "del", "2025-09-01", "--crew", "Alpha", "-y"])
        .assert()
        .failure();

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM time_entries"), 3);
    let (start, _, _, _, status) = entry_of(&db_path, "2025-09-01", 1);
    assert_eq!((start.as_str(), status.as_str()), ("09:00", "approved"));
}

#[test]
fn test_invalid_transition_is_rejected() {
    let db_path = setup_test_db("status_invalid");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    // draft entries cannot be approved directly
    ct().args([
        "--db", &db_path, "status", "2025-09-01", "--crew", "Alpha", "--set", "approved",
    ])
    .assert()
    .failure()
    .stderr(contains("Cannot move entry"));

    ct().args([
        "--db", &db_path, "status", "2025-09-01", "--crew", "Alpha", "--set", "finished",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid entry status"));

    assert_eq!(
        count(&db_path, "SELECT COUNT(*) FROM time_entries WHERE status = 'draft'"),
        3
    );
}

#[test]
fn test_rejected_entry_goes_back_to_draft_on_correction() {
    let db_path = setup_test_db("status_rejected");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args(["--db", &db_path, "submit", "2025-09-01", "--crew", "Alpha"])
        .assert()
        .success();

    ct().args([
        "--db", &db_path, "status", "2025-09-01", "--crew", "Alpha", "--member", "3", "--set",
        "rejected",
    ])
    .assert()
    .success()
    .stdout(contains("1 entries set to rejected"));

    ct().args([
        "--db",
        &db_path,
        "correct",
        "2025-09-01",
        "--crew",
        "Alpha",
        "--member",
        "3=09:00-13:00",
    ])
    .assert()
    .success();

    let (_, _, regular, _, status) = entry_of(&db_path, "2025-09-01", 3);
    assert_eq!((regular, status.as_str()), (240, "draft"));
    assert_eq!(
        count(
            &db_path,
            "SELECT COUNT(*) FROM time_entries WHERE member_id = 3 AND submitted_at IS NULL"
        ),
        1
    );
}

#[test]
fn test_del_removes_entries_and_breakdown() {
    let db_path = setup_test_db("status_del");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args([
        "--db", &db_path, "breakdown", "2025-09-01", "--crew", "Alpha", "--working", "4",
    ])
    .assert()
    .success();

    ct().args([
        "--db", &db_path, "del", "2025-09-01", "--crew", "Alpha", "--member", "2", "-y",
    ])
    .assert()
    .success()
    .stdout(contains("Deleted 1 entries"));

    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM time_entries"), 2);
    assert_eq!(count(&db_path, "SELECT COUNT(*) FROM hours_breakdown"), 2);
}

#[test]
fn test_approving_one_member_does_not_block_the_others() {
    let db_path = setup_test_db("status_partial_approval");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args(["--db", &db_path, "submit", "2025-09-01", "--crew", "Alpha"])
        .assert()
        .success();
    ct().args([
        "--db", &db_path, "status", "2025-09-01", "--crew", "Alpha", "--member", "1", "--set",
        "approved",
    ])
    .assert()
    .success()
    .stdout(contains("1 entries set to approved"));

    // Alice stays as approved, Bob gets his new hours
    ct().args([
        "--db", &db_path, "correct", "2025-09-01", "--crew", "Alpha", "--member",
        "2=08:00-12:00",
    ])
    .assert()
    .success()
    .stdout(contains("left unchanged"));

    let (start, end, _, _, status) = entry_of(&db_path, "2025-09-01", 2);
    assert_eq!(
        (start.as_str(), end.as_str(), status.as_str()),
        ("08:00", "12:00", "draft")
    );
    let (start, _, _, _, status) = entry_of(&db_path, "2025-09-01", 1);
    assert_eq!((start.as_str(), status.as_str()), ("09:00", "approved"));

    // Carol was not named and keeps her submitted entry
    let (_, _, _, _, status) = entry_of(&db_path, "2025-09-01", 3);
    assert_eq!(status, "submitted");

    // confirming again only touches what changes
    confirm(&db_path, "2025-09-01");
    let (start, end, _, _, _) = entry_of(&db_path, "2025-09-01", 2);
    assert_eq!((start.as_str(), end.as_str()), ("08:00", "16:30"));

    // but an approved entry that would change is still refused
    ct().args([
        "--db", &db_path, "correct", "2025-09-01", "--crew", "Alpha", "--member",
        "1=10:00-12:00",
    ])
    .assert()
    .failure()
    .stderr(contains("approved"));
}

#[test]
fn test_submitter_name_comes_from_by_flag() {
    let db_path = setup_test_db("status_submitter_flag");
    init_db_with_crew(&db_path);
    confirm(&db_path, "2025-09-01");

    ct().args([
        "--db", &db_path, "status", "2025-09-01", "--crew", "Alpha", "--member", "2", "--set",
        "submitted", "--by", "Night Shift Lead",
    ])
    .assert()
    .success();

    assert_eq!(
        count(
            &db_path,
            "SELECT COUNT(*) FROM time_entries WHERE submitted_by = 'Night Shift Lead'"
        ),
        1
    );
}
