use chrono::{NaiveDate, NaiveTime};
use crewtime::core::calculator::breakdown::validate_breakdown;
use crewtime::config::Config;
use crewtime::core::calculator::hours::{shift_minutes, split_regular_overtime};
use crewtime::core::crew::CrewLogic;
use crewtime::core::status::StatusLogic;
use crewtime::core::submit::{EntryNotes, submit_day, upsert_entry};
use crewtime::core::verify::{ScheduleDecision, VerifyLogic};
use crewtime::db::initialize::init_db;
use crewtime::db::pool::DbPool;
use crewtime::errors::AppError;
use crewtime::export::range::parse_range;
use crewtime::models::breakdown::{BreakdownCategory, BreakdownItem};
use crewtime::models::crew::{Crew, CrewMember};
use crewtime::models::entry_status::EntryStatus;
use crewtime::models::shift::ShiftTimes;
use crewtime::utils::time::{parse_hours, parse_time};
use std::collections::BTreeMap;

fn t(s: &str) -> NaiveTime {
    parse_time(s).expect("valid time")
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

fn member(id: i64, name: &str, shift: Option<(&str, &str)>) -> CrewMember {
    CrewMember {
        id,
        name: name.to_string(),
        role: None,
        hourly_rate: None,
        crew_id: Some(1),
        active: true,
        scheduled_start: shift.map(|s| t(s.0)),
        scheduled_end: shift.map(|s| t(s.1)),
    }
}

fn crew() -> Crew {
    Crew {
        id: 1,
        name: "Alpha".into(),
        active: true,
    }
}

#[test]
fn test_regular_and_overtime_split() {
    assert_eq!(split_regular_overtime(510, 480), (480, 30));
    assert_eq!(split_regular_overtime(300, 480), (300, 0));
    assert_eq!(split_regular_overtime(480, 480), (480, 0));
}

#[test]
fn test_shift_minutes_requires_end_after_start() {
    assert_eq!(shift_minutes(t("08:00"), t("16:30")).unwrap(), 510);
    assert!(shift_minutes(t("16:30"), t("16:30")).is_err());
    assert!(ShiftTimes::parse("22:00-06:00").is_err());
}

#[test]
fn test_twelve_hour_noon_and_midnight() {
    assert_eq!(t("12:00 PM"), t("12:00"));
    assert_eq!(t("12:15 AM"), t("00:15"));
    assert_eq!(t("1:30pm"), t("13:30"));
}

#[test]
fn test_hour_amounts() {
    assert_eq!(parse_hours("1.5").unwrap(), 90);
    assert_eq!(parse_hours("0,25").unwrap(), 15);
    assert_eq!(parse_hours("7h30m").unwrap(), 450);
    assert_eq!(parse_hours("7:30").unwrap(), 450);
    assert!(parse_hours("-1").is_err());
    assert!(parse_hours("abc").is_err());
    assert_eq!(parse_hours("24").unwrap(), 1440);
    assert!(parse_hours("24.5").is_err());
    assert!(parse_hours("1e300").is_err());
    assert!(parse_hours("inf").is_err());
    assert!(parse_hours("9999999999999999h").is_err());
    assert!(parse_hours("30:00").is_err());
}

#[test]
fn test_breakdown_validation() {
    let items = vec![
        BreakdownItem::new(BreakdownCategory::Working, 300),
        BreakdownItem::new(BreakdownCategory::Traveling, 0).with_times(t("07:00"), t("08:30")),
    ];
    let resolved = validate_breakdown("Alice", 480, &items).unwrap();
    assert_eq!(resolved[1].minutes, 90);

    let too_much = vec![BreakdownItem::new(BreakdownCategory::Standby, 481)];
    assert!(matches!(
        validate_breakdown("Alice", 480, &too_much),
        Err(AppError::BreakdownExceedsTotal { .. })
    ));

    let mismatched =
        vec![BreakdownItem::new(BreakdownCategory::Setup, 20).with_times(t("07:00"), t("07:30"))];
    assert!(validate_breakdown("Alice", 480, &mismatched).is_err());

    let overflowing = vec![
        BreakdownItem::new(BreakdownCategory::Working, i64::MAX),
        BreakdownItem::new(BreakdownCategory::Traveling, i64::MAX),
    ];
    assert!(matches!(
        validate_breakdown("Alice", 480, &overflowing),
        Err(AppError::BreakdownExceedsTotal { .. })
    ));

    let reversed =
        vec![BreakdownItem::new(BreakdownCategory::Traveling, 0).with_times(t("08:30"), t("08:00"))];
    assert!(validate_breakdown("Alice", 480, &reversed).is_err());
}

#[test]
fn test_status_transitions() {
    use EntryStatus::*;
    assert!(Draft.can_move_to(Submitted));
    assert!(Submitted.can_move_to(Approved));
    assert!(Submitted.can_move_to(Rejected));
    assert!(Rejected.can_move_to(Submitted));
    assert!(!Draft.can_move_to(Approved));
    assert!(!Approved.can_move_to(Draft));
    assert!(!Approved.can_move_to(Rejected));
    assert!(Approved.is_locked());
}

#[test]
fn test_resolve_decisions() {
    let members = vec![
        member(1, "Alice", None),
        member(2, "Bob", Some(("08:00", "16:30"))),
    ];
    let default = (t("09:00"), t("17:00"));

    let accepted = VerifyLogic::resolve(&crew(), &members, &ScheduleDecision::Accept, default)
        .unwrap();
    assert_eq!(accepted[0].worked_minutes, 480);
    assert_eq!(accepted[1].worked_minutes, 510);
    assert!(accepted.iter().all(|s| s.difference == 0));

    let mut map = BTreeMap::new();
    map.insert(2, ShiftTimes::new(t("08:00"), t("18:00")).unwrap());
    let corrected =
        VerifyLogic::resolve(&crew(), &members, &ScheduleDecision::Individual(map), default)
            .unwrap();
    assert_eq!(corrected[0].actual, corrected[0].scheduled);
    assert_eq!(corrected[1].difference, 90);

    let mut unknown = BTreeMap::new();
    unknown.insert(9, ShiftTimes::new(t("08:00"), t("18:00")).unwrap());
    assert!(matches!(
        VerifyLogic::resolve(&crew(), &members, &ScheduleDecision::Individual(unknown), default),
        Err(AppError::MemberNotFound(_))
    ));

    let mut inactive = members.clone();
    inactive.iter_mut().for_each(|m| m.active = false);
    assert!(matches!(
        VerifyLogic::resolve(&crew(), &inactive, &ScheduleDecision::Accept, default),
        Err(AppError::EmptyCrew(_))
    ));
}

#[test]
fn test_upsert_keeps_one_row_per_member_and_day() {
    let pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).unwrap();

    let crew = CrewLogic::add_crew(&pool.conn, "Alpha").unwrap();
    let alice = CrewLogic::add_member(&pool.conn, crew.id, "Alice", None, None, None).unwrap();
    let date = d("2025-09-01");

    let first = upsert_entry(
        &pool.conn,
        date,
        crew.id,
        &alice,
        ShiftTimes::new(t("09:00"), t("17:00")).unwrap(),
        480,
        &EntryNotes::default(),
    )
    .unwrap();
    assert!(first.created);

    let second = upsert_entry(
        &pool.conn,
        date,
        crew.id,
        &alice,
        ShiftTimes::new(t("09:00"), t("19:00")).unwrap(),
        480,
        &EntryNotes {
            comments: Some("late delivery"),
            location: Some("Dock 4"),
        },
    )
    .unwrap();
    assert!(!second.created);
    assert_eq!(second.entry.id, first.entry.id);
    assert_eq!(second.entry.overtime_minutes, 120);
    assert_eq!(second.entry.comments, "late delivery");
    assert_eq!(second.entry.location, "Dock 4");

    let rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM time_entries", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    assert_eq!(submit_day(&pool.conn, &date, crew.id, "Alice").unwrap(), 1);
    assert_eq!(submit_day(&pool.conn, &date, crew.id, "Alice").unwrap(), 0);
}

#[test]
fn test_range_expressions() {
    assert_eq!(parse_range("all").unwrap(), None);
    assert_eq!(
        parse_range("2024-02").unwrap(),
        Some((d("2024-02-01"), d("2024-02-29")))
    );
    assert_eq!(
        parse_range("2025-09-01:2025-09-15").unwrap(),
        Some((d("2025-09-01"), d("2025-09-15")))
    );
    assert!(parse_range("2025:2025-09").is_err());
}

#[test]
fn test_individual_correction_skips_unchanged_approved_entries() {
    let mut pool = DbPool::in_memory().expect("in-memory db");
    init_db(&pool.conn).unwrap();
    let cfg = Config::default();

    let crew = CrewLogic::add_crew(&pool.conn, "Alpha").unwrap();
    let alice = CrewLogic::add_member(&pool.conn, crew.id, "Alice", None, None, None).unwrap();
    let bob = CrewLogic::add_member(&pool.conn, crew.id, "Bob", None, None, None).unwrap();
    let date = d("2025-09-01");
    let notes = EntryNotes::default();

    VerifyLogic::apply(&mut pool, &cfg, &crew, date, &ScheduleDecision::Accept, &notes, Some("Lead"))
        .unwrap();
    StatusLogic::set(&mut pool, &crew, date, Some(alice.id), EntryStatus::Approved, "Boss").unwrap();

    let mut map = BTreeMap::new();
    map.insert(bob.id, ShiftTimes::new(t("08:00"), t("12:00")).unwrap());
    let report = VerifyLogic::apply(
        &mut pool,
        &cfg,
        &crew,
        date,
        &ScheduleDecision::Individual(map),
        &notes,
        None,
    )
    .unwrap();
    assert_eq!((report.locked, report.updated), (1, 1));

    let status: String = pool
        .conn
        .query_row(
            "SELECT status FROM time_entries WHERE member_id = ?1",
            [alice.id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(status, "approved");
    let bob_end: String = pool
        .conn
        .query_row(
            "SELECT end_time FROM time_entries WHERE member_id = ?1",
            [bob.id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(bob_end, "12:00");

    // changing the approved entry itself is still refused
    let mut map = BTreeMap::new();
    map.insert(alice.id, ShiftTimes::new(t("10:00"), t("12:00")).unwrap());
    assert!(matches!(
        VerifyLogic::apply(
            &mut pool,
            &cfg,
            &crew,
            date,
            &ScheduleDecision::Individual(map),
            &notes,
            None,
        ),
        Err(AppError::EntryLocked { .. })
    ));
}
