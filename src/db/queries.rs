use crate::errors::{AppError, AppResult};
use crate::models::breakdown::{BreakdownCategory, BreakdownItem};
use crate::models::crew::{Crew, CrewMember};
use crate::models::entry_status::EntryStatus;
use crate::models::shift::ShiftTimes;
use crate::models::time_entry::TimeEntry;
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const ENTRY_COLUMNS: &str = "id, date, crew_id, member_id, start_time, end_time, \
     regular_minutes, overtime_minutes, working_minutes, traveling_minutes, standby_minutes, \
     location, comments, status, submitted_at, submitted_by, created_at, updated_at";

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn get_time(row: &Row, col: &str) -> Result<NaiveTime> {
    let s: String = row.get(col)?;
    NaiveTime::parse_from_str(&s, "%H:%M").map_err(|_| conversion_error(0, AppError::InvalidTime(s)))
}

fn get_opt_time(row: &Row, col: &str) -> Result<Option<NaiveTime>> {
    let s: Option<String> = row.get(col)?;
    match s {
        None => Ok(None),
        Some(v) if v.is_empty() => Ok(None),
        Some(v) => NaiveTime::parse_from_str(&v, "%H:%M")
            .map(Some)
            .map_err(|_| conversion_error(0, AppError::InvalidTime(v))),
    }
}

fn opt_time_str(t: Option<NaiveTime>) -> Option<String> {
    t.map(|v| v.format("%H:%M").to_string())
}

// ---------------------------------------------------------------------------
// crews
// ---------------------------------------------------------------------------

fn map_crew(row: &Row) -> Result<Crew> {
    Ok(Crew {
        id: row.get("id")?,
        name: row.get("crew_name")?,
        active: row.get::<_, i32>("active")? == 1,
    })
}

pub fn insert_crew(conn: &Connection, name: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO crews (crew_name, active, created_at) VALUES (?1, 1, ?2)",
        params![name, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_crews(conn: &Connection) -> AppResult<Vec<Crew>> {
    let mut stmt = conn.prepare("SELECT id, crew_name, active FROM crews ORDER BY crew_name ASC")?;
    let rows = stmt.query_map([], map_crew)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_crew(conn: &Connection, id: i64) -> AppResult<Option<Crew>> {
    Ok(conn
        .query_row(
            "SELECT id, crew_name, active FROM crews WHERE id = ?1",
            [id],
            map_crew,
        )
        .optional()?)
}

pub fn find_crew_by_name(conn: &Connection, name: &str) -> AppResult<Option<Crew>> {
    Ok(conn
        .query_row(
            "SELECT id, crew_name, active FROM crews WHERE crew_name = ?1 COLLATE NOCASE",
            [name],
            map_crew,
        )
        .optional()?)
}

// ---------------------------------------------------------------------------
// crew members
// ---------------------------------------------------------------------------

fn map_member(row: &Row) -> Result<CrewMember> {
    Ok(CrewMember {
        id: row.get("id")?,
        name: row.get("name")?,
        role: row.get("role")?,
        hourly_rate: row.get("hourly_rate")?,
        crew_id: row.get("crew_id")?,
        active: row.get::<_, i32>("active")? == 1,
        scheduled_start: get_opt_time(row, "scheduled_start")?,
        scheduled_end: get_opt_time(row, "scheduled_end")?,
    })
}

pub fn insert_member(conn: &Connection, m: &CrewMember) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO crew_members (name, role, hourly_rate, crew_id, active, scheduled_start, scheduled_end)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            m.name,
            m.role,
            m.hourly_rate,
            m.crew_id,
            if m.active { 1 } else { 0 },
            opt_time_str(m.scheduled_start),
            opt_time_str(m.scheduled_end),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_member(conn: &Connection, id: i64) -> AppResult<Option<CrewMember>> {
    Ok(conn
        .query_row(
            "SELECT * FROM crew_members WHERE id = ?1",
            [id],
            map_member,
        )
        .optional()?)
}

/// Members of a crew (or all members when `crew_id` is None), ordered by name.
pub fn list_members(
    conn: &Connection,
    crew_id: Option<i64>,
    include_inactive: bool,
) -> AppResult<Vec<CrewMember>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM crew_members
         WHERE (?1 IS NULL OR crew_id = ?1)
           AND (?2 = 1 OR active = 1)
         ORDER BY name ASC",
    )?;

    let rows = stmt.query_map(
        params![crew_id, if include_inactive { 1 } else { 0 }],
        map_member,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn set_member_active(conn: &Connection, id: i64, active: bool) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE crew_members SET active = ?1 WHERE id = ?2",
        params![if active { 1 } else { 0 }, id],
    )?;
    Ok(n > 0)
}

pub fn set_member_schedule(
    conn: &Connection,
    id: i64,
    shift: Option<ShiftTimes>,
) -> AppResult<bool> {
    let n = conn.execute(
        "UPDATE crew_members SET scheduled_start = ?1, scheduled_end = ?2 WHERE id = ?3",
        params![
            opt_time_str(shift.map(|s| s.start)),
            opt_time_str(shift.map(|s| s.end)),
            id
        ],
    )?;
    Ok(n > 0)
}

// ---------------------------------------------------------------------------
// time entries
// ---------------------------------------------------------------------------

pub fn map_entry(row: &Row) -> Result<TimeEntry> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(0, AppError::InvalidDate(date_str.clone())))?;

    let start = get_time(row, "start_time")?;
    let end = get_time(row, "end_time")?;
    let shift = ShiftTimes::new(start, end).map_err(|e| conversion_error(0, e))?;

    let status_str: String = row.get("status")?;
    let status = EntryStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(0, AppError::InvalidStatus(status_str.clone())))?;

    Ok(TimeEntry {
        id: row.get("id")?,
        date,
        crew_id: row.get("crew_id")?,
        member_id: row.get("member_id")?,
        shift,
        regular_minutes: row.get("regular_minutes")?,
        overtime_minutes: row.get("overtime_minutes")?,
        working_minutes: row.get("working_minutes")?,
        traveling_minutes: row.get("traveling_minutes")?,
        standby_minutes: row.get("standby_minutes")?,
        location: row.get("location")?,
        comments: row.get("comments")?,
        status,
        submitted_at: row.get("submitted_at")?,
        submitted_by: row.get("submitted_by")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// The single entry keyed by (date, crew, member), if any.
pub fn find_entry(
    conn: &Connection,
    date: &NaiveDate,
    crew_id: i64,
    member_id: i64,
) -> AppResult<Option<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE date = ?1 AND crew_id = ?2 AND member_id = ?3"
    );
    Ok(conn
        .query_row(
            &sql,
            params![date.format("%Y-%m-%d").to_string(), crew_id, member_id],
            map_entry,
        )
        .optional()?)
}

pub fn insert_entry(conn: &Connection, e: &TimeEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_entries (date, crew_id, member_id, start_time, end_time,
             regular_minutes, overtime_minutes, working_minutes, traveling_minutes, standby_minutes,
             location, comments, status, submitted_at, submitted_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        params![
            e.date_str(),
            e.crew_id,
            e.member_id,
            e.shift.start.format("%H:%M").to_string(),
            e.shift.end.format("%H:%M").to_string(),
            e.regular_minutes,
            e.overtime_minutes,
            e.working_minutes,
            e.traveling_minutes,
            e.standby_minutes,
            e.location,
            e.comments,
            e.status.to_db_str(),
            e.submitted_at,
            e.submitted_by,
            e.created_at,
            e.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update an entry (all fields except id, date, crew and member)
pub fn update_entry(conn: &Connection, e: &TimeEntry) -> AppResult<()> {
    conn.execute(
        "UPDATE time_entries
         SET start_time = ?1, end_time = ?2,
             regular_minutes = ?3, overtime_minutes = ?4,
             working_minutes = ?5, traveling_minutes = ?6, standby_minutes = ?7,
             location = ?8, comments = ?9, status = ?10,
             submitted_at = ?11, submitted_by = ?12, updated_at = ?13
         WHERE id = ?14",
        params![
            e.shift.start.format("%H:%M").to_string(),
            e.shift.end.format("%H:%M").to_string(),
            e.regular_minutes,
            e.overtime_minutes,
            e.working_minutes,
            e.traveling_minutes,
            e.standby_minutes,
            e.location,
            e.comments,
            e.status.to_db_str(),
            e.submitted_at,
            e.submitted_by,
            e.updated_at,
            e.id,
        ],
    )?;
    Ok(())
}

/// All entries of a crew on a date, ordered by member name.
pub fn load_entries_for_day(
    conn: &Connection,
    date: &NaiveDate,
    crew_id: i64,
) -> AppResult<Vec<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE date = ?1 AND crew_id = ?2
         ORDER BY (SELECT name FROM crew_members WHERE crew_members.id = time_entries.member_id) ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![date.format("%Y-%m-%d").to_string(), crew_id],
        map_entry,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Entries between two dates (inclusive), newest first.
pub fn load_entries_in_range(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
    crew_id: Option<i64>,
    member_id: Option<i64>,
) -> AppResult<Vec<TimeEntry>> {
    let (from, to) = match bounds {
        Some((a, b)) => (
            Some(a.format("%Y-%m-%d").to_string()),
            Some(b.format("%Y-%m-%d").to_string()),
        ),
        None => (None, None),
    };

    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE (?1 IS NULL OR date >= ?1)
           AND (?2 IS NULL OR date <= ?2)
           AND (?3 IS NULL OR crew_id = ?3)
           AND (?4 IS NULL OR member_id = ?4)
         ORDER BY date DESC, start_time DESC, member_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![from, to, crew_id, member_id], map_entry)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM hours_breakdown WHERE time_entry_id = ?1", [id])?;
    conn.execute("DELETE FROM time_entries WHERE id = ?1", [id])?;
    Ok(())
}

// ---------------------------------------------------------------------------
// hours breakdown
// ---------------------------------------------------------------------------

fn map_breakdown(row: &Row) -> Result<BreakdownItem> {
    let kind: String = row.get("breakdown_type")?;
    let category = BreakdownCategory::from_db_str(&kind)
        .ok_or_else(|| conversion_error(0, AppError::InvalidCategory(kind.clone())))?;

    Ok(BreakdownItem {
        id: row.get("id")?,
        time_entry_id: row.get("time_entry_id")?,
        member_id: row.get("member_id")?,
        category,
        minutes: row.get("minutes")?,
        description: row.get("description")?,
        start_time: get_opt_time(row, "start_time")?,
        end_time: get_opt_time(row, "end_time")?,
    })
}

pub fn load_breakdown(conn: &Connection, time_entry_id: i64) -> AppResult<Vec<BreakdownItem>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM hours_breakdown WHERE time_entry_id = ?1 ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([time_entry_id], map_breakdown)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn clear_breakdown(conn: &Connection, time_entry_id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM hours_breakdown WHERE time_entry_id = ?1",
        [time_entry_id],
    )?)
}

/// Replace the breakdown rows of an entry with `items`.
pub fn replace_breakdown(
    conn: &Connection,
    time_entry_id: i64,
    member_id: i64,
    items: &[BreakdownItem],
) -> AppResult<()> {
    clear_breakdown(conn, time_entry_id)?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO hours_breakdown
             (time_entry_id, member_id, breakdown_type, minutes, description, start_time, end_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;

    for item in items {
        stmt.execute(params![
            time_entry_id,
            member_id,
            item.category.to_db_str(),
            item.minutes,
            item.description,
            opt_time_str(item.start_time),
            opt_time_str(item.end_time),
        ])?;
    }
    Ok(())
}
