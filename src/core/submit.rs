use crate::core::calculator::hours::split_regular_overtime;
use crate::db::queries::{
    clear_breakdown, find_entry, insert_entry, load_breakdown, load_entries_for_day, update_entry,
};
use crate::errors::{AppError, AppResult};
use crate::models::crew::CrewMember;
use crate::models::entry_status::EntryStatus;
use crate::models::shift::ShiftTimes;
use crate::models::time_entry::TimeEntry;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;

/// What `upsert_entry` did with the (date, crew, member) row.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    pub entry: TimeEntry,
    pub created: bool,
    pub breakdown_cleared: bool,
    /// Approved entry left as it was because nothing on it would change.
    pub kept_locked: bool,
}

/// Free-text fields stored with an entry. `None` keeps the stored value.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryNotes<'a> {
    pub comments: Option<&'a str>,
    pub location: Option<&'a str>,
}

impl EntryNotes<'_> {
    fn differs_from(&self, entry: &TimeEntry) -> bool {
        self.comments.is_some_and(|c| c != entry.comments)
            || self.location.is_some_and(|l| l != entry.location)
    }

    fn apply_to(&self, entry: &mut TimeEntry) {
        if let Some(c) = self.comments {
            entry.comments = c.to_string();
        }
        if let Some(l) = self.location {
            entry.location = l.to_string();
        }
    }
}

/// Insert or update the entry keyed by (date, crew, member).
///
/// - approved entries are locked: writing the same values is a no-op,
///   anything else is `EntryLocked`
/// - a rejected entry, or one whose times change, goes back to `draft`
/// - if the new total is below the stored breakdown, the breakdown is dropped
pub fn upsert_entry(
    conn: &Connection,
    date: NaiveDate,
    crew_id: i64,
    member: &CrewMember,
    shift: ShiftTimes,
    standard_day: i64,
    notes: &EntryNotes,
) -> AppResult<UpsertOutcome> {
    let worked = shift.duration_minutes();
    let (regular, overtime) = split_regular_overtime(worked, standard_day);

    let Some(mut entry) = find_entry(conn, &date, crew_id, member.id)? else {
        let mut entry = TimeEntry::new(date, crew_id, member.id, shift, regular, overtime);
        notes.apply_to(&mut entry);
        entry.id = insert_entry(conn, &entry)?;

        return Ok(UpsertOutcome {
            entry,
            created: true,
            breakdown_cleared: false,
            kept_locked: false,
        });
    };

    if entry.status.is_locked() {
        if entry.shift == shift && !notes.differs_from(&entry) {
            return Ok(UpsertOutcome {
                entry,
                created: false,
                breakdown_cleared: false,
                kept_locked: true,
            });
        }
        return Err(AppError::EntryLocked {
            member: member.name.clone(),
            date: entry.date_str(),
        });
    }

    let times_changed = entry.shift != shift;
    if times_changed || entry.status == EntryStatus::Rejected {
        entry.status = EntryStatus::Draft;
        entry.submitted_at = None;
        entry.submitted_by = None;
    }

    entry.shift = shift;
    entry.regular_minutes = regular;
    entry.overtime_minutes = overtime;
    entry.updated_at = Local::now().to_rfc3339();
    notes.apply_to(&mut entry);

    let categorized: i64 = load_breakdown(conn, entry.id)?
        .iter()
        .map(|i| i.minutes)
        .sum();

    let breakdown_cleared = categorized > worked;
    if breakdown_cleared {
        clear_breakdown(conn, entry.id)?;
        entry.working_minutes = 0;
        entry.traveling_minutes = 0;
        entry.standby_minutes = 0;
    }

    update_entry(conn, &entry)?;

    Ok(UpsertOutcome {
        entry,
        created: false,
        breakdown_cleared,
        kept_locked: false,
    })
}

/// Move every draft/rejected entry of the crew on `date` to `submitted`.
/// Returns the number of entries submitted.
pub fn submit_day(
    conn: &Connection,
    date: &NaiveDate,
    crew_id: i64,
    submitted_by: &str,
) -> AppResult<usize> {
    let entries = load_entries_for_day(conn, date, crew_id)?;
    if entries.is_empty() {
        return Err(AppError::NoEntriesForDate(date.to_string()));
    }

    let now = Local::now().to_rfc3339();
    let mut count = 0;

    for mut e in entries {
        if !e.status.can_move_to(EntryStatus::Submitted) {
            continue;
        }
        e.status = EntryStatus::Submitted;
        e.submitted_at = Some(now.clone());
        e.submitted_by = Some(submitted_by.to_string());
        e.updated_at = now.clone();
        update_entry(conn, &e)?;
        count += 1;
    }

    Ok(count)
}
