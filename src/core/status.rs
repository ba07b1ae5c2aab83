use crate::core::crew::CrewLogic;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_entries_for_day, update_entry};
use crate::errors::{AppError, AppResult};
use crate::models::crew::Crew;
use crate::models::entry_status::EntryStatus;
use chrono::{Local, NaiveDate};

pub struct StatusLogic;

impl StatusLogic {
    /// Move the crew's entries on `date` (or only `member`'s) to `next`.
    /// Every selected entry must allow the transition, otherwise nothing
    /// changes.
    pub fn set(
        pool: &mut DbPool,
        crew: &Crew,
        date: NaiveDate,
        member: Option<i64>,
        next: EntryStatus,
        actor: &str,
    ) -> AppResult<usize> {
        let tx = pool.conn.transaction()?;

        let entries: Vec<_> = load_entries_for_day(&tx, &date, crew.id)?
            .into_iter()
            .filter(|e| member.is_none_or(|id| e.member_id == id))
            .collect();

        if entries.is_empty() {
            return Err(AppError::NoEntriesForDate(format!(
                "{} (crew '{}')",
                date, crew.name
            )));
        }

        let now = Local::now().to_rfc3339();

        for mut e in entries.iter().cloned() {
            if !e.status.can_move_to(next) {
                let who = CrewLogic::member(&tx, e.member_id)?.name;
                return Err(AppError::InvalidStatusTransition {
                    from: format!("{} ({})", e.status.to_db_str(), who),
                    to: next.to_db_str().to_string(),
                });
            }

            e.status = next;
            if next == EntryStatus::Submitted {
                e.submitted_at = Some(now.clone());
                e.submitted_by = Some(actor.to_string());
            }
            e.updated_at = now.clone();
            update_entry(&tx, &e)?;
        }

        ttlog(
            &tx,
            "status",
            &format!("{} crew {}", date, crew.id),
            &format!(
                "{} entries set to {} by {}",
                entries.len(),
                next.to_db_str(),
                actor
            ),
        )?;

        tx.commit()?;
        Ok(entries.len())
    }
}
