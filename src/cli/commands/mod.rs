pub mod backup;
pub mod breakdown;
pub mod config;
pub mod crew;
pub mod db;
pub mod del;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod member;
pub mod schedule;
pub mod status;
pub mod submit;
pub mod verify;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::find_member;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use chrono::NaiveDate;
use rusqlite::Connection;

/// Open the configured database, bringing the schema up to date.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}

pub(crate) fn parse_day(s: &str) -> AppResult<NaiveDate> {
    date::parse_date_arg(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Name recorded as submitter / reviewer: explicit value, then the
/// logged-in member, then $USER.
pub(crate) fn actor_name(
    conn: &Connection,
    cfg: &Config,
    explicit: &Option<String>,
) -> AppResult<String> {
    if let Some(name) = explicit {
        return Ok(name.clone());
    }
    if let Some(id) = cfg.logged_in_member
        && let Some(m) = find_member(conn, id)?
    {
        return Ok(m.name);
    }
    Ok(std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "crewtime".to_string()))
}
