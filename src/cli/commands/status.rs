use crate::cli::commands::{actor_name, open_db, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::crew::CrewLogic;
use crate::core::status::StatusLogic;
use crate::errors::{AppError, AppResult};
use crate::models::entry_status::EntryStatus;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status {
        date,
        crew,
        member,
        status,
        by,
    } = cmd
    {
        let next =
            EntryStatus::from_code(status).ok_or_else(|| AppError::InvalidStatus(status.clone()))?;
        let date = parse_day(date)?;

        let mut pool = open_db(cfg)?;
        let crew = CrewLogic::resolve_crew(&pool.conn, cfg, crew.as_deref())?;
        let actor = actor_name(&pool.conn, cfg, by)?;

        let n = StatusLogic::set(&mut pool, &crew, date, *member, next, &actor)?;
        success(format!("{} entries set to {}.", n, next.to_db_str()));
    }

    Ok(())
}
