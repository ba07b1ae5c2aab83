use crate::cli::commands::{actor_name, open_db, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::crew::CrewLogic;
use crate::core::submit::submit_day;
use crate::db::log::ttlog;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit { date, crew, by } = cmd {
        let date = parse_day(date)?;
        let mut pool = open_db(cfg)?;
        let crew = CrewLogic::resolve_crew(&pool.conn, cfg, crew.as_deref())?;
        let by = actor_name(&pool.conn, cfg, by)?;

        let tx = pool.conn.transaction()?;
        let count = submit_day(&tx, &date, crew.id, &by)?;
        if count > 0 {
            ttlog(
                &tx,
                "submit",
                &format!("{} crew {}", date, crew.id),
                &format!("{} entries submitted by {}", count, by),
            )?;
        }
        tx.commit()?;

        if count == 0 {
            info("Nothing to submit: every entry is already submitted or reviewed.");
        } else {
            success(format!(
                "{} entries of crew '{}' submitted by {}.",
                count, crew.name, by
            ));
        }
    }

    Ok(())
}
