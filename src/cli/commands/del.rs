use crate::cli::commands::{open_db, parse_day};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::crew::CrewLogic;
use crate::core::entries::EntriesLogic;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        date,
        crew,
        member,
        yes,
    } = cmd
    {
        let date = parse_day(date)?;
        let mut pool = open_db(cfg)?;
        let crew = CrewLogic::resolve_crew(&pool.conn, cfg, crew.as_deref())?;

        let scope = match member {
            Some(id) => format!("member {}", id),
            None => "every member".to_string(),
        };

        if !*yes
            && !confirm(format!(
                "Delete the entries of crew '{}' on {} ({})?",
                crew.name, date, scope
            ))?
        {
            info("Operation cancelled.");
            return Ok(());
        }

        let n = EntriesLogic::delete(&mut pool, &crew, date, *member)?;
        success(format!("Deleted {} entries.", n));
    }

    Ok(())
}
