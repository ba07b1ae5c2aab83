use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::crew::CrewLogic;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        crew,
        member,
        breakdown,
        force,
    } = cmd
    {
        let mut pool = open_db(cfg)?;

        let crew_id = match crew {
            Some(k) => Some(CrewLogic::find(&pool.conn, k)?.id),
            None => None,
        };

        ExportLogic::export(
            &mut pool, *format, file, range, crew_id, *member, *breakdown, *force,
        )?;
    }
    Ok(())
}
