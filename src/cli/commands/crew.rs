use crate::cli::commands::open_db;
use crate::cli::parser::{Commands, CrewAction};
use crate::config::Config;
use crate::core::crew::CrewLogic;
use crate::db::queries::{list_crews, list_members};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Crew { action } = cmd else {
        return Ok(());
    };

    let pool = open_db(cfg)?;

    match action {
        CrewAction::Add { name } => {
            let crew = CrewLogic::add_crew(&pool.conn, name)?;
            success(format!("Crew '{}' created (id {}).", crew.name, crew.id));
        }
        CrewAction::List => {
            let crews = list_crews(&pool.conn)?;
            if crews.is_empty() {
                info("No crews defined. Use `crewtime crew add <NAME>`.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("ID"),
                Column::new("NAME"),
                Column::new("MEMBERS"),
            ]);
            for c in crews {
                let members = list_members(&pool.conn, Some(c.id), false)?;
                table.add_row(vec![c.id.to_string(), c.name, members.len().to_string()]);
            }
            print!("{}", table.render(cfg.separator()));
        }
    }

    Ok(())
}
