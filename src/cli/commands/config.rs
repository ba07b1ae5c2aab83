use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::migrate::{check_config_file, migrate_config_file};
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        check,
        migrate,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            ConfigLogic::print(cfg)?;
        }

        if *check {
            check_config_file(&path)?;
        }

        if *migrate && !migrate_config_file(&path)? {
            info("Configuration already up to date.");
        }

        if *edit_config {
            ConfigLogic::edit(&path, editor)?;
        }
    }

    Ok(())
}
