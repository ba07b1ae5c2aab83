use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::migrate::pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};
use crate::utils::colors::{CYAN, RESET};

/// `db --migrate | --info | --check | --vacuum`, in that order.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    else {
        return Ok(());
    };

    let mut pool = DbPool::new(&cfg.database)?;

    if *migrate {
        let pending = pending_migrations(&pool.conn)?;
        if pending.is_empty() {
            info("Schema is up to date.");
        } else {
            for version in &pending {
                println!("{CYAN}▶ pending:{RESET} {version}");
            }
            init_db(&pool.conn)?;
            success(format!("{} migrations applied.", pending.len()));
        }
    }

    if *show_info {
        init_db(&pool.conn)?;
        stats::print_db_info(&mut pool, &cfg.database)?;
    }

    if *check {
        let integrity: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
        let orphans: i64 = pool.conn.query_row(
            "SELECT COUNT(*) FROM pragma_foreign_key_check",
            [],
            |row| row.get(0),
        )?;

        if integrity == "ok" && orphans == 0 {
            success("Integrity check passed.");
        } else {
            error(format!(
                "Integrity check failed: {} ({} foreign key violations)",
                integrity, orphans
            ));
        }
    }

    if *vacuum {
        pool.conn.execute_batch("VACUUM;")?;
        ttlog(&pool.conn, "db", "vacuum", "Database optimized with VACUUM")?;
        success("Vacuum completed.");
    }

    Ok(())
}
