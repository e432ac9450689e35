use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let db_path = if cli.test {
        // test mode: never touch the user's configuration
        cfg.database.clone()
    } else {
        let path = Config::init_all(cli.db.clone(), cli.user.clone(), false)?;
        success(format!("Config file: {}", Config::config_file().display()));
        path
    };

    let pool = DbPool::new(&db_path)?;
    init_db(&pool.conn)?;
    ttlog(&pool.conn, "init", &db_path, "Database initialized")?;

    success(format!("Database:    {}", db_path));
    if cfg.user.trim().is_empty() {
        info("No user configured yet: pass --user or set `user` in the configuration.");
    }

    Ok(())
}
