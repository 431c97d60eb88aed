use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::source::SqliteSource;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;

/// Handle the `init` command
///
/// Creates the config directory and file (keeping an existing one), then
/// the SQLite schema in the configured database.
/// `--db` is already folded into `cfg`, so a fresh config file records it.
pub fn handle(_cli: &Cli, cfg: &Config) -> AppResult<()> {
    let path = Config::config_file();

    info(format!("Config file : {}", path.display()));
    info(format!("Database    : {}", cfg.database));

    if path.exists() {
        info("Existing configuration kept.");
    } else {
        cfg.save_to(&path)?;
    }

    let db_path = expand_tilde(&cfg.database);
    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let source = SqliteSource::open(&db_path, cfg.hauling_units(), cfg.max_entries)?;
    source.init_schema()?;

    success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
