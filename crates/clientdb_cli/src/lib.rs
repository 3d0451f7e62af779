//! Store check behind the `clientdb` binary.
//!
//! Opens the configured store, checks the client repository is usable and
//! closes the store again.

use clap::Parser;
use clientdb_core::config::{ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
use clientdb_core::db::migrations::current_version;
use clientdb_core::{close_db, init_logging, open_db, CoreConfig, SqliteClientRepository};
use std::error::Error;
use std::path::PathBuf;

/// Client store smoke check.
#[derive(Parser, Debug, Clone)]
#[command(name = "clientdb", version, about, long_about = None)]
pub struct Cli {
    /// SQLite store file (default `demo.db`)
    #[arg(long, env = ENV_DB_PATH)]
    pub db_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = ENV_LOG_LEVEL)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; file logging is off when unset
    #[arg(long, env = ENV_LOG_DIR)]
    pub log_dir: Option<String>,
}

impl Cli {
    pub fn config(&self) -> Result<CoreConfig, Box<dyn Error>> {
        Ok(CoreConfig::from_values(
            self.db_path.clone(),
            self.log_level.clone(),
            self.log_dir.clone(),
        )?)
    }
}

/// What a successful store check observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReport {
    pub db_path: PathBuf,
    pub schema_version: u32,
}

pub fn run(cli: &Cli) -> Result<StoreReport, Box<dyn Error>> {
    let config = cli.config()?;
    if let Some(log_dir) = &config.log_dir {
        let log_dir = log_dir.to_str().ok_or("log dir is not valid UTF-8")?;
        init_logging(config.log_level, log_dir)?;
    }

    let conn = open_db(&config.db_path)?;
    SqliteClientRepository::try_new(&conn)?;
    let schema_version = current_version(&conn)?;
    close_db(conn)?;

    log::info!(
        "event=cli_check module=cli status=ok db_path={} schema_version={schema_version}",
        config.db_path.display()
    );
    Ok(StoreReport {
        db_path: config.db_path,
        schema_version,
    })
}
