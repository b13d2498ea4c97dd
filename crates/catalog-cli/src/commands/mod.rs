pub mod course;

use catalog_store::{db, StoreConfig};
use rusqlite::Connection;
use std::path::PathBuf;

/// Global store options shared by every command
#[derive(Debug, Clone)]
pub struct StoreArgs {
    pub db: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl StoreArgs {
    /// Resolve the store config (file, then `CATALOG_DB`, then `--db`) and
    /// open a migrated connection
    pub fn open(&self) -> Result<Connection, Box<dyn std::error::Error>> {
        let mut config = StoreConfig::load(self.config.as_deref())?.with_env_overrides();
        if let Some(db_path) = &self.db {
            config.db_path = db_path.clone();
        }
        Ok(db::open_with_config(&config)?)
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
