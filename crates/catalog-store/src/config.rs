//! Store configuration
//!
//! Loaded from an optional TOML file:
//!
//! ```toml
//! db_path = "/var/lib/catalog/catalog.db"
//! busy_timeout_ms = 5000
//! wal = true
//! ```
//!
//! Missing keys fall back to defaults. `CATALOG_DB` overrides `db_path`.

use crate::errors::{config_error, io_error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "CATALOG_DB";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub busy_timeout_ms: u64,
    /// WAL journal mode for file databases
    pub wal: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(".catalog/catalog.db"),
            busy_timeout_ms: 5_000,
            wal: true,
        }
    }
}

impl StoreConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| config_error(format!("invalid store config: {}", e)))
    }

    /// Read `path` if given, otherwise use defaults
    ///
    /// # Errors
    /// `Io` when an explicitly named file cannot be read, `InvalidInput`
    /// when it does not parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|e| io_error("read_config", e))?;
                Self::from_toml_str(&contents)
            }
        }
    }

    /// Apply `CATALOG_DB` when set and non-empty
    pub fn with_env_overrides(self) -> Self {
        self.with_db_path_override(std::env::var(DB_PATH_ENV).ok())
    }

    fn with_db_path_override(mut self, value: Option<String>) -> Self {
        if let Some(path) = value.filter(|v| !v.trim().is_empty()) {
            self.db_path = PathBuf::from(path);
        }
        self
    }
}
