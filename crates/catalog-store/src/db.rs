//! Database connection management
//!
//! Every connection handed out here has foreign keys enforced. Callers own
//! the connection and pass it into repository and engine functions; there is
//! no process-wide handle.

use crate::config::StoreConfig;
use crate::errors::{from_rusqlite, io_error, Result};
use crate::migrations::apply_migrations;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5_000);

/// SQL function that lowercases text with Unicode case rules
///
/// SQLite's `LOWER()` only folds ASCII, so case-insensitive matching applies
/// this to both the column and the bound value.
pub const FOLD_FN: &str = "catalog_fold";

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn, DEFAULT_BUSY_TIMEOUT, true)?;
    Ok(conn)
}

/// Open an in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(&conn, DEFAULT_BUSY_TIMEOUT, false)?;
    Ok(conn)
}

/// Open the database described by `config`, creating its directory, and
/// bring the schema up to date
pub fn open_with_config(config: &StoreConfig) -> Result<Connection> {
    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| io_error("create_db_dir", e))?;
        }
    }

    let mut conn = Connection::open(&config.db_path).map_err(from_rusqlite)?;
    configure(
        &conn,
        Duration::from_millis(config.busy_timeout_ms),
        config.wal,
    )?;
    apply_migrations(&mut conn)?;
    Ok(conn)
}

/// Apply connection pragmas
pub fn configure(conn: &Connection, busy_timeout: Duration, wal: bool) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .map_err(from_rusqlite)?;

    conn.busy_timeout(busy_timeout).map_err(from_rusqlite)?;
    register_fold(conn)?;

    if wal {
        // journal_mode answers with the resulting mode, so it has to be read as a row
        let mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        tracing::debug!(journal_mode = %mode, "configured journal mode");
    }

    Ok(())
}

fn register_fold(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        FOLD_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|text| text.to_lowercase())),
    )
    .map_err(from_rusqlite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = open_in_memory().unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_fold_lowercases_unicode() {
        let conn = open_in_memory().unwrap();
        let folded: String = conn
            .query_row(&format!("SELECT {}('ÁLGEBRA Ünd Ω')", FOLD_FN), [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(folded, "álgebra ünd ω");

        let null: Option<String> = conn
            .query_row(&format!("SELECT {}(NULL)", FOLD_FN), [], |row| row.get(0))
            .unwrap();
        assert!(null.is_none());
    }

    #[test]
    fn test_open_with_config_creates_directory_and_schema() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = StoreConfig {
            db_path: dir.path().join("nested").join("catalog.db"),
            ..StoreConfig::default()
        };

        let conn = open_with_config(&config).unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('courses', 'course_to_prerequisites')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
        assert!(config.db_path.exists());
    }
}
