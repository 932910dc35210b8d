/*!
 * Database schema definitions.
 *
 * This module contains the SQL schema for the sentence cache and the
 * schema-version marker used to gate future upgrades.
 */

use log::{debug, info};
use rusqlite::Connection;

use crate::errors::CacheError;

/// Schema version written into a freshly created database
pub const SCHEMA_STARTING_VERSION: i32 = 1;

/// Highest schema version this build understands
pub const SCHEMA_MAX_VERSION: i32 = 1;

/// Initialize the database schema, creating it on first use
pub fn initialize_schema(conn: &Connection) -> Result<(), CacheError> {
    let (create, version) = schema_version(conn)?;

    if create {
        info!("Initializing sentence cache schema v{}", SCHEMA_MAX_VERSION);
        create_all_tables(conn)?;
    } else if version != SCHEMA_MAX_VERSION {
        upgrade_to_latest_schema(conn, version)?;
    } else {
        debug!("Sentence cache schema is up to date (v{})", version);
    }

    Ok(())
}

/// Read the schema version marker.
///
/// Returns `(true, starting_version)` when the marker table does not exist
/// yet, i.e. the database must be created from scratch.
fn schema_version(conn: &Connection) -> Result<(bool, i32), CacheError> {
    let table_exists: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'col'",
        [],
        |row| row.get(0),
    )?;

    if table_exists == 0 {
        return Ok((true, SCHEMA_STARTING_VERSION));
    }

    let version: i32 = conn.query_row("SELECT ver FROM col", [], |row| row.get(0))?;
    Ok((false, version))
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<(), CacheError> {
    // WAL mode for better concurrency and crash recovery
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE sentences (
            text TEXT,
            word TEXT,
            language TEXT,
            provider TEXT,
            PRIMARY KEY(text, word, language, provider)
        );
        CREATE TABLE col (
            id INT PRIMARY KEY,
            ver INT
        );
        "#,
    )?;

    conn.execute(
        "INSERT INTO col (id, ver) VALUES (1, ?1)",
        [SCHEMA_STARTING_VERSION],
    )?;

    info!("Sentence cache schema created successfully");
    Ok(())
}

/// Upgrade the schema to the latest version.
///
/// Only one schema version exists so far; anything else is refused until an
/// upgrade path is written for it.
fn upgrade_to_latest_schema(_conn: &Connection, from_version: i32) -> Result<(), CacheError> {
    Err(CacheError::SchemaVersion(from_version))
}
