//! On-disk layout of the reading database.
//!
//! The layout version lives in SQLite's `user_version` header field. A fresh
//! file reports 0 and gets the current layout; a file stamped with a later
//! version is refused rather than read with the wrong column meaning.

use rusqlite::Connection;

use crate::error::{Error, Result};

/// Layout version written by this build.
pub const SCHEMA_VERSION: i32 = 1;

/// `timestamp_ms` is wall-clock time as epoch milliseconds and `day` its
/// Julian day number, so per-date lookups stay plain integer comparisons.
const READINGS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS readings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        timestamp_ms INTEGER NOT NULL,
        day INTEGER NOT NULL,
        flux REAL NOT NULL,
        temperature REAL NOT NULL,
        pressure REAL NOT NULL,
        humidity REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_readings_time ON readings(timestamp_ms, id);
    CREATE INDEX IF NOT EXISTS idx_readings_day ON readings(day, timestamp_ms);
";

/// Bring `conn` to [`SCHEMA_VERSION`], creating the tables on first use.
pub fn initialize(conn: &Connection) -> Result<()> {
    match layout_version(conn)? {
        SCHEMA_VERSION => Ok(()),
        0 => {
            conn.execute_batch(READINGS_TABLE)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            Ok(())
        }
        found => Err(Error::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        }),
    }
}

fn layout_version(conn: &Connection) -> Result<i32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
