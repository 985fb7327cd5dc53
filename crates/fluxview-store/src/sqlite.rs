//! SQLite storage adapter.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, Params, Row, Statement, params};
use time::{Date, OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info};

use fluxview_types::Reading;

use crate::error::{Error, Result};
use crate::sampling;
use crate::schema;
use crate::storage::Storage;

const READING_COLUMNS: &str = "timestamp_ms, flux, temperature, pressure, humidity";

const INSERT_READING: &str = "INSERT INTO readings (timestamp_ms, day, flux, temperature, \
     pressure, humidity) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    Memory,
}

/// SQLite-based store for instrument readings.
///
/// The store is created closed; call [`Storage::open`] (or use
/// [`SqliteStorage::open_at`]) before issuing queries. An in-memory store
/// loses its contents when closed.
///
/// Ranged decimation runs inside SQLite with a `ROW_NUMBER()` window so only
/// the kept rows leave the database.
#[derive(Debug)]
pub struct SqliteStorage {
    location: Location,
    conn: Option<Connection>,
}

impl SqliteStorage {
    /// A closed store backed by the database file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            location: Location::File(path.as_ref().to_path_buf()),
            conn: None,
        }
    }

    /// A closed store backed by a private in-memory database.
    pub fn in_memory() -> Self {
        Self {
            location: Location::Memory,
            conn: None,
        }
    }

    /// Create a store for `path` and open it.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut storage = Self::new(path);
        storage.open()?;
        Ok(storage)
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open_at(crate::default_db_path())
    }

    /// Database file path, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path),
            Location::Memory => None,
        }
    }

    fn conn(&self) -> Result<&Connection> {
        self.conn.as_ref().ok_or(Error::NotOpen)
    }

    fn connect(&self) -> Result<Connection> {
        let path = match &self.location {
            Location::Memory => {
                debug!("Opening in-memory database");
                let conn = Connection::open_in_memory()?;
                schema::initialize(&conn)?;
                return Ok(conn);
            }
            Location::File(path) => path,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        schema::initialize(&conn)?;
        Ok(conn)
    }

    fn query_readings<P: Params>(&self, sql: &str, params: P) -> Result<Vec<Reading>> {
        debug!("Executing query: {}", sql);
        let mut stmt = self.conn()?.prepare(sql)?;
        collect_readings(&mut stmt, params)
    }
}

impl Storage for SqliteStorage {
    fn open(&mut self) -> Result<()> {
        if self.conn.is_none() {
            self.conn = Some(self.connect()?);
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| Error::Database(e))?;
            match &self.location {
                Location::File(path) => info!("Closed database at {}", path.display()),
                Location::Memory => debug!("Closed in-memory database"),
            }
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    fn write_data(&mut self, reading: &Reading) -> Result<()> {
        self.conn()?.execute(
            INSERT_READING,
            params![
                encode_timestamp(reading.timestamp),
                reading.date().to_julian_day(),
                reading.flux,
                reading.temperature,
                reading.pressure,
                reading.humidity,
            ],
        )?;
        Ok(())
    }

    fn write_batch(&mut self, readings: &[Reading]) -> Result<usize> {
        let conn = self.conn.as_mut().ok_or(Error::NotOpen)?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(INSERT_READING)?;
            for reading in readings {
                stmt.execute(params![
                    encode_timestamp(reading.timestamp),
                    reading.date().to_julian_day(),
                    reading.flux,
                    reading.temperature,
                    reading.pressure,
                    reading.humidity,
                ])?;
            }
        }
        tx.commit()?;

        info!("Wrote {} readings", readings.len());
        Ok(readings.len())
    }

    fn data_count(&self) -> Result<u64> {
        let count: i64 = self
            .conn()?
            .query_row("SELECT COUNT(*) FROM readings", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn data_count_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Result<u64> {
        let count: i64 = self.conn()?.query_row(
            "SELECT COUNT(*) FROM readings WHERE timestamp_ms BETWEEN ?1 AND ?2",
            params![encode_timestamp(begin), encode_timestamp(end)],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn readings_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Result<Vec<Reading>> {
        let sql = format!(
            "SELECT {READING_COLUMNS} FROM readings \
             WHERE timestamp_ms BETWEEN ?1 AND ?2 ORDER BY timestamp_ms, id"
        );
        self.query_readings(&sql, params![encode_timestamp(begin), encode_timestamp(end)])
    }

    fn dates_with_data_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Result<Vec<Date>> {
        let mut stmt = self.conn()?.prepare(
            "SELECT DISTINCT day FROM readings \
             WHERE timestamp_ms BETWEEN ?1 AND ?2 ORDER BY day",
        )?;
        let days = stmt
            .query_map(
                params![encode_timestamp(begin), encode_timestamp(end)],
                |row| row.get::<_, i32>(0),
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        days.into_iter().map(decode_day).collect()
    }

    fn data_batch_by_date(&self, date: Date) -> Result<Vec<Reading>> {
        let sql = format!(
            "SELECT {READING_COLUMNS} FROM readings WHERE day = ?1 ORDER BY timestamp_ms, id"
        );
        self.query_readings(&sql, [date.to_julian_day()])
    }

    fn next_date_with_data(&self, date: Date) -> Result<Option<Date>> {
        let day: Option<i32> = self.conn()?.query_row(
            "SELECT MIN(day) FROM readings WHERE day > ?1",
            [date.to_julian_day()],
            |row| row.get(0),
        )?;
        day.map(decode_day).transpose()
    }

    fn prev_date_with_data(&self, date: Date) -> Result<Option<Date>> {
        let day: Option<i32> = self.conn()?.query_row(
            "SELECT MAX(day) FROM readings WHERE day < ?1",
            [date.to_julian_day()],
            |row| row.get(0),
        )?;
        day.map(decode_day).transpose()
    }

    fn has_data_for_date(&self, date: Date) -> Result<bool> {
        let exists: bool = self.conn()?.query_row(
            "SELECT EXISTS(SELECT 1 FROM readings WHERE day = ?1)",
            [date.to_julian_day()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn data_batch_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
        batch_size: usize,
    ) -> Result<Vec<Reading>> {
        if batch_size == 0 {
            return Err(Error::InvalidBatchSize(batch_size));
        }

        let total = self.data_count_between(begin, end)?;
        if total == 0 {
            return Ok(Vec::new());
        }

        let stride = sampling::stride(total as usize, batch_size);
        debug!(
            "Decimating {} readings to {} with stride {}",
            total, batch_size, stride
        );

        let sql = format!(
            "SELECT {READING_COLUMNS} FROM (\
                 SELECT {READING_COLUMNS}, \
                        ROW_NUMBER() OVER (ORDER BY timestamp_ms, id) - 1 AS position \
                 FROM readings WHERE timestamp_ms BETWEEN ?1 AND ?2\
             ) WHERE position % ?3 = 0 ORDER BY position"
        );
        self.query_readings(
            &sql,
            params![
                encode_timestamp(begin),
                encode_timestamp(end),
                stride as i64,
            ],
        )
    }
}

/// Milliseconds since the epoch, reading the wall-clock time as if it were UTC.
fn encode_timestamp(timestamp: PrimitiveDateTime) -> i64 {
    timestamp
        .assume_utc()
        .unix_timestamp_nanos()
        .div_euclid(1_000_000) as i64
}

fn decode_timestamp(millis: i64) -> Result<PrimitiveDateTime> {
    let utc = OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map_err(|e| Error::InvalidTimestamp(format!("{millis} ms: {e}")))?;
    Ok(PrimitiveDateTime::new(utc.date(), utc.time()))
}

fn decode_day(day: i32) -> Result<Date> {
    Date::from_julian_day(day).map_err(|e| Error::InvalidTimestamp(format!("day {day}: {e}")))
}

/// A row as stored, before its timestamp is validated.
struct RawReading {
    timestamp_ms: i64,
    flux: f64,
    temperature: f64,
    pressure: f64,
    humidity: f64,
}

impl RawReading {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            timestamp_ms: row.get(0)?,
            flux: row.get(1)?,
            temperature: row.get(2)?,
            pressure: row.get(3)?,
            humidity: row.get(4)?,
        })
    }

    fn into_reading(self) -> Result<Reading> {
        Ok(Reading::new(
            decode_timestamp(self.timestamp_ms)?,
            self.flux,
            self.temperature,
            self.pressure,
            self.humidity,
        ))
    }
}

fn collect_readings<P: Params>(stmt: &mut Statement<'_>, params: P) -> Result<Vec<Reading>> {
    let rows = stmt
        .query_map(params, RawReading::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    rows.into_iter().map(RawReading::into_reading).collect()
}
