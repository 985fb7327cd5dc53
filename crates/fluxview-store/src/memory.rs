//! In-process storage adapter.
//!
//! [`MemoryStorage`] keeps readings in a vector sorted by timestamp. It
//! honours the same lifecycle and query contract as the SQLite adapter,
//! which makes it a drop-in store for tests and short-lived tools.

use time::{Date, PrimitiveDateTime};
use tracing::debug;

use fluxview_types::Reading;

use crate::error::{Error, Result};
use crate::storage::Storage;

/// A [`Storage`] backed by memory.
///
/// Readings survive [`close`](Storage::close) and are visible again after the
/// next [`open`](Storage::open); they are lost when the value is dropped.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    readings: Vec<Reading>,
    open: bool,
}

impl MemoryStorage {
    /// Create an empty, closed store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a closed store pre-populated with `readings`.
    pub fn with_readings(readings: impl IntoIterator<Item = Reading>) -> Self {
        let mut storage = Self::new();
        for reading in readings {
            storage.insert_sorted(reading);
        }
        storage
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open { Ok(()) } else { Err(Error::NotOpen) }
    }

    // Equal timestamps keep insertion order.
    fn insert_sorted(&mut self, mut reading: Reading) {
        reading.timestamp = truncate_to_millis(reading.timestamp);
        let at = self
            .readings
            .partition_point(|r| r.timestamp <= reading.timestamp);
        self.readings.insert(at, reading);
    }

    fn window(&self, begin: PrimitiveDateTime, end: PrimitiveDateTime) -> &[Reading] {
        let (begin, end) = (truncate_to_millis(begin), truncate_to_millis(end));
        if begin > end {
            return &[];
        }
        let start = self.readings.partition_point(|r| r.timestamp < begin);
        let stop = self.readings.partition_point(|r| r.timestamp <= end);
        &self.readings[start..stop]
    }

    fn day(&self, date: Date) -> &[Reading] {
        let start = self.readings.partition_point(|r| r.date() < date);
        let stop = self.readings.partition_point(|r| r.date() <= date);
        &self.readings[start..stop]
    }
}

/// Drop everything below the millisecond, matching what SQLite stores.
fn truncate_to_millis(timestamp: PrimitiveDateTime) -> PrimitiveDateTime {
    timestamp
        .replace_millisecond(timestamp.millisecond())
        .unwrap_or(timestamp)
}

impl Storage for MemoryStorage {
    fn open(&mut self) -> Result<()> {
        if !self.open {
            debug!("Opening in-memory storage ({} readings)", self.readings.len());
            self.open = true;
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn write_data(&mut self, reading: &Reading) -> Result<()> {
        self.ensure_open()?;
        self.insert_sorted(*reading);
        Ok(())
    }

    fn data_count(&self) -> Result<u64> {
        self.ensure_open()?;
        Ok(self.readings.len() as u64)
    }

    fn data_count_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Result<u64> {
        self.ensure_open()?;
        Ok(self.window(begin, end).len() as u64)
    }

    fn readings_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Result<Vec<Reading>> {
        self.ensure_open()?;
        Ok(self.window(begin, end).to_vec())
    }

    fn dates_with_data_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Result<Vec<Date>> {
        self.ensure_open()?;
        let mut dates: Vec<Date> = self.window(begin, end).iter().map(Reading::date).collect();
        dates.dedup();
        Ok(dates)
    }

    fn data_batch_by_date(&self, date: Date) -> Result<Vec<Reading>> {
        self.ensure_open()?;
        Ok(self.day(date).to_vec())
    }

    fn next_date_with_data(&self, date: Date) -> Result<Option<Date>> {
        self.ensure_open()?;
        let after = self.readings.partition_point(|r| r.date() <= date);
        Ok(self.readings.get(after).map(Reading::date))
    }

    fn prev_date_with_data(&self, date: Date) -> Result<Option<Date>> {
        self.ensure_open()?;
        let before = self.readings.partition_point(|r| r.date() < date);
        Ok(before
            .checked_sub(1)
            .and_then(|i| self.readings.get(i))
            .map(Reading::date))
    }
}
