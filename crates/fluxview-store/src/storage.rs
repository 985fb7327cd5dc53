//! The storage contract shared by every reading store.
//!
//! [`Storage`] abstracts over the concrete persistence medium. Adapters
//! implement a small set of primitives (counting, range reads, neighbouring
//! dates); decimation and date navigation are provided on top of them so
//! every adapter answers the same questions the same way.

use time::{Date, PrimitiveDateTime};

use fluxview_types::{DateWindow, Reading};

use crate::error::{Error, Result};
use crate::sampling;

/// A date-indexed store of instrument readings.
///
/// # Lifecycle
///
/// A store must be opened with [`Storage::open`] before use and released
/// with [`Storage::close`]. Every other operation fails with
/// [`Error::NotOpen`] while the store is closed. Opening an open store and
/// closing a closed store are no-ops.
///
/// # Windows
///
/// Ranged operations take inclusive `begin` and `end` bounds. An empty or
/// inverted range is not an error: counts are zero and batches are empty.
///
/// # Example
///
/// ```
/// use fluxview_store::{MemoryStorage, Storage};
/// use fluxview_types::Reading;
/// use time::macros::datetime;
///
/// let mut storage = MemoryStorage::new();
/// storage.open()?;
/// storage.write_data(&Reading::new(datetime!(2022-01-12 10:00), 1.0, 20.0, 1010.0, 40.0))?;
///
/// let count = storage.data_count_between(
///     datetime!(2022-01-12 00:00),
///     datetime!(2022-01-12 23:59:59.999),
/// )?;
/// assert_eq!(count, 1);
/// storage.close()?;
/// # Ok::<(), fluxview_store::Error>(())
/// ```
pub trait Storage {
    // --- Lifecycle ---

    /// Open the store. No-op if already open.
    fn open(&mut self) -> Result<()>;

    /// Close the store. No-op if already closed.
    fn close(&mut self) -> Result<()>;

    /// Whether the store is currently open.
    fn is_open(&self) -> bool;

    // --- Writes ---

    /// Append one reading. Readings may arrive out of timestamp order.
    fn write_data(&mut self, reading: &Reading) -> Result<()>;

    /// Append several readings, returning how many were written.
    fn write_batch(&mut self, readings: &[Reading]) -> Result<usize> {
        for reading in readings {
            self.write_data(reading)?;
        }
        Ok(readings.len())
    }

    // --- Counting ---

    /// Total number of readings ever stored.
    fn data_count(&self) -> Result<u64>;

    /// Number of readings with `begin <= timestamp <= end`.
    fn data_count_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Result<u64>;

    // --- Range primitives ---

    /// Every reading with `begin <= timestamp <= end`, timestamp-ascending,
    /// ties in insertion order.
    fn readings_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Result<Vec<Reading>>;

    /// Distinct calendar dates with at least one reading inside the window,
    /// ascending.
    fn dates_with_data_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
    ) -> Result<Vec<Date>>;

    /// All readings captured on `date`, timestamp-ascending.
    fn data_batch_by_date(&self, date: Date) -> Result<Vec<Reading>>;

    /// First date strictly after `date` that has data.
    fn next_date_with_data(&self, date: Date) -> Result<Option<Date>>;

    /// Last date strictly before `date` that has data.
    fn prev_date_with_data(&self, date: Date) -> Result<Option<Date>>;

    // --- Derived queries ---

    /// Whether at least one reading exists on `date`.
    fn has_data_for_date(&self, date: Date) -> Result<bool> {
        let day = DateWindow::day(date);
        Ok(self.data_count_between(day.begin(), day.end())? != 0)
    }

    /// Roughly `batch_size` readings from the window, decimated with a fixed
    /// stride.
    ///
    /// With `total` readings in the window, returns all of them when
    /// `batch_size >= total`; otherwise keeps window positions
    /// `0, stride, 2 * stride, ...` below `total`, where
    /// `stride = total / batch_size`. The batch always spans the whole window.
    /// Repeated calls with the same arguments return identical batches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBatchSize`] if `batch_size` is zero.
    fn data_batch_between(
        &self,
        begin: PrimitiveDateTime,
        end: PrimitiveDateTime,
        batch_size: usize,
    ) -> Result<Vec<Reading>> {
        if batch_size == 0 {
            return Err(Error::InvalidBatchSize(batch_size));
        }
        let readings = self.readings_between(begin, end)?;
        Ok(sampling::decimate(readings, batch_size))
    }

    /// Readings of the first date strictly after `date` that has data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NextBatchNotFound`] when `date` is the last date with
    /// data, or later.
    fn next_data_batch_after(&self, date: Date) -> Result<Vec<Reading>> {
        match self.next_date_with_data(date)? {
            Some(next) => self.data_batch_by_date(next),
            None => Err(Error::NextBatchNotFound { after: date }),
        }
    }

    /// Readings of the last date strictly before `date` that has data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PrevBatchNotFound`] when `date` is the first date
    /// with data, or earlier.
    fn prev_data_batch_before(&self, date: Date) -> Result<Vec<Reading>> {
        match self.prev_date_with_data(date)? {
            Some(prev) => self.data_batch_by_date(prev),
            None => Err(Error::PrevBatchNotFound { before: date }),
        }
    }
}
