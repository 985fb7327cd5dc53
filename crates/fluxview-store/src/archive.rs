//! Archive window queries.
//!
//! [`ArchiveQuery`] binds a validated [`DateWindow`] to a borrowed store and
//! answers the two questions a chart asks before drawing: is there anything
//! to draw, and which points should be drawn.

use time::PrimitiveDateTime;

use fluxview_types::{DateWindow, Reading};

use crate::error::Result;
use crate::storage::Storage;

/// Queries over one fixed window of a store.
///
/// The query borrows the store; opening and closing it remains the caller's
/// job. Storage errors are returned unchanged.
///
/// # Example
///
/// ```
/// use fluxview_store::{ArchiveQuery, MemoryStorage, Storage};
/// use fluxview_types::{DateWindow, Reading};
/// use time::macros::{date, datetime};
///
/// let mut storage = MemoryStorage::new();
/// storage.open()?;
/// for minute in 0..10 {
///     let at = datetime!(2022-01-12 10:00) + time::Duration::minutes(minute);
///     storage.write_data(&Reading::new(at, 1.0, 20.0, 1010.0, 40.0))?;
/// }
///
/// let window = DateWindow::day(date!(2022-01-12));
/// let query = ArchiveQuery::new(window, &storage);
/// if query.has_data_in_window()? {
///     assert_eq!(query.points_in_window(5)?.len(), 5);
/// }
/// # Ok::<(), fluxview_store::Error>(())
/// ```
#[derive(Debug)]
pub struct ArchiveQuery<'a, S: Storage + ?Sized> {
    window: DateWindow,
    storage: &'a S,
}

impl<S: Storage + ?Sized> Clone for ArchiveQuery<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Storage + ?Sized> Copy for ArchiveQuery<'_, S> {}

impl<'a, S: Storage + ?Sized> ArchiveQuery<'a, S> {
    pub fn new(window: DateWindow, storage: &'a S) -> Self {
        Self { window, storage }
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    pub fn begin(&self) -> PrimitiveDateTime {
        self.window.begin()
    }

    pub fn end(&self) -> PrimitiveDateTime {
        self.window.end()
    }

    /// Whether the window contains at least one reading.
    ///
    /// Cheap compared to [`points_in_window`](Self::points_in_window); use it
    /// to tell "nothing to draw" apart from a retrieval.
    pub fn has_data_in_window(&self) -> Result<bool> {
        Ok(self
            .storage
            .data_count_between(self.window.begin(), self.window.end())?
            != 0)
    }

    /// Roughly `point_budget` readings spread evenly over the whole window.
    ///
    /// Returns every reading when the budget covers them all, otherwise every
    /// `total / point_budget`-th reading through to the end of the window, as
    /// chosen by [`Storage::data_batch_between`]. An empty window yields an
    /// empty vector.
    pub fn points_in_window(&self, point_budget: usize) -> Result<Vec<Reading>> {
        self.storage
            .data_batch_between(self.window.begin(), self.window.end(), point_budget)
    }
}
