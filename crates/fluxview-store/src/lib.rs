//! Date-indexed storage and archive queries for FluxViewer readings.
//!
//! This crate defines the [`Storage`] contract over instrument readings,
//! two adapters for it, and the [`ArchiveQuery`] use case that turns a date
//! window and a point budget into a batch ready for plotting.
//!
//! # Features
//!
//! - Explicit open/close lifecycle with fail-fast errors on a closed store
//! - Counting and existence checks that never load readings
//! - Fixed-stride decimation of a window to a point budget
//! - Next/previous date navigation with checkable "not found" errors
//! - SQLite ([`SqliteStorage`]) and in-memory ([`MemoryStorage`]) adapters
//! - CSV/JSON export and import ([`transfer`])
//!
//! # Example
//!
//! ```no_run
//! use fluxview_store::{ArchiveQuery, SqliteStorage};
//! use fluxview_types::DateWindow;
//! use time::macros::date;
//!
//! let storage = SqliteStorage::open_default()?;
//!
//! let window = DateWindow::whole_days(date!(2022-01-12), date!(2022-01-17))
//!     .expect("ordered dates");
//! let query = ArchiveQuery::new(window, &storage);
//! if query.has_data_in_window()? {
//!     let points = query.points_in_window(10_000)?;
//!     println!("{} points", points.len());
//! }
//! # Ok::<(), fluxview_store::Error>(())
//! ```

mod archive;
mod error;
mod memory;
pub mod sampling;
mod schema;
mod sqlite;
mod storage;
pub mod transfer;

pub use archive::ArchiveQuery;
pub use error::{Error, Result};
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;
pub use storage::Storage;
pub use transfer::ImportResult;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/fluxviewer/readings.db`
/// - macOS: `~/Library/Application Support/fluxviewer/readings.db`
/// - Windows: `C:\Users\<user>\AppData\Local\fluxviewer\readings.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("fluxviewer")
        .join("readings.db")
}
