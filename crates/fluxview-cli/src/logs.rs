//! Instrument log lookup by day.
//!
//! The instrument writes one text file per day. A [`LogSource`] only answers
//! whether a day has entries and returns them; it does not interpret them.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use time::Date;
use tracing::debug;

use crate::util::format_date;

/// Day-indexed access to instrument log entries.
pub trait LogSource {
    /// Whether any entries exist for `date`.
    fn has_logs_for_date(&self, date: Date) -> bool;

    /// Entries recorded on `date`, in file order. Empty when there are none.
    fn logs_by_date(&self, date: Date) -> Result<Vec<String>>;
}

/// Logs stored as `<dir>/YYYY-MM-DD.log`, one entry per non-empty line.
#[derive(Debug, Clone)]
pub struct FileSystemLogs {
    dir: PathBuf,
}

impl FileSystemLogs {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default log directory following platform conventions.
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fluxviewer")
            .join("logs")
    }

    /// File that holds the entries of `date`.
    pub fn path_for(&self, date: Date) -> PathBuf {
        self.dir.join(format!("{}.log", format_date(date)))
    }
}

impl LogSource for FileSystemLogs {
    fn has_logs_for_date(&self, date: Date) -> bool {
        fs::metadata(self.path_for(date)).is_ok_and(|m| m.is_file() && m.len() > 0)
    }

    fn logs_by_date(&self, date: Date) -> Result<Vec<String>> {
        let path = self.path_for(date);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No log file at {}", path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read log file: {}", path.display()));
            }
        };

        Ok(content
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}
