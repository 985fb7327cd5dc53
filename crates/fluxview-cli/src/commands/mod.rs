//! Command implementations for the CLI.

mod archive;
mod config;
mod day;
mod logs;
mod stats;
mod transfer;

use std::path::PathBuf;

use anyhow::Result;
use fluxview_store::SqliteStorage;

use crate::cli::{OutputArgs, OutputFormat};
use crate::config::{Config, resolve_format};
use crate::format::FormatOptions;
use crate::util::{open_storage, write_output};

pub use archive::cmd_archive;
pub use config::cmd_config;
pub use day::{DayTarget, cmd_dates, cmd_day};
pub use logs::cmd_logs;
pub use stats::cmd_stats;
pub use transfer::{cmd_export, cmd_import};

/// Settings shared by every command.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub database: PathBuf,
    pub output: Option<PathBuf>,
    pub no_color: bool,
}

impl Context {
    pub fn open_storage(&self) -> Result<SqliteStorage> {
        open_storage(&self.database)
    }

    pub fn format(&self, args: &OutputArgs) -> OutputFormat {
        resolve_format(args.format, &self.config)
    }

    pub fn format_options(&self, args: &OutputArgs) -> FormatOptions {
        // Colors never go to files.
        let no_color = self.no_color || self.config.no_color || self.output.is_some();
        FormatOptions::new(no_color)
            .with_no_header(args.no_header)
            .with_compact(args.compact)
    }

    pub fn write(&self, content: &str) -> Result<()> {
        write_output(self.output.as_ref(), content)
    }
}
