//! Command-line browser for archived FluxViewer readings.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `archive` | Plot-ready points for a range of days |
//! | `dates` | Days that have readings |
//! | `day` | Every reading of a day, or of its neighbouring day with data |
//! | `stats` | Reading counts |
//! | `import` / `export` | CSV and JSON transfer |
//! | `logs` | Instrument log entries for a day |
//! | `config` | Manage CLI configuration |
//!
//! # Environment Variables
//!
//! - `FLUXVIEW_DB`: Reading database (overridden by `--database`)
//! - `FLUXVIEW_CONFIG`: Config file location
//! - `NO_COLOR`: Disable colored output when set
//! - `RUST_LOG`: Log filter when neither `--verbose` nor `--quiet` is given

mod cli;
mod commands;
mod config;
mod format;
mod logs;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{
    Context, DayTarget, cmd_archive, cmd_config, cmd_dates, cmd_day, cmd_export, cmd_import,
    cmd_logs, cmd_stats,
};
use crate::config::{Config, resolve_database};
use crate::logs::FileSystemLogs;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // When quiet mode is enabled, suppress info-level logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();
    let ctx = Context {
        database: resolve_database(cli.database, &config),
        output: cli.output,
        no_color: cli.no_color,
        config,
    };
    tracing::debug!("Using database {}", ctx.database.display());

    match cli.command {
        Commands::Archive(args) => cmd_archive(&args, &ctx),
        Commands::Dates { range, output } => cmd_dates(&range, &output, &ctx),
        Commands::Day {
            date,
            next,
            prev,
            output,
        } => cmd_day(DayTarget::from_flags(date, next, prev), &output, &ctx),
        Commands::Stats { from, to, output } => cmd_stats(from.zip(to), &output, &ctx),
        Commands::Import { input, format } => cmd_import(input, format, &ctx),
        Commands::Export { range, format } => cmd_export(&range, format, &ctx),
        Commands::Logs { date, dir, output } => {
            let dir = dir
                .or_else(|| ctx.config.logs_dir.clone())
                .unwrap_or_else(FileSystemLogs::default_dir);
            cmd_logs(&FileSystemLogs::new(dir), date, &output, &ctx)
        }
        Commands::Config { action } => cmd_config(action),
    }
}
