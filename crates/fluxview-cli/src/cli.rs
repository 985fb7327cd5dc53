//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fluxview_types::Channel;
use time::Date;

use crate::util::parse_date;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// File format for import and export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TransferFormat {
    #[default]
    Csv,
    Json,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Output format (defaults to the configured format, then text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Omit header row in CSV output (useful for appending)
    #[arg(long)]
    pub no_header: bool,

    /// Output compact JSON (no pretty-printing)
    #[arg(long)]
    pub compact: bool,
}

/// Whole-day date range; `--to` defaults to `--from`
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// First day of the range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Date,

    /// Last day of the range (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    pub to: Option<Date>,
}

impl RangeArgs {
    /// The last day of the range.
    pub fn last(&self) -> Date {
        self.to.unwrap_or(self.from)
    }
}

#[derive(Parser)]
#[command(name = "fluxview")]
#[command(author, version, about = "Browse archived FluxViewer readings", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Reading database (defaults to the configured path, then the platform data dir)
    #[arg(long, global = true, env = "FLUXVIEW_DB")]
    pub database: Option<PathBuf>,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plot-ready points for a range of days
    Archive(ArchiveArgs),

    /// List the days that have readings
    Dates {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show every reading of one day, or of its neighbouring day with data
    Day {
        /// Day to show (YYYY-MM-DD)
        #[arg(value_parser = parse_date_arg)]
        date: Date,

        /// Show the next day with data instead
        #[arg(long, conflicts_with = "prev")]
        next: bool,

        /// Show the previous day with data instead
        #[arg(long, conflicts_with = "next")]
        prev: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show reading counts
    Stats {
        /// First day to count (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg, requires = "to")]
        from: Option<Date>,

        /// Last day to count (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg, requires = "from")]
        to: Option<Date>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Import readings from CSV or JSON
    Import {
        /// Input file (reads stdin when omitted)
        input: Option<PathBuf>,

        /// Input format (guessed from the file extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<TransferFormat>,
    },

    /// Export every reading of a range of days
    Export {
        #[command(flatten)]
        range: RangeArgs,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: TransferFormat,
    },

    /// Show the instrument log entries of a day
    Logs {
        /// Day to show (YYYY-MM-DD)
        #[arg(value_parser = parse_date_arg)]
        date: Date,

        /// Log directory (defaults to the configured directory)
        #[arg(long)]
        dir: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments of the `archive` command
#[derive(Debug, Clone, Args)]
pub struct ArchiveArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Channel to plot (flux, temperature, pressure, humidity)
    #[arg(short, long)]
    pub channel: Option<Channel>,

    /// Maximum number of points
    #[arg(short, long, conflicts_with = "detail")]
    pub points: Option<usize>,

    /// Detail level, from 1 to the configured number of steps
    #[arg(short, long)]
    pub detail: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Configuration keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Reading database path
    Database,
    /// Instrument log directory
    LogsDir,
    /// Default channel
    Channel,
    /// Point budget at full detail
    MaxPoints,
    /// Number of detail levels
    DetailSteps,
    /// Detail level used when none is given
    DefaultDetail,
    /// Default output format
    Format,
    /// Disable colored output
    NoColor,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Reset a configuration value to its default
    Unset {
        /// Configuration key to reset
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init,
}

fn parse_date_arg(s: &str) -> Result<Date, String> {
    parse_date(s).map_err(|e| e.to_string())
}
