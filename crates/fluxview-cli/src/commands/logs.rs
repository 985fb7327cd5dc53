//! Logs command - instrument log entries for a day.

use anyhow::Result;
use time::Date;

use super::Context;
use crate::cli::{OutputArgs, OutputFormat};
use crate::format::{format_logs_csv, format_logs_text};
use crate::logs::LogSource;

/// Execute the logs command against any log source.
pub fn cmd_logs(
    source: &dyn LogSource,
    date: Date,
    output: &OutputArgs,
    ctx: &Context,
) -> Result<()> {
    let entries = if source.has_logs_for_date(date) {
        source.logs_by_date(date)?
    } else {
        Vec::new()
    };

    let opts = ctx.format_options(output);
    let content = match ctx.format(output) {
        OutputFormat::Json => opts.as_json(&entries)?,
        OutputFormat::Csv => format_logs_csv(&entries, &opts),
        OutputFormat::Text => format_logs_text(date, &entries, &opts),
    };
    ctx.write(&content)
}
