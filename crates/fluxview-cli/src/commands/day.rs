//! Day commands - browse the archive one day at a time.

use anyhow::{Context as _, Result};
use fluxview_store::Storage;
use fluxview_types::{DateWindow, Reading};
use time::Date;

use super::Context;
use crate::cli::{OutputArgs, OutputFormat, RangeArgs};
use crate::format::{
    format_dates_csv, format_dates_json, format_dates_text, format_readings_csv,
    format_readings_json, format_readings_text,
};
use crate::util::format_date;

/// Which day the `day` command shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTarget {
    /// The given day itself.
    On(Date),
    /// The first day with data after the given one.
    After(Date),
    /// The last day with data before the given one.
    Before(Date),
}

impl DayTarget {
    pub fn from_flags(date: Date, next: bool, prev: bool) -> Self {
        if next {
            DayTarget::After(date)
        } else if prev {
            DayTarget::Before(date)
        } else {
            DayTarget::On(date)
        }
    }
}

/// Execute the dates command.
pub fn cmd_dates(range: &RangeArgs, output: &OutputArgs, ctx: &Context) -> Result<()> {
    let window =
        DateWindow::whole_days(range.from, range.last()).context("Invalid date range")?;
    let storage = ctx.open_storage()?;
    let dates = storage.dates_with_data_between(window.begin(), window.end())?;

    let opts = ctx.format_options(output);
    let content = match ctx.format(output) {
        OutputFormat::Text => format_dates_text(&dates, &opts),
        OutputFormat::Csv => format_dates_csv(&dates, &opts),
        OutputFormat::Json => format_dates_json(&dates, &opts)?,
    };
    ctx.write(&content)
}

/// Execute the day command.
///
/// Stepping past the first or last day with data is not an error: a short
/// notice is printed instead.
pub fn cmd_day(target: DayTarget, output: &OutputArgs, ctx: &Context) -> Result<()> {
    let storage = ctx.open_storage()?;

    let Some(readings) = day_readings(&storage, target)? else {
        let notice = match target {
            DayTarget::After(date) => format!("No readings after {}.\n", format_date(date)),
            DayTarget::Before(date) => format!("No readings before {}.\n", format_date(date)),
            DayTarget::On(date) => format!("No readings on {}.\n", format_date(date)),
        };
        eprint!("{}", notice);
        return Ok(());
    };

    let opts = ctx.format_options(output);
    let content = match ctx.format(output) {
        OutputFormat::Text => format_readings_text(&readings, &opts),
        OutputFormat::Csv => format_readings_csv(&readings, &opts),
        OutputFormat::Json => format_readings_json(&readings, &opts)?,
    };
    ctx.write(&content)
}

/// Readings for `target`, or `None` when there is nothing to show.
fn day_readings<S: Storage + ?Sized>(
    storage: &S,
    target: DayTarget,
) -> Result<Option<Vec<Reading>>> {
    let result = match target {
        DayTarget::On(date) => storage.data_batch_by_date(date),
        DayTarget::After(date) => storage.next_data_batch_after(date),
        DayTarget::Before(date) => storage.prev_data_batch_before(date),
    };

    match result {
        Ok(readings) if readings.is_empty() => Ok(None),
        Ok(readings) => Ok(Some(readings)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}
