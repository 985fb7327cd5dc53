//! Stats command - reading counts.

use anyhow::{Context as _, Result};
use fluxview_store::Storage;
use fluxview_types::DateWindow;
use serde::Serialize;
use time::Date;

use super::Context;
use crate::cli::{OutputArgs, OutputFormat};
use crate::util::format_date;

#[derive(Debug, Serialize)]
struct Stats {
    database: String,
    total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    window: Option<WindowStats>,
}

#[derive(Debug, Serialize)]
struct WindowStats {
    from: String,
    to: String,
    readings: u64,
    days: usize,
}

/// Execute the stats command.
pub fn cmd_stats(
    range: Option<(Date, Date)>,
    output: &OutputArgs,
    ctx: &Context,
) -> Result<()> {
    let storage = ctx.open_storage()?;
    let total = storage.data_count()?;

    let window = match range {
        Some((from, to)) => {
            let window = DateWindow::whole_days(from, to).context("Invalid date range")?;
            Some(WindowStats {
                from: format_date(from),
                to: format_date(to),
                readings: storage.data_count_between(window.begin(), window.end())?,
                days: storage
                    .dates_with_data_between(window.begin(), window.end())?
                    .len(),
            })
        }
        None => None,
    };

    let stats = Stats {
        database: ctx.database.display().to_string(),
        total,
        window,
    };

    let opts = ctx.format_options(output);
    let content = match ctx.format(output) {
        OutputFormat::Json => opts.as_json(&stats)?,
        OutputFormat::Csv => {
            let mut out = if opts.no_header {
                String::new()
            } else {
                "total,from,to,readings,days\n".to_string()
            };
            match &stats.window {
                Some(w) => out.push_str(&format!(
                    "{},{},{},{},{}\n",
                    stats.total, w.from, w.to, w.readings, w.days
                )),
                None => out.push_str(&format!("{},,,,\n", stats.total)),
            }
            out
        }
        OutputFormat::Text => {
            let mut out = format!("Database: {}\n", stats.database);
            out.push_str(&format!("  Readings: {}\n", stats.total));
            if let Some(w) = &stats.window {
                out.push_str(&format!("\n{} to {}:\n", w.from, w.to));
                out.push_str(&format!("  Readings: {}\n", w.readings));
                out.push_str(&format!("  Days with data: {}\n", w.days));
            }
            out
        }
    };
    ctx.write(&content)
}
