//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use fluxview_store::ImportResult;
use fluxview_types::{Channel, ChartPoint, Reading};
use owo_colors::OwoColorize;
use serde::Serialize;
use time::Date;

use crate::util::{format_date, format_timestamp};

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Omit header row in CSV output.
    pub no_header: bool,
    /// Use compact JSON output (no pretty-printing).
    pub compact: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self {
            no_color,
            ..Self::default()
        }
    }

    /// Create with no_header option for CSV output.
    pub fn with_no_header(mut self, no_header: bool) -> Self {
        self.no_header = no_header;
        self
    }

    /// Create with compact JSON option.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Serialize value to JSON string, respecting compact option.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        };
        Ok(json + "\n")
    }

    /// Section heading, bold unless colors are disabled.
    fn heading(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.bold().to_string()
        }
    }

    fn csv_header(&self, header: &str) -> String {
        if self.no_header {
            String::new()
        } else {
            format!("{}\n", header)
        }
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

// ============================================================================
// Chart points
// ============================================================================

#[must_use]
pub fn format_points_text(
    channel: Channel,
    points: &[ChartPoint],
    opts: &FormatOptions,
) -> String {
    if points.is_empty() {
        return "No readings in the selected range.\n".to_string();
    }

    let mut output = opts.heading(&format!("{} ({} points)", channel.label(), points.len()));
    output.push('\n');
    for point in points {
        output.push_str(&format!(
            "  {}  {:>12.4}\n",
            format_timestamp(point.timestamp),
            point.value
        ));
    }
    output
}

#[must_use]
pub fn format_points_csv(
    channel: Channel,
    points: &[ChartPoint],
    opts: &FormatOptions,
) -> String {
    let mut output = opts.csv_header(&format!("timestamp,{}", channel.name()));
    for point in points {
        output.push_str(&format!(
            "{},{}\n",
            format_timestamp(point.timestamp),
            point.value
        ));
    }
    output
}

pub fn format_points_json(
    channel: Channel,
    points: &[ChartPoint],
    opts: &FormatOptions,
) -> Result<String> {
    #[derive(Serialize)]
    struct Series<'a> {
        channel: Channel,
        label: &'static str,
        points: &'a [ChartPoint],
    }

    opts.as_json(&Series {
        channel,
        label: channel.label(),
        points,
    })
}

// ============================================================================
// Readings
// ============================================================================

#[must_use]
pub fn format_readings_text(readings: &[Reading], opts: &FormatOptions) -> String {
    let Some(first) = readings.first() else {
        return "No readings found.\n".to_string();
    };

    let mut output = opts.heading(&format!(
        "Readings for {} ({}):",
        format_date(first.date()),
        readings.len()
    ));
    output.push_str("\n\n");
    output.push_str(&format!(
        "  {:23}  {:>12}  {:>12}  {:>12}  {:>12}\n",
        "Timestamp",
        Channel::Flux.label(),
        Channel::Temperature.label(),
        Channel::Pressure.label(),
        Channel::Humidity.label()
    ));
    output.push_str(&format!("  {}\n", "-".repeat(23 + 4 * 14)));
    for r in readings {
        output.push_str(&format!(
            "  {:23}  {:>12.4}  {:>12.2}  {:>12.2}  {:>12.2}\n",
            format_timestamp(r.timestamp),
            r.flux,
            r.temperature,
            r.pressure,
            r.humidity
        ));
    }
    output
}

#[must_use]
pub fn format_readings_csv(readings: &[Reading], opts: &FormatOptions) -> String {
    let mut output = opts.csv_header("timestamp,flux,temperature,pressure,humidity");
    for r in readings {
        output.push_str(&format!(
            "{},{},{},{},{}\n",
            format_timestamp(r.timestamp),
            r.flux,
            r.temperature,
            r.pressure,
            r.humidity
        ));
    }
    output
}

pub fn format_readings_json(readings: &[Reading], opts: &FormatOptions) -> Result<String> {
    opts.as_json(&readings)
}

// ============================================================================
// Dates
// ============================================================================

#[must_use]
pub fn format_dates_text(dates: &[Date], opts: &FormatOptions) -> String {
    if dates.is_empty() {
        return "No days with readings in the selected range.\n".to_string();
    }

    let mut output = opts.heading(&format!("Days with readings ({}):", dates.len()));
    output.push('\n');
    for date in dates {
        output.push_str(&format!("  {}\n", format_date(*date)));
    }
    output
}

#[must_use]
pub fn format_dates_csv(dates: &[Date], opts: &FormatOptions) -> String {
    let mut output = opts.csv_header("date");
    for date in dates {
        output.push_str(&format_date(*date));
        output.push('\n');
    }
    output
}

pub fn format_dates_json(dates: &[Date], opts: &FormatOptions) -> Result<String> {
    let dates: Vec<String> = dates.iter().map(|d| format_date(*d)).collect();
    opts.as_json(&dates)
}

// ============================================================================
// Logs
// ============================================================================

#[must_use]
pub fn format_logs_text(date: Date, entries: &[String], opts: &FormatOptions) -> String {
    if entries.is_empty() {
        return format!("No log entries for {}.\n", format_date(date));
    }

    let mut output = opts.heading(&format!(
        "Log for {} ({} entries):",
        format_date(date),
        entries.len()
    ));
    output.push('\n');
    for entry in entries {
        output.push_str(&format!("  {}\n", entry));
    }
    output
}

#[must_use]
pub fn format_logs_csv(entries: &[String], opts: &FormatOptions) -> String {
    let mut output = opts.csv_header("entry");
    for entry in entries {
        output.push_str(&csv_escape(entry));
        output.push('\n');
    }
    output
}

// ============================================================================
// Import
// ============================================================================

/// Human-readable import summary, listing at most ten errors.
#[must_use]
pub fn format_import_text(result: &ImportResult) -> String {
    let mut output = String::from("Import complete:\n");
    output.push_str(&format!("  Total records: {}\n", result.total));
    output.push_str(&format!("  Imported: {}\n", result.imported));

    if !result.errors.is_empty() {
        output.push_str(&format!("\nErrors ({}):\n", result.errors.len()));
        for err in result.errors.iter().take(10) {
            output.push_str(&format!("  {}\n", err));
        }
        if result.errors.len() > 10 {
            output.push_str(&format!(
                "  ... and {} more errors\n",
                result.errors.len() - 10
            ));
        }
    }
    output
}
