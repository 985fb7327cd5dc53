//! Archive command - plot-ready points for a range of days.

use anyhow::{Context as _, Result, bail};
use fluxview_store::ArchiveQuery;
use fluxview_types::{DateWindow, point_budget};
use tracing::debug;

use super::Context;
use crate::cli::{ArchiveArgs, OutputFormat};
use crate::config::Config;
use crate::format::{format_points_csv, format_points_json, format_points_text};
use crate::util::format_date;

/// Execute the archive command.
pub fn cmd_archive(args: &ArchiveArgs, ctx: &Context) -> Result<()> {
    let window = DateWindow::whole_days(args.range.from, args.range.last())
        .context("Invalid date range")?;
    let budget = resolve_budget(args.points, args.detail, &ctx.config)?;
    let channel = args.channel.unwrap_or(ctx.config.channel);

    let storage = ctx.open_storage()?;
    let query = ArchiveQuery::new(window, &storage);

    let readings = if query.has_data_in_window()? {
        query.points_in_window(budget)?
    } else {
        debug!(
            "No readings between {} and {}",
            format_date(args.range.from),
            format_date(args.range.last())
        );
        Vec::new()
    };
    debug!(
        "Selected {} points (budget {}) for {}",
        readings.len(),
        budget,
        channel
    );

    let points = channel.project(&readings);
    let opts = ctx.format_options(&args.output);
    let content = match ctx.format(&args.output) {
        OutputFormat::Text => format_points_text(channel, &points, &opts),
        OutputFormat::Csv => format_points_csv(channel, &points, &opts),
        OutputFormat::Json => format_points_json(channel, &points, &opts)?,
    };
    ctx.write(&content)
}

/// Resolve the point budget: explicit `--points`, then `--detail` scaled by
/// the configured steps, then the configured default detail level.
pub fn resolve_budget(
    points: Option<usize>,
    detail: Option<usize>,
    config: &Config,
) -> Result<usize> {
    if let Some(points) = points {
        if points == 0 {
            bail!("--points must be at least 1");
        }
        return Ok(points);
    }

    let steps = config.detail_steps;
    let position = detail.unwrap_or(config.default_detail);
    if position == 0 || position > steps {
        bail!("Detail level must be between 1 and {}, got {}", steps, position);
    }

    let budget = point_budget(position, steps, config.max_points);
    if budget == 0 {
        bail!(
            "Detail level {} of {} selects no points (max_points = {})",
            position,
            steps,
            config.max_points
        );
    }
    Ok(budget)
}
