//! Import and export commands.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use fluxview_store::{Storage, transfer};
use fluxview_types::DateWindow;

use super::Context;
use crate::cli::{RangeArgs, TransferFormat};
use crate::format::format_import_text;

/// Execute the import command.
pub fn cmd_import(
    input: Option<PathBuf>,
    format: Option<TransferFormat>,
    ctx: &Context,
) -> Result<()> {
    let format = format.unwrap_or_else(|| guess_format(input.as_deref()));

    let data = match &input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            buffer
        }
    };

    let mut storage = ctx.open_storage()?;
    let result = match format {
        TransferFormat::Csv => transfer::import_csv(&mut storage, &data)?,
        TransferFormat::Json => transfer::import_json(&mut storage, &data)?,
    };
    storage.close()?;

    ctx.write(&format_import_text(&result))
}

/// Execute the export command.
pub fn cmd_export(range: &RangeArgs, format: TransferFormat, ctx: &Context) -> Result<()> {
    let window =
        DateWindow::whole_days(range.from, range.last()).context("Invalid date range")?;
    let storage = ctx.open_storage()?;
    let readings = storage.readings_between(window.begin(), window.end())?;

    let content = match format {
        TransferFormat::Csv => transfer::export_csv(&readings)?,
        TransferFormat::Json => transfer::export_json(&readings)? + "\n",
    };
    ctx.write(&content)?;

    if let Some(path) = &ctx.output {
        eprintln!("Exported {} readings to {}", readings.len(), path.display());
    }
    Ok(())
}

/// JSON for `.json` files, CSV otherwise.
fn guess_format(input: Option<&Path>) -> TransferFormat {
    match input.and_then(|p| p.extension()).and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => TransferFormat::Json,
        _ => TransferFormat::Csv,
    }
}
