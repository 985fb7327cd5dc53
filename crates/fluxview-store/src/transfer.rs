//! CSV and JSON export/import of readings.
//!
//! Both formats use the serde representation of [`Reading`]: columns
//! `timestamp,flux,temperature,pressure,humidity`, timestamps written as
//! `YYYY-MM-DD HH:MM:SS.mmm`.

use serde::Serialize;
use tracing::{info, warn};

use fluxview_types::Reading;

use crate::error::{Error, Result};
use crate::storage::Storage;

/// Outcome of an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportResult {
    /// Records found in the input.
    pub total: usize,
    /// Records written to the store.
    pub imported: usize,
    /// One message per rejected record.
    pub errors: Vec<String>,
}

/// Render readings as CSV with a header row.
pub fn export_csv(readings: &[Reading]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for reading in readings {
        writer.serialize(reading)?;
    }
    if readings.is_empty() {
        writer.write_record(["timestamp", "flux", "temperature", "pressure", "humidity"])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Render readings as a pretty-printed JSON array.
pub fn export_json(readings: &[Reading]) -> Result<String> {
    Ok(serde_json::to_string_pretty(readings)?)
}

/// Import readings from CSV produced by [`export_csv`].
///
/// Malformed rows are skipped and reported in [`ImportResult::errors`]; the
/// remaining rows are written in one batch.
pub fn import_csv<S: Storage + ?Sized>(storage: &mut S, data: &str) -> Result<ImportResult> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let mut result = ImportResult::default();
    let mut readings = Vec::new();

    for (index, record) in reader.deserialize::<Reading>().enumerate() {
        result.total += 1;
        match record {
            Ok(reading) => readings.push(reading),
            // Row 1 is the header.
            Err(e) => result.errors.push(format!("Row {}: {}", index + 2, e)),
        }
    }

    finish_import(storage, readings, result)
}

/// Import readings from a JSON array produced by [`export_json`].
///
/// Elements that are not valid readings are skipped and reported; input that
/// is not a JSON array at all is an error.
pub fn import_json<S: Storage + ?Sized>(storage: &mut S, data: &str) -> Result<ImportResult> {
    let values: Vec<serde_json::Value> = serde_json::from_str(data)?;
    let mut result = ImportResult::default();
    let mut readings = Vec::new();

    for (index, value) in values.into_iter().enumerate() {
        result.total += 1;
        match serde_json::from_value::<Reading>(value) {
            Ok(reading) => readings.push(reading),
            Err(e) => result.errors.push(format!("Record {}: {}", index + 1, e)),
        }
    }

    finish_import(storage, readings, result)
}

fn finish_import<S: Storage + ?Sized>(
    storage: &mut S,
    readings: Vec<Reading>,
    mut result: ImportResult,
) -> Result<ImportResult> {
    if !readings.is_empty() {
        result.imported = storage.write_batch(&readings)?;
    }
    if !result.errors.is_empty() {
        warn!("Skipped {} invalid records", result.errors.len());
    }
    info!("Imported {} of {} records", result.imported, result.total);
    Ok(result)
}
