//! Flight-schedule metadata extraction from parquet.
//!
//! The schedule-selection step produces a parquet file with one row per
//! flight and string-typed attribute columns. This module groups the
//! requested columns by value into the raw metadata shape the column index
//! consumes, recording source row indices alongside the flight ids.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use arrow::array::{Array, StringArray};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use pax_core::index::{RawColumnMetadata, RawValueEntry};

/// Load per-column metadata for `metadata_columns` from a parquet flight
/// schedule. `flight_id_column` supplies the flight identifiers.
///
/// Rows with a null flight id or a null value in a requested column are
/// skipped for that column. Requested columns must exist and be
/// string-typed.
pub fn load_schedule_metadata(
    path: impl AsRef<Path>,
    flight_id_column: &str,
    metadata_columns: &[&str],
) -> Result<Vec<RawColumnMetadata>, Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut grouped: BTreeMap<String, BTreeMap<String, RawValueEntry>> = metadata_columns
        .iter()
        .map(|column| (column.to_string(), BTreeMap::new()))
        .collect();
    let mut row_offset = 0u64;

    for batch in reader {
        let batch = batch?;
        let ids = string_column(&batch, flight_id_column)?;

        for column in metadata_columns {
            let values = string_column(&batch, column)?;
            let entries = grouped
                .get_mut(*column)
                .expect("requested columns are pre-registered");

            for row in 0..batch.num_rows() {
                if ids.is_null(row) || values.is_null(row) {
                    continue;
                }
                let entry = entries.entry(values.value(row).to_string()).or_default();
                entry.flights.push(ids.value(row).to_string());
                entry.indices.push(row_offset + row as u64);
            }
        }

        row_offset += batch.num_rows() as u64;
    }

    Ok(grouped
        .into_iter()
        .map(|(column, values)| RawColumnMetadata { column, values })
        .collect())
}

fn string_column<'a>(
    batch: &'a arrow::record_batch::RecordBatch,
    name: &str,
) -> Result<&'a StringArray, Box<dyn std::error::Error>> {
    let array = batch
        .column_by_name(name)
        .ok_or_else(|| format!("schedule is missing column '{}'", name))?;
    array
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| format!("schedule column '{}' is not a string column", name).into())
}
