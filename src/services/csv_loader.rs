use polars::prelude::*;
use std::io::Cursor;

use crate::error::AppError;

// Cells holding any of these, or nothing at all, are read as missing.
const NULL_MARKERS: &[&str] = &["NA", "N/A", "NaN", "nan", "null", "NULL", "None", "#N/A"];

pub fn read_csv(file_data: &[u8]) -> Result<DataFrame, AppError> {
    let start = std::time::Instant::now();
    tracing::info!("Parsing CSV upload, size: {}KB", file_data.len() / 1024);

    let null_values = NullValues::AllColumns(
        NULL_MARKERS.iter().map(|marker| marker.to_string()).collect(),
    );

    let df = CsvReader::new(Cursor::new(file_data.to_vec()))
        .has_header(true)
        .infer_schema(None)
        .with_try_parse_dates(true)
        .with_null_values(Some(null_values))
        .finish()
        .map_err(|e| {
            tracing::warn!("Failed to parse CSV: {}", e);
            AppError::Parse(format!("Failed to parse CSV: {}", e))
        })?;

    tracing::info!(
        "CSV parsed in {:?}: {} rows, {} columns",
        start.elapsed(),
        df.height(),
        df.width()
    );
    Ok(df)
}
