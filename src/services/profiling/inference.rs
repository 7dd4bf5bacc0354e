use polars::prelude::*;

use super::utils::{distinct_count, is_date_string, is_number_string, string_values};
use crate::models::ColumnType;

/// Below this share of distinct values a non-numeric, non-date column is
/// treated as categorical.
pub const CATEGORICAL_UNIQUE_RATIO: f64 = 0.2;

/// Classifies a column in priority order: numeric, datetime, then
/// categorical or text by unique ratio.
///
/// A string column only counts as numeric or datetime when it has at least
/// one value; an empty or all-missing string column falls through to the
/// ratio rule, which makes it categorical.
pub fn infer_column_type(series: &Series) -> PolarsResult<ColumnType> {
    let dtype = series.dtype();
    if dtype.is_numeric() {
        return Ok(ColumnType::Numeric);
    }
    if matches!(dtype, DataType::Date | DataType::Datetime(_, _)) {
        return Ok(ColumnType::Datetime);
    }

    if let Some(values) = string_values(series)? {
        if !values.is_empty() {
            if values.iter().all(|v| is_number_string(v)) {
                return Ok(ColumnType::Numeric);
            }
            if values.iter().all(|v| is_date_string(v)) {
                return Ok(ColumnType::Datetime);
            }
        }
    }

    let unique_ratio = distinct_count(series)? as f64 / series.len().max(1) as f64;
    if unique_ratio < CATEGORICAL_UNIQUE_RATIO {
        Ok(ColumnType::Categorical)
    } else {
        Ok(ColumnType::Text)
    }
}
