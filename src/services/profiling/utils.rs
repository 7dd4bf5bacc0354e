use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use std::collections::HashSet;

// Cheap shape check so free text never reaches the chrono parsers.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{1,4}[-/]\d{1,2}[-/]\d{1,4}(?:[ T]\d{1,2}:\d{2}(?::\d{2}(?:\.\d+)?)?)?(?:Z|[+-]\d{2}:?\d{2})?$")
        .expect("date shape pattern compiles")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%d-%m-%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%m-%Y",
];

pub fn is_date_string(s: &str) -> bool {
    let s = s.trim();
    if !DATE_SHAPE.is_match(s) {
        return false;
    }

    DateTime::parse_from_rfc3339(s).is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(s, format).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|format| NaiveDate::parse_from_str(s, format).is_ok())
}

pub fn is_number_string(s: &str) -> bool {
    s.trim().parse::<f64>().is_ok()
}

pub fn is_float(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Float32 | DataType::Float64)
}

/// Non-missing values of a string series. `None` for any other dtype.
pub fn string_values(series: &Series) -> PolarsResult<Option<Vec<&str>>> {
    if !matches!(series.dtype(), DataType::String) {
        return Ok(None);
    }
    Ok(Some(series.str()?.into_iter().flatten().collect()))
}

/// Non-missing values of a numeric (or numeric-string) series as `f64`.
/// NaN counts as missing, the same way the loader treats a `NaN` cell.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    // Same parser as inference, so padded cells like " 5" still count.
    if let Some(values) = string_values(series)? {
        return Ok(values
            .into_iter()
            .filter_map(|s| s.trim().parse::<f64>().ok())
            .filter(|v| !v.is_nan())
            .collect());
    }

    let values = series.cast(&DataType::Float64)?;
    Ok(values
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    let nulls = series.null_count();
    if !is_float(series.dtype()) {
        return Ok(nulls);
    }

    let nans = series
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| v.is_nan())
        .count();
    Ok(nulls + nans)
}

/// Distinct non-missing values. Floats compare by exact value, with the
/// two zeros treated as equal.
pub fn distinct_count(series: &Series) -> PolarsResult<usize> {
    if is_float(series.dtype()) {
        let seen: HashSet<u64> = numeric_values(series)?
            .into_iter()
            .map(|v| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() })
            .collect();
        return Ok(seen.len());
    }

    let values = series.drop_nulls();
    if values.is_empty() {
        return Ok(0);
    }
    values.n_unique()
}

pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((min, max)) => Some((min.min(v), max.max(v))),
    })
}
