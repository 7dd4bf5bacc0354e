use polars::prelude::*;

use super::inference::infer_column_type;
use super::utils::{distinct_count, min_max, missing_count, numeric_values};
use crate::models::{AnomalyFacts, ColumnSummary, ColumnType};

/// Missing share above which a column is flagged `high_missing`.
pub const HIGH_MISSING_THRESHOLD: f64 = 0.3;

pub fn profile_column(series: &Series) -> PolarsResult<(ColumnSummary, AnomalyFacts)> {
    let total = series.len();
    let missing = missing_count(series)?;
    let missing_pct = if total == 0 {
        0.0
    } else {
        missing as f64 / total as f64
    };

    let column_type = infer_column_type(series)?;
    let summary = ColumnSummary {
        name: series.name().to_string(),
        column_type,
        missing_pct,
        n_unique: distinct_count(series)?,
    };

    let facts = detect_anomalies(series, &summary)?;
    Ok((summary, facts))
}

pub fn detect_anomalies(series: &Series, summary: &ColumnSummary) -> PolarsResult<AnomalyFacts> {
    let mut facts = AnomalyFacts::default();

    if summary.missing_pct > HIGH_MISSING_THRESHOLD {
        facts.high_missing = Some(summary.missing_pct);
    }

    if summary.column_type == ColumnType::Numeric {
        let (min, max) = min_max(&numeric_values(series)?).unwrap_or((0.0, 0.0));
        facts.min = Some(min);
        facts.max = Some(max);
    }

    Ok(facts)
}
