use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

use crate::error::AppError;
use crate::models::{ChartKind, ChartSpec, ChartValue, ColumnSummary, ColumnType};
use crate::services::profiling::utils::{min_max, numeric_values};

pub const HISTOGRAM_BINS: usize = 10;
pub const TOP_CATEGORIES: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of each bin.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// One histogram for the first numeric column and one bar chart for the
/// first categorical column. A selected column with no values yields no chart.
pub fn build_charts(df: &DataFrame, columns: &[ColumnSummary]) -> Result<Vec<ChartSpec>, AppError> {
    let mut charts = Vec::new();

    if let Some(col) = columns.iter().find(|c| c.column_type == ColumnType::Numeric) {
        let values = numeric_values(df.column(&col.name)?)?;
        match equal_width_histogram(&values, HISTOGRAM_BINS) {
            Some(hist) => {
                debug!("Histogram for {} over {} values", col.name, values.len());
                charts.push(ChartSpec {
                    column: col.name.clone(),
                    kind: ChartKind::Histogram,
                    x: hist.edges.into_iter().map(ChartValue::Number).collect(),
                    y: hist.counts.into_iter().map(|c| c as f64).collect(),
                });
            }
            None => debug!("Numeric column {} has no values, skipping histogram", col.name),
        }
    }

    if let Some(col) = columns.iter().find(|c| c.column_type == ColumnType::Categorical) {
        let top = top_categories(df.column(&col.name)?, TOP_CATEGORIES)?;
        if top.is_empty() {
            debug!("Categorical column {} has no values, skipping bar chart", col.name);
        } else {
            charts.push(ChartSpec {
                column: col.name.clone(),
                kind: ChartKind::Bar,
                y: top.iter().map(|(_, count)| *count as f64).collect(),
                x: top.into_iter().map(|(label, _)| ChartValue::Label(label)).collect(),
            });
        }
    }

    Ok(charts)
}

/// Equal-width binning over the finite values. When every value is the same
/// the range is widened by 0.5 on each side, so the value lands in the
/// middle bin.
pub fn equal_width_histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if bins == 0 {
        return None;
    }

    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let (min, max) = min_max(&finite)?;
    let (lo, hi) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };

    // Halved so `hi - lo` cannot overflow for values near f64::MAX.
    let half_span = hi / 2.0 - lo / 2.0;
    let mut counts = vec![0usize; bins];
    for v in finite {
        // the last bin is closed on the right
        let idx = (((v / 2.0 - lo / 2.0) / half_span) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    let width = half_span / bins as f64 * 2.0;
    let edges = (0..bins).map(|i| lo + i as f64 * width).collect();

    Some(Histogram { edges, counts })
}

/// Most frequent values, highest count first. Ties keep the order in which
/// the values first appear.
pub fn top_categories(series: &Series, limit: usize) -> PolarsResult<Vec<(String, usize)>> {
    let labels = series.cast(&DataType::String)?;

    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for label in labels.str()?.into_iter().flatten() {
        match index.get(label) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(label.to_string(), counts.len());
                counts.push((label.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    Ok(counts)
}
