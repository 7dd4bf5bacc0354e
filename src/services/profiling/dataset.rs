use polars::prelude::*;
use tracing::debug;

use super::column::profile_column;
use crate::error::AppError;
use crate::models::{AnomalyRecord, Profile};

/// Profiles every column in table order. A table without columns yields
/// an empty profile rather than an error.
pub fn build_profile(df: &DataFrame) -> Result<Profile, AppError> {
    if df.width() == 0 {
        debug!("Table has no columns, returning empty profile");
        return Ok(Profile::empty());
    }

    let mut columns = Vec::with_capacity(df.width());
    let mut anomalies = AnomalyRecord::new();

    for series in df.get_columns() {
        let (summary, facts) = profile_column(series)?;
        debug!(
            "Profiled column {}: type={}, missing_pct={:.3}, n_unique={}",
            summary.name, summary.column_type, summary.missing_pct, summary.n_unique
        );

        if !facts.is_empty() {
            anomalies.insert(summary.name.clone(), facts);
        }
        columns.push(summary);
    }

    Ok(Profile {
        row_count: df.height(),
        column_count: columns.len(),
        columns,
        anomalies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColumnType;

    fn sample_frame() -> DataFrame {
        df!(
            "age" => &[Some(25i64), Some(30), None, Some(40)],
            "city" => &["NY", "LA", "NY", "NY"]
        )
        .unwrap()
    }

    #[test]
    fn profiles_every_column_in_order() {
        let profile = build_profile(&sample_frame()).unwrap();

        assert_eq!(profile.row_count, 4);
        assert_eq!(profile.column_count, 2);
        assert_eq!(profile.columns.len(), profile.column_count);

        let age = &profile.columns[0];
        assert_eq!(age.name, "age");
        assert_eq!(age.column_type, ColumnType::Numeric);
        assert_eq!(age.missing_pct, 0.25);
        assert_eq!(age.n_unique, 3);

        let city = &profile.columns[1];
        assert_eq!(city.name, "city");
        assert_eq!(city.column_type, ColumnType::Text);
        assert_eq!(city.n_unique, 2);
    }

    #[test]
    fn anomalies_only_for_flagged_columns() {
        let profile = build_profile(&sample_frame()).unwrap();

        assert_eq!(profile.anomalies.len(), 1);
        let age = &profile.anomalies["age"];
        assert_eq!(age.min, Some(25.0));
        assert_eq!(age.max, Some(40.0));
        assert!(!profile.anomalies.contains_key("city"));
    }

    #[test]
    fn low_cardinality_column_is_categorical() {
        let df = df!("city" => &[
            "NY", "NY", "NY", "NY", "NY", "NY", "LA", "NY", "NY", "NY", "NY",
        ])
        .unwrap();
        let profile = build_profile(&df).unwrap();
        // 2 distinct / 11 rows
        assert_eq!(profile.columns[0].column_type, ColumnType::Categorical);
    }

    #[test]
    fn empty_table_gives_empty_profile() {
        let profile = build_profile(&DataFrame::empty()).unwrap();
        assert_eq!(profile, Profile::empty());
    }

    #[test]
    fn zero_row_table() {
        let df = DataFrame::new(vec![
            Series::new_empty("a", &DataType::String),
            Series::new_empty("b", &DataType::String),
        ])
        .unwrap();
        let profile = build_profile(&df).unwrap();

        assert_eq!(profile.row_count, 0);
        assert_eq!(profile.column_count, 2);
        assert!(profile.columns.iter().all(|c| c.missing_pct == 0.0));
        assert!(profile.anomalies.is_empty());
    }

    #[test]
    fn profiling_is_idempotent() {
        let df = sample_frame();
        assert_eq!(build_profile(&df).unwrap(), build_profile(&df).unwrap());
    }

    #[test]
    fn missing_pct_stays_in_unit_interval() {
        let df = df!(
            "a" => &[None::<f64>, None, None],
            "b" => &[Some("x"), None, Some("y")],
            "c" => &[1i64, 2, 3]
        )
        .unwrap();
        let profile = build_profile(&df).unwrap();
        for column in &profile.columns {
            assert!((0.0..=1.0).contains(&column.missing_pct));
            assert!(column.n_unique <= profile.row_count);
        }
    }
}
