pub mod charts;
pub mod csv_loader;
pub mod narrative;
pub mod profiling;

use polars::prelude::DataFrame;

use crate::error::AppError;
use crate::models::AnalysisResult;
use self::narrative::NarrativeGenerator;

/// Runs the whole pipeline over one table: profile, charts, narrative.
pub fn analyze_table(
    df: &DataFrame,
    narrator: &dyn NarrativeGenerator,
) -> Result<AnalysisResult, AppError> {
    let start = std::time::Instant::now();

    let profile_start = std::time::Instant::now();
    let profile = profiling::build_profile(df)?;
    tracing::info!(
        "Profile built in {:?}: {} rows, {} columns, {} with anomalies",
        profile_start.elapsed(),
        profile.row_count,
        profile.column_count,
        profile.anomalies.len()
    );

    let charts_start = std::time::Instant::now();
    let charts = charts::build_charts(df, &profile.columns)?;
    tracing::info!("Built {} charts in {:?}", charts.len(), charts_start.elapsed());

    let narrative = narrator.summarize(&profile);

    tracing::info!("Analysis completed in {:?}", start.elapsed());
    Ok(AnalysisResult::assemble(profile, charts, narrative))
}
