use crate::models::{NarrativeSummary, Profile};

const PREVIEW_COLUMNS: usize = 5;

/// Turns a finished profile into narrative text. Implementations must be
/// pure with respect to the profile and cope with a profile that has no
/// columns.
pub trait NarrativeGenerator: Send + Sync {
    fn summarize(&self, profile: &Profile) -> NarrativeSummary;
}

impl<F> NarrativeGenerator for F
where
    F: Fn(&Profile) -> NarrativeSummary + Send + Sync,
{
    fn summarize(&self, profile: &Profile) -> NarrativeSummary {
        self(profile)
    }
}

/// Deterministic stand-in used until a text-generation backend is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderNarrator;

impl NarrativeGenerator for PlaceholderNarrator {
    fn summarize(&self, profile: &Profile) -> NarrativeSummary {
        let preview = profile
            .columns
            .iter()
            .take(PREVIEW_COLUMNS)
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        NarrativeSummary {
            dataset_summary: format!(
                "The dataset has {} rows and {} columns. Columns include: {}",
                profile.row_count, profile.column_count, preview
            ),
            key_findings: vec![
                "This is a placeholder LLM summary.".to_string(),
                "Once LLM integration is added, this will contain real insights.".to_string(),
            ],
            data_quality_issues: vec![
                "Data quality issues will be listed here in a later version.".to_string(),
            ],
            next_questions: vec![
                "What is the main KPI you care about in this dataset?".to_string(),
                "Are there any target variables for modeling?".to_string(),
            ],
        }
    }
}
