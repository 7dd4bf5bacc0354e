use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Numeric,
    Categorical,
    Datetime,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
            ColumnType::Datetime => "datetime",
            ColumnType::Text => "text",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub missing_pct: f64,
    pub n_unique: usize,
}

/// Anomaly facts for one column. A column with no facts set is left out of
/// the profile's anomaly map entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_missing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl AnomalyFacts {
    pub fn is_empty(&self) -> bool {
        self.high_missing.is_none() && self.min.is_none() && self.max.is_none()
    }
}

pub type AnomalyRecord = BTreeMap<String, AnomalyFacts>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Histogram,
    Bar,
    // Reserved for time series; nothing emits it yet.
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartValue {
    Number(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub column: String,
    pub kind: ChartKind,
    pub x: Vec<ChartValue>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnSummary>,
    pub anomalies: AnomalyRecord,
}

impl Profile {
    pub fn empty() -> Self {
        Self {
            row_count: 0,
            column_count: 0,
            columns: Vec::new(),
            anomalies: AnomalyRecord::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeSummary {
    pub dataset_summary: String,
    pub key_findings: Vec<String>,
    pub data_quality_issues: Vec<String>,
    pub next_questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnSummary>,
    pub charts: Vec<ChartSpec>,
    pub anomalies: AnomalyRecord,
    #[serde(rename = "llm")]
    pub narrative: NarrativeSummary,
}

impl AnalysisResult {
    pub fn assemble(profile: Profile, charts: Vec<ChartSpec>, narrative: NarrativeSummary) -> Self {
        Self {
            row_count: profile.row_count,
            column_count: profile.column_count,
            columns: profile.columns,
            charts,
            anomalies: profile.anomalies,
            narrative,
        }
    }
}
