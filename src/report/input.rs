//! The document description a caller hands to the engine.
//!
//! Field names follow the camelCase JSON the console sends, so an input can
//! be deserialized straight from a request body or a file.

use chrono::{DateTime, Utc};
use orcas_types::Value;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocumentInput {
    pub name: String,
    pub report_kind: ReportKind,
    /// Replaces the kind's label in the page header when set.
    #[serde(default)]
    pub report_kind_label: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: MetadataInput,
    #[serde(default)]
    pub legend_items: Vec<LegendItem>,
    #[serde(default)]
    pub chart_image: Option<ChartImage>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl ReportDocumentInput {
    pub fn new(name: impl Into<String>, report_kind: ReportKind) -> Self {
        Self {
            name: name.into(),
            report_kind,
            report_kind_label: None,
            created_at: None,
            metadata: MetadataInput::default(),
            legend_items: Vec::new(),
            chart_image: None,
            sections: Vec::new(),
        }
    }

    /// The label shown at the top-right of every page.
    pub fn kind_label(&self) -> &str {
        match &self.report_kind_label {
            Some(label) if !label.trim().is_empty() => label,
            _ => self.report_kind.label(),
        }
    }
}

/// The report categories the console produces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ReportKind {
    ScoringScorecard,
    CompareStocks,
    CompareHistorical,
    SimulationScenario,
    AnalysisScreening,
    AnalysisMetricRanking,
    /// An unrecognized kind, displayed verbatim.
    Other(String),
}

impl ReportKind {
    pub fn label(&self) -> &str {
        match self {
            ReportKind::ScoringScorecard => "Scoring Scorecard",
            ReportKind::CompareStocks => "Stock Comparison",
            ReportKind::CompareHistorical => "Historical Comparison",
            ReportKind::SimulationScenario => "Simulation Scenario",
            ReportKind::AnalysisScreening => "Screening Analysis",
            ReportKind::AnalysisMetricRanking => "Metric Ranking Analysis",
            ReportKind::Other(raw) => raw,
        }
    }
}

impl From<String> for ReportKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "scoring_scorecard" => ReportKind::ScoringScorecard,
            "compare_stocks" => ReportKind::CompareStocks,
            "compare_historical" => ReportKind::CompareHistorical,
            "simulation_scenario" => ReportKind::SimulationScenario,
            "analysis_screening" => ReportKind::AnalysisScreening,
            "analysis_metric_ranking" => ReportKind::AnalysisMetricRanking,
            _ => ReportKind::Other(raw),
        }
    }
}

impl From<&str> for ReportKind {
    fn from(raw: &str) -> Self {
        ReportKind::from(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MetadataRow {
    pub label: String,
    #[serde(default)]
    pub value: Value,
}

impl MetadataRow {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Metadata as either labelled rows in display order or a plain key/value
/// object whose keys are humanized for display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetadataInput {
    Ordered(Vec<MetadataRow>),
    Map(BTreeMap<String, Value>),
}

impl Default for MetadataInput {
    fn default() -> Self {
        MetadataInput::Ordered(Vec::new())
    }
}

impl MetadataInput {
    pub fn rows(&self) -> Vec<MetadataRow> {
        match self {
            MetadataInput::Ordered(rows) => rows.clone(),
            MetadataInput::Map(map) => map
                .iter()
                .map(|(key, value)| MetadataRow::new(humanize_key(key), value.clone()))
                .collect(),
        }
    }
}

/// `"market_cap"` becomes `"Market Cap"`.
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegendItem {
    pub label: String,
    /// `#RGB` or `#RRGGBB`; anything else draws black.
    #[serde(default, alias = "colorHex")]
    pub color: Option<String>,
}

impl LegendItem {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: Some(color.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartImage {
    /// A `data:` URI or bare base64 of a PNG, JPEG or GIF raster.
    #[serde(alias = "sourceData")]
    pub source: String,
    #[serde(default)]
    pub intrinsic_width: Option<f32>,
    #[serde(default)]
    pub intrinsic_height: Option<f32>,
}

impl ChartImage {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            intrinsic_width: None,
            intrinsic_height: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Section {
    pub fn new<S: Into<String>>(title: impl Into<String>, columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            title: title.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_row<V: Into<Value>>(mut self, cells: impl IntoIterator<Item = V>) -> Self {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}
