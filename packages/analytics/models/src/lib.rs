#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Query parameter and result types for the ASRS dashboard analytics layer.
//!
//! These are the shapes handed to presentation adapters. They never expose
//! raw dataset rows; every type serializes to camelCase JSON.

use asrs_dashboard_incident_models::{
    IncidentType, Risk, Severity, TrendDirection, YearRange, YearSpan,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

// ── Timeline ────────────────────────────────────────────

/// Incident count for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    /// Calendar year.
    pub year: i32,
    /// Number of incidents reported in that year.
    pub incidents: u64,
}

/// Inclusive bounds of the years present in a result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Earliest year, if any.
    pub start: Option<i32>,
    /// Latest year, if any.
    pub end: Option<i32>,
}

/// Result of a timeline query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResult {
    /// One point per year, ascending.
    pub data: Vec<TimelinePoint>,
    /// Year marking the benchmark split on the chart.
    pub benchmark_year: i32,
    /// All rows that passed the filter, including undated ones.
    pub total_incidents: u64,
    /// Years covered by `data`.
    pub date_range: DateRange,
}

// ── Contributing factors ────────────────────────────────

/// One contributing factor with its mention count and risk label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorCount {
    /// Factor name.
    pub factor: String,
    /// Number of mentions.
    pub count: u64,
    /// Risk label relative to the most frequent factor.
    pub risk: Risk,
}

/// Absolute count thresholds used for risk labelling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskThresholdCounts {
    /// Minimum count for [`Risk::High`].
    pub high: u64,
    /// Minimum count for [`Risk::Medium`].
    pub medium: u64,
}

/// Result of a top-factors query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorsResult {
    /// Factors ordered by descending count.
    pub factors: Vec<FactorCount>,
    /// Rows that passed the year filter.
    pub total_incidents_analyzed: u64,
    /// Thresholds applied to `factors`.
    pub risk_thresholds: RiskThresholdCounts,
}

// ── Pagination & listing ────────────────────────────────

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// 1-indexed page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
}

/// One page of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Where this page sits.
    pub pagination: Pagination,
}

/// Parameters for the incident listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListIncidentsParams {
    /// Year filter.
    #[serde(default)]
    pub years: YearRange,
    /// 1-indexed page.
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Airport code, matched case-insensitively.
    pub location: Option<String>,
    /// Severity name (`High`, `Medium`, `Low`), case-insensitive.
    pub severity: Option<String>,
}

impl Default for ListIncidentsParams {
    fn default() -> Self {
        Self {
            years: YearRange::unbounded(),
            page: 1,
            limit: 20,
            location: None,
            severity: None,
        }
    }
}

/// Table row for an incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentSummary {
    /// Accession number.
    pub acn: String,
    /// `YYYY-MM-DD`, or the raw date when it did not parse.
    pub date: String,
    /// Airport code or locale text.
    pub location: String,
    /// Derived incident type.
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    /// Heuristic severity.
    pub severity: Severity,
}

/// Result of the incident listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentListResult {
    /// Rows on the requested page.
    pub reports: Vec<IncidentSummary>,
    /// Page metadata.
    pub pagination: Pagination,
}

// ── Incident detail ─────────────────────────────────────

/// Where an incident happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentLocation {
    /// Airport code, or the locale text, or `Unknown`.
    pub airport_code: String,
    /// Full locale reference.
    pub airport_name: Option<String>,
    /// State reference.
    pub state: Option<String>,
}

/// Aircraft involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentAircraft {
    /// Make/model, or `Unknown`.
    #[serde(rename = "type")]
    pub aircraft_type: String,
    /// Operator.
    pub operator: Option<String>,
    /// Flight phase.
    pub flight_phase: Option<String>,
}

/// Weather at the time of the incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentWeather {
    /// Conditions, or `Unknown`.
    pub conditions: String,
}

/// Full view of one incident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDetail {
    /// Accession number.
    pub acn: String,
    /// Headline.
    pub title: String,
    /// Heuristic severity.
    pub severity: Severity,
    /// `YYYY-MM-DD`, or the raw date.
    pub date: String,
    /// e.g. `March 01, 2017`, or the raw date.
    pub date_formatted: String,
    /// Location block.
    pub location: IncidentLocation,
    /// Aircraft block.
    pub aircraft: IncidentAircraft,
    /// Weather block.
    pub weather: IncidentWeather,
    /// Synopsis or narrative.
    pub narrative: String,
    /// Aviation terms found in the narrative.
    pub highlighted_terms: Vec<String>,
    /// Exploded contributing factors.
    pub contributing_factors: Vec<String>,
}

/// A record that shares vocabulary with a target record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarIncident {
    /// Accession number.
    pub acn: String,
    /// Airport code or locale text.
    pub location: String,
    /// Synthetic similarity percentage.
    pub similarity: u32,
    /// Which terms matched.
    pub match_reason: String,
}

/// Incident detail plus its similar incidents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDetailResult {
    /// The incident.
    pub incident: IncidentDetail,
    /// Keyword-overlap neighbours.
    pub similar_incidents: Vec<SimilarIncident>,
}

// ── Period comparison ───────────────────────────────────

/// Volume for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    /// The years covered.
    pub span: YearSpan,
    /// Dated incidents in the span.
    pub count: u64,
    /// `count / span.years()`, or `0` for an empty span.
    pub annual_count: f64,
}

/// Share of factor mentions in both periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorVariance {
    /// Factor name.
    pub factor: String,
    /// Percentage of baseline mentions.
    pub baseline_percent: f64,
    /// Percentage of inference mentions.
    pub inference_percent: f64,
    /// `inference_percent - baseline_percent`.
    pub variance: f64,
}

/// Baseline vs inference comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    /// Baseline volume.
    pub baseline: PeriodStats,
    /// Inference volume.
    pub inference: PeriodStats,
    /// Annualized volume change in percent.
    pub volume_change: f64,
    /// Direction of `volume_change`.
    pub trend: TrendDirection,
    /// Every factor seen in either period, by descending variance.
    pub variances: Vec<FactorVariance>,
    /// Factor with the largest variance.
    pub rising_risk: Option<FactorVariance>,
    /// Factor with the smallest variance.
    pub declining_risk: Option<FactorVariance>,
}

/// One KPI card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaKpi {
    /// Card title.
    pub title: String,
    /// Formatted headline value.
    pub value: String,
    /// Subtitle.
    pub description: String,
    /// Arrow direction.
    pub trend: TrendDirection,
    /// Unformatted value, rounded to one decimal.
    pub raw_value: Option<f64>,
}

/// KPI cards plus the periods they compare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpisResult {
    /// Volume, rising risk, declining risk.
    pub kpis: Vec<DeltaKpi>,
    /// Baseline volume.
    pub baseline: PeriodStats,
    /// Inference volume.
    pub inference: PeriodStats,
}

/// Which breakdown the comparison chart shows.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ComparisonView {
    /// Contributing factors computed from the dataset.
    #[default]
    Factors,
    /// Topic shares from the topic model.
    Topics,
}

/// One bar pair on the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonPoint {
    /// Factor or topic label.
    pub category: String,
    /// Baseline share in percent.
    pub baseline: f64,
    /// Inference share in percent.
    pub inference: f64,
    /// `inference - baseline`.
    pub variance: f64,
}

/// The comparison entry with the largest absolute variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreatestChange {
    /// Factor or topic label.
    pub category: String,
    /// Signed variance.
    pub variance: f64,
    /// `Up` for positive variance, otherwise `Down`.
    pub direction: TrendDirection,
}

/// Result of a comparison chart query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Chart rows.
    pub data: Vec<ComparisonPoint>,
    /// Largest mover, if any rows exist.
    pub greatest_change: Option<GreatestChange>,
    /// e.g. `2012-2017`.
    pub baseline_label: String,
    /// e.g. `2018-2025`.
    pub inference_label: String,
}

// ── Summary & filters ───────────────────────────────────

/// Year coverage of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBounds {
    /// Earliest year.
    pub start: i32,
    /// Latest year.
    pub end: i32,
    /// `end - start + 1`.
    pub span: i32,
}

/// Landing-page summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    /// Every row, dated or not.
    pub total_incidents: u64,
    /// `None` when no row has a year.
    pub year_range: Option<YearBounds>,
    /// Most frequent contributing factor.
    pub primary_risk: String,
    /// When the dataset snapshot behind this summary was built.
    pub last_updated: DateTime<Utc>,
}

/// A state option in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateOption {
    /// State reference as it appears in the data.
    pub code: String,
    /// Display name.
    pub name: String,
}

/// Sidebar filter options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Unique factors, sorted.
    pub contributing_factors: Vec<String>,
    /// Most common aircraft types.
    pub aircraft_types: Vec<String>,
    /// Unique states, sorted.
    pub states: Vec<StateOption>,
    /// Selectable incident types.
    pub incident_types: Vec<IncidentType>,
    /// Selectable severities.
    pub severity_levels: Vec<Severity>,
    /// Year coverage.
    pub year_range: Option<YearBounds>,
}

// ── Topics ──────────────────────────────────────────────

/// Which topic model to query.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TopicModelKind {
    /// Latent Dirichlet allocation.
    #[default]
    Lda,
    /// `BERTopic`.
    Bert,
}

impl TopicModelKind {
    /// Display name of the model family.
    #[must_use]
    pub const fn model_name(self) -> &'static str {
        match self {
            Self::Lda => "LDA",
            Self::Bert => "BERTopic",
        }
    }
}

/// One topic bubble on the scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicCluster {
    /// Topic id.
    pub id: u32,
    /// Projected x coordinate.
    pub x: f64,
    /// Projected y coordinate.
    pub y: f64,
    /// Documents assigned to the topic.
    pub size: u64,
    /// Short label.
    pub label: String,
}

/// A weighted topic keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicKeyword {
    /// Keyword.
    pub keyword: String,
    /// Weight in `0..=1`.
    pub weight: f64,
}

/// A representative narrative for a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicNarrative {
    /// `ACN-` prefixed accession number.
    pub acn: String,
    /// Narrative text, truncated.
    pub narrative: String,
    /// Topic keywords found in the text.
    pub keywords: Vec<String>,
}

/// Topic scatter plot data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicsOverview {
    /// Clusters.
    pub topics: Vec<TopicCluster>,
    /// Model display name.
    pub model: String,
    /// Number of clusters.
    pub num_topics: usize,
    /// Rows in the year-filtered dataset.
    pub total_documents: u64,
    /// Model coherence score.
    pub coherence_score: f64,
}

/// Keywords for one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicKeywordsResult {
    /// Requested topic.
    pub topic_id: u32,
    /// Keywords by descending weight.
    pub keywords: Vec<TopicKeyword>,
}

/// Representative narratives for one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicNarrativesResult {
    /// Requested topic.
    pub topic_id: u32,
    /// Best matching narratives.
    pub narratives: Vec<TopicNarrative>,
}

/// A topic that grew in the inference period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergingPattern {
    /// Topic id.
    pub topic_id: u32,
    /// Topic label.
    pub topic_label: String,
    /// What the cluster is about.
    pub description: String,
    /// Reports assigned to the topic.
    pub report_count: u64,
    /// Quarter the pattern first showed up.
    pub first_appeared: String,
    /// Human readable growth.
    pub growth: String,
    /// Growth in percent.
    pub growth_rate: f64,
}

/// Emerging patterns list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergingPatternsResult {
    /// Patterns, most significant first.
    pub patterns: Vec<EmergingPattern>,
    /// How the patterns were found.
    pub analysis_method: String,
    /// Significance level used.
    pub significance_threshold: f64,
}
