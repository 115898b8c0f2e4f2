#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Normalized ASRS incident record and shared classification types.
//!
//! This crate defines the canonical row shape produced by the dataset
//! loader, plus the small enums (severity, risk, trend direction, incident
//! type) and year-range types that every query in the analytics layer
//! speaks in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Heuristic severity of a single incident report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Severity {
    /// Loss-of-separation language (incursion, near miss, go around, ...).
    High,
    /// Procedural deviations (hold short, crossed, confusion, ...).
    Medium,
    /// Nothing in the text matched a higher rule.
    Low,
}

impl Severity {
    /// Returns all variants, most severe first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::High, Self::Medium, Self::Low]
    }
}

/// Relative risk label for an aggregated count (e.g. a contributing factor).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Risk {
    /// At or above the high threshold.
    High,
    /// At or above the medium threshold.
    Medium,
    /// Below both thresholds.
    Low,
}

/// Direction of a period-over-period change.
#[derive(
    Debug,
    Clone,
    Copy,
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
#[strum(serialize_all = "lowercase")]
pub enum TrendDirection {
    /// Increasing.
    Up,
    /// Decreasing.
    Down,
    /// Within the dead band.
    Neutral,
}

/// Coarse incident type shown in the report table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum IncidentType {
    /// Default when the anomaly text gives no better hint.
    #[serde(rename = "Runway Incursion")]
    #[strum(serialize = "Runway Incursion")]
    RunwayIncursion,
    /// Anomaly mentions taxiing.
    #[serde(rename = "Taxi Deviation")]
    #[strum(serialize = "Taxi Deviation")]
    TaxiDeviation,
    /// Anomaly mentions communication.
    #[serde(rename = "Communication Error")]
    #[strum(serialize = "Communication Error")]
    CommunicationError,
    /// Anomaly mentions a hold.
    #[serde(rename = "Hold Short Violation")]
    #[strum(serialize = "Hold Short Violation")]
    HoldShortViolation,
    /// Offered as a filter option only.
    #[serde(rename = "Clearance Confusion")]
    #[strum(serialize = "Clearance Confusion")]
    ClearanceConfusion,
    /// Offered as a filter option only.
    #[serde(rename = "ATC Miscommunication")]
    #[strum(serialize = "ATC Miscommunication")]
    AtcMiscommunication,
}

impl IncidentType {
    /// Derives the incident type from a raw `Anomaly` value.
    ///
    /// Matching is case-sensitive, first hit wins: `Taxi`, then
    /// `Communication`, then `Hold`.
    #[must_use]
    pub fn from_anomaly(anomaly: Option<&str>) -> Self {
        match anomaly {
            Some(a) if a.contains("Taxi") => Self::TaxiDeviation,
            Some(a) if a.contains("Communication") => Self::CommunicationError,
            Some(a) if a.contains("Hold") => Self::HoldShortViolation,
            _ => Self::RunwayIncursion,
        }
    }

    /// Returns all variants in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::RunwayIncursion,
            Self::TaxiDeviation,
            Self::CommunicationError,
            Self::HoldShortViolation,
            Self::ClearanceConfusion,
            Self::AtcMiscommunication,
        ]
    }
}

/// Optional inclusive year bounds used to filter the dataset.
///
/// When both bounds are `None` the range is unbounded and matches every
/// record, including records without a year. As soon as either bound is
/// set, records without a year never match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRange {
    /// Inclusive lower bound.
    pub start: Option<i32>,
    /// Inclusive upper bound.
    pub end: Option<i32>,
}

impl YearRange {
    /// Creates a range from optional bounds.
    #[must_use]
    pub const fn new(start: Option<i32>, end: Option<i32>) -> Self {
        Self { start, end }
    }

    /// A range with no bounds.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Returns `true` when neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Returns whether a record with the given (possibly missing) year
    /// falls inside this range.
    #[must_use]
    pub fn contains(&self, year: Option<i32>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(year) = year else {
            return false;
        };
        self.start.is_none_or(|s| year >= s) && self.end.is_none_or(|e| year <= e)
    }
}

/// A closed, fully specified year interval such as a baseline or
/// inference period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSpan {
    /// First year, inclusive.
    pub start: i32,
    /// Last year, inclusive.
    pub end: i32,
}

impl YearSpan {
    /// Creates a span.
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// Number of calendar years covered, or `0` for an inverted span.
    #[must_use]
    pub const fn years(&self) -> i32 {
        let n = self.end - self.start + 1;
        if n > 0 { n } else { 0 }
    }

    /// The equivalent bounded [`YearRange`].
    #[must_use]
    pub const fn as_range(&self) -> YearRange {
        YearRange::new(Some(self.start), Some(self.end))
    }
}

impl std::fmt::Display for YearSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// One row of the normalized incident dataset.
///
/// Every free-text field is `None` when the source cell was empty or the
/// column was absent from the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// ASRS accession number. Not guaranteed unique across source files.
    pub acn: String,
    /// Raw `YYYYMM` date string.
    pub date_raw: Option<String>,
    /// First day of the reported month, when `date_raw` parsed.
    pub date_parsed: Option<NaiveDate>,
    /// Calendar year of `date_parsed`.
    pub year: Option<i32>,
    /// Free-text locale reference (e.g. `"ORD.Airport"`).
    pub airport: Option<String>,
    /// Leading 3–4 character code extracted from `airport`.
    pub airport_code: Option<String>,
    /// State reference.
    pub state: Option<String>,
    /// Raw `"; "`-separated contributing factors.
    pub contributing_factors: Option<String>,
    /// Primary problem.
    pub primary_problem: Option<String>,
    /// Aircraft make/model.
    pub aircraft_type: Option<String>,
    /// Flight phase.
    pub flight_phase: Option<String>,
    /// Aircraft operator.
    pub operator: Option<String>,
    /// Weather elements / visibility.
    pub weather: Option<String>,
    /// Flight conditions (VMC, IMC, ...).
    pub flight_conditions: Option<String>,
    /// Light conditions.
    pub light: Option<String>,
    /// Local time of day bucket.
    pub time_of_day: Option<String>,
    /// Anomaly description.
    pub anomaly: Option<String>,
    /// Human factors.
    pub human_factors: Option<String>,
    /// Short synopsis.
    pub synopsis: Option<String>,
    /// Full narrative.
    pub narrative: Option<String>,
    /// File name of the CSV this row came from.
    pub source_file: String,
    /// Columns outside the canonical mapping, keyed by raw header.
    pub extra: BTreeMap<String, String>,
}

impl IncidentRecord {
    /// The text used for keyword heuristics: the synopsis when present,
    /// otherwise the narrative.
    #[must_use]
    pub fn primary_text(&self) -> Option<&str> {
        self.synopsis
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.narrative.as_deref())
    }

    /// The best short location label: airport code, then airport text.
    #[must_use]
    pub fn location_label(&self) -> Option<&str> {
        self.airport_code.as_deref().or(self.airport.as_deref())
    }

    /// Date rendered for tables: ISO date when parsed, raw string otherwise.
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date_parsed.map_or_else(
            || self.date_raw.clone().unwrap_or_default(),
            |d| d.format("%Y-%m-%d").to_string(),
        )
    }
}
