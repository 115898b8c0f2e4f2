//! Incident listing and detail.

use asrs_dashboard_analytics_models::{
    IncidentAircraft, IncidentDetail, IncidentDetailResult, IncidentListResult, IncidentLocation,
    IncidentSummary, IncidentWeather, ListIncidentsParams,
};
use asrs_dashboard_dataset::Dataset;
use asrs_dashboard_incident_models::{IncidentRecord, IncidentType, Severity};

use crate::{
    AnalyticsError,
    factors::explode_factors,
    filter::filter_by_year_range,
    pagination::paginate,
    severity::{SeverityRules, classify_severity},
    similarity::{DEFAULT_SIMILAR_LIMIT, SimilarityScoring, find_similar},
};

/// Aviation terms highlighted in an incident narrative, in display order.
pub const HIGHLIGHT_TERMS: &[&str] = &[
    "hold short",
    "runway",
    "taxiway",
    "clearance",
    "tower",
    "ground",
    "incursion",
    "crossed",
    "ATC",
    "frequency",
    "radio",
    "taxi",
    "takeoff",
    "landing",
    "approach",
    "departure",
    "go around",
    "abort",
    "stop",
    "hold",
    "cleared",
    "instruction",
];

/// Maximum number of highlighted terms per incident.
pub const MAX_HIGHLIGHTED_TERMS: usize = 10;

const NO_NARRATIVE: &str = "No narrative available.";
const UNKNOWN: &str = "Unknown";

/// Known aviation terms found in `text`, case-insensitively.
#[must_use]
pub fn highlighted_terms(text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    HIGHLIGHT_TERMS
        .iter()
        .filter(|term| text.contains(term.to_lowercase().as_str()))
        .take(MAX_HIGHLIGHTED_TERMS)
        .map(|term| (*term).to_string())
        .collect()
}

fn summarize(record: &IncidentRecord, severity: Severity) -> IncidentSummary {
    IncidentSummary {
        acn: record.acn.clone(),
        date: record.display_date(),
        location: record.location_label().unwrap_or_default().to_string(),
        incident_type: IncidentType::from_anomaly(record.anomaly.as_deref()),
        severity,
    }
}

/// Lists incidents matching `params`, one page at a time.
///
/// # Errors
///
/// * If `params.severity` is not a known severity name
/// * If `params.page` or `params.limit` is zero
pub fn list_incidents(
    dataset: &Dataset,
    params: &ListIncidentsParams,
    rules: &SeverityRules,
) -> Result<IncidentListResult, AnalyticsError> {
    let severity_filter = params
        .severity
        .as_deref()
        .map(|s| {
            s.parse::<Severity>().map_err(|_| AnalyticsError::InvalidParameter {
                name: "severity",
                message: format!("unknown severity '{s}'"),
            })
        })
        .transpose()?;

    let rows: Vec<IncidentSummary> = filter_by_year_range(dataset, params.years)
        .into_iter()
        .filter(|r| {
            params.location.as_deref().is_none_or(|loc| {
                r.airport_code
                    .as_deref()
                    .is_some_and(|code| code.eq_ignore_ascii_case(loc))
            })
        })
        .map(|r| summarize(r, classify_severity(r, rules)))
        .filter(|s| severity_filter.is_none_or(|wanted| s.severity == wanted))
        .collect();

    log::debug!(
        "Listing incidents: {} rows match, page {} of size {}",
        rows.len(),
        params.page,
        params.limit
    );

    let page = paginate(&rows, params.page, params.limit)?;

    Ok(IncidentListResult {
        reports: page.items,
        pagination: page.pagination,
    })
}

fn build_detail(record: &IncidentRecord, rules: &SeverityRules) -> IncidentDetail {
    let airport_code = record.location_label().unwrap_or(UNKNOWN).to_string();
    let narrative = record.primary_text().unwrap_or(NO_NARRATIVE).to_string();

    let date_formatted = record.date_parsed.map_or_else(
        || record.date_raw.clone().unwrap_or_default(),
        |d| d.format("%B %d, %Y").to_string(),
    );

    IncidentDetail {
        acn: record.acn.clone(),
        title: format!("Runway Incursion at {airport_code}"),
        severity: classify_severity(record, rules),
        date: record.display_date(),
        date_formatted,
        location: IncidentLocation {
            airport_code,
            airport_name: record.airport.clone(),
            state: record.state.clone(),
        },
        aircraft: IncidentAircraft {
            aircraft_type: record
                .aircraft_type
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            operator: record.operator.clone(),
            flight_phase: record.flight_phase.clone(),
        },
        weather: IncidentWeather {
            conditions: record
                .weather
                .as_deref()
                .or(record.flight_conditions.as_deref())
                .unwrap_or(UNKNOWN)
                .to_string(),
        },
        highlighted_terms: highlighted_terms(&narrative),
        narrative,
        contributing_factors: record
            .contributing_factors
            .as_deref()
            .map(|raw| explode_factors(raw).map(str::to_string).collect())
            .unwrap_or_default(),
    }
}

/// Full detail for incident `acn` plus its most similar incidents.
///
/// When several rows share the ACN the first one wins.
///
/// # Errors
///
/// * If no record has the given ACN
pub fn incident_detail(
    dataset: &Dataset,
    acn: &str,
    rules: &SeverityRules,
    scoring: &SimilarityScoring,
) -> Result<IncidentDetailResult, AnalyticsError> {
    let record = dataset
        .find_by_acn(acn)
        .ok_or_else(|| AnalyticsError::NotFound {
            acn: acn.to_string(),
        })?;

    Ok(IncidentDetailResult {
        incident: build_detail(record, rules),
        similar_incidents: find_similar(dataset, acn, DEFAULT_SIMILAR_LIMIT, scoring)?,
    })
}
