//! Landing-page summary and sidebar filter options.

use std::collections::{BTreeMap, BTreeSet};

use asrs_dashboard_analytics_models::{DatasetSummary, FilterOptions, StateOption, YearBounds};
use asrs_dashboard_dataset::Dataset;
use asrs_dashboard_incident_models::{IncidentRecord, IncidentType, Severity};

use crate::factors::{count_factors, factor_mentions};

/// Reported when no record carries a contributing factor.
pub const DEFAULT_PRIMARY_RISK: &str = "Human Factors";

/// Number of aircraft types offered as filter options.
pub const MAX_AIRCRAFT_TYPES: usize = 20;

/// Earliest and latest year in the dataset, or `None` if nothing is dated.
#[must_use]
pub fn year_bounds(dataset: &Dataset) -> Option<YearBounds> {
    let years = dataset.iter().filter_map(|r| r.year);
    let (start, end) = years.fold(None, |acc: Option<(i32, i32)>, y| {
        Some(acc.map_or((y, y), |(lo, hi)| (lo.min(y), hi.max(y))))
    })?;

    Some(YearBounds {
        start,
        end,
        span: end - start + 1,
    })
}

/// Row count, year coverage, the most common contributing factor, and the
/// snapshot build time.
#[must_use]
pub fn dataset_summary(dataset: &Dataset) -> DatasetSummary {
    let records: Vec<&IncidentRecord> = dataset.iter().collect();
    let primary_risk = count_factors(&records)
        .into_iter()
        .next()
        .map_or_else(|| DEFAULT_PRIMARY_RISK.to_string(), |(factor, _)| factor);

    DatasetSummary {
        total_incidents: dataset.len() as u64,
        year_range: year_bounds(dataset),
        primary_risk,
        last_updated: dataset.loaded_at(),
    }
}

fn top_aircraft_types(dataset: &Dataset, limit: usize) -> Vec<String> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for aircraft in dataset.iter().filter_map(|r| r.aircraft_type.as_deref()) {
        *counts.entry(aircraft).or_insert(0) += 1;
    }

    let mut sorted: Vec<(&str, u64)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
        .into_iter()
        .take(limit)
        .map(|(aircraft, _)| aircraft.to_string())
        .collect()
}

/// Values the sidebar filters can take, derived from the dataset.
#[must_use]
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    let records: Vec<&IncidentRecord> = dataset.iter().collect();
    let contributing_factors: BTreeSet<&str> = factor_mentions(&records).collect();
    let states: BTreeSet<&str> = dataset
        .iter()
        .filter_map(|r| r.state.as_deref())
        .filter(|s| !s.is_empty())
        .collect();

    FilterOptions {
        contributing_factors: contributing_factors
            .into_iter()
            .map(str::to_string)
            .collect(),
        aircraft_types: top_aircraft_types(dataset, MAX_AIRCRAFT_TYPES),
        states: states
            .into_iter()
            .map(|s| StateOption {
                code: s.to_string(),
                name: s.to_string(),
            })
            .collect(),
        incident_types: IncidentType::all().to_vec(),
        severity_levels: Severity::all().to_vec(),
        year_range: year_bounds(dataset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, record};

    #[test]
    fn summary_of_fixture() {
        let dataset = fixtures::dataset();
        let summary = dataset_summary(&dataset);

        assert_eq!(summary.total_incidents, 4);
        assert_eq!(
            summary.year_range,
            Some(YearBounds {
                start: 2017,
                end: 2018,
                span: 2
            })
        );
        assert_eq!(summary.primary_risk, "Human Factors");
        assert_eq!(summary.last_updated, dataset.loaded_at());
    }

    #[test]
    fn undated_dataset_has_no_year_range() {
        let dataset = Dataset::from_records(vec![record("1", "bogus", Some("Procedure"), None)]);
        let summary = dataset_summary(&dataset);
        assert!(summary.year_range.is_none());
        assert_eq!(summary.primary_risk, "Procedure");
    }

    #[test]
    fn empty_dataset_defaults_primary_risk() {
        let summary = dataset_summary(&Dataset::from_records(vec![]));
        assert_eq!(summary.total_incidents, 0);
        assert_eq!(summary.primary_risk, DEFAULT_PRIMARY_RISK);
    }

    #[test]
    fn filter_options_are_sorted_and_unique() {
        let mut rows = vec![
            record("1", "201701", Some("Procedure; Airport"), None),
            record("2", "201801", Some("Airport"), None),
            record("3", "201901", None, None),
        ];
        rows[0].state = Some("TX".to_string());
        rows[1].state = Some("CA".to_string());
        rows[2].state = Some("TX".to_string());
        rows[0].aircraft_type = Some("B737".to_string());
        rows[1].aircraft_type = Some("A320".to_string());
        rows[2].aircraft_type = Some("A320".to_string());

        let options = filter_options(&Dataset::from_records(rows));

        assert_eq!(options.contributing_factors, vec!["Airport", "Procedure"]);
        assert_eq!(options.aircraft_types, vec!["A320", "B737"]);
        let codes: Vec<&str> = options.states.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(codes, vec!["CA", "TX"]);
        assert_eq!(options.incident_types.len(), 6);
        assert_eq!(
            options.severity_levels,
            vec![Severity::High, Severity::Medium, Severity::Low]
        );
        assert_eq!(options.year_range.map(|y| y.span), Some(3));
    }

    #[test]
    fn aircraft_types_are_capped() {
        let rows: Vec<IncidentRecord> = (0..30)
            .map(|i| {
                let mut r = record(&i.to_string(), "201801", None, None);
                r.aircraft_type = Some(format!("Type {i:02}"));
                r
            })
            .collect();
        let options = filter_options(&Dataset::from_records(rows));
        assert_eq!(options.aircraft_types.len(), MAX_AIRCRAFT_TYPES);
        assert_eq!(options.aircraft_types[0], "Type 00");
    }
}
