//! Incidents-per-year timeline.

use std::collections::BTreeMap;

use asrs_dashboard_analytics_models::{DateRange, TimelinePoint, TimelineResult};
use asrs_dashboard_dataset::Dataset;
use asrs_dashboard_incident_models::{IncidentRecord, YearRange};

use crate::filter::filter_by_year_range;

/// Default benchmark split shown on the timeline chart.
pub const DEFAULT_BENCHMARK_YEAR: i32 = 2017;

/// Counts records per year, ascending. Undated records are counted in
/// `total_incidents` only.
#[must_use]
pub fn aggregate_timeline(records: &[&IncidentRecord], benchmark_year: i32) -> TimelineResult {
    let mut per_year: BTreeMap<i32, u64> = BTreeMap::new();
    for year in records.iter().filter_map(|r| r.year) {
        *per_year.entry(year).or_insert(0) += 1;
    }

    let data: Vec<TimelinePoint> = per_year
        .into_iter()
        .map(|(year, incidents)| TimelinePoint { year, incidents })
        .collect();

    TimelineResult {
        date_range: DateRange {
            start: data.first().map(|p| p.year),
            end: data.last().map(|p| p.year),
        },
        data,
        benchmark_year,
        total_incidents: records.len() as u64,
    }
}

/// Filters the dataset by `years` and builds the timeline.
#[must_use]
pub fn incident_timeline(
    dataset: &Dataset,
    years: YearRange,
    benchmark_year: i32,
) -> TimelineResult {
    let records = filter_by_year_range(dataset, years);
    log::debug!("Building timeline over {} rows", records.len());
    aggregate_timeline(&records, benchmark_year)
}
