//! Year-range filtering.

use asrs_dashboard_dataset::Dataset;
use asrs_dashboard_incident_models::{IncidentRecord, YearRange};

/// Records whose year falls inside `years`, in dataset order.
///
/// An unbounded range returns every record, undated ones included. Any
/// bound drops undated records. Inverted ranges return nothing.
#[must_use]
pub fn filter_by_year_range(dataset: &Dataset, years: YearRange) -> Vec<&IncidentRecord> {
    dataset.iter().filter(|r| years.contains(r.year)).collect()
}
