//! Fixed mapping from raw ASRS export headers to canonical field names.

use asrs_dashboard_incident_models::IncidentRecord;
use strum_macros::{AsRefStr, Display, EnumString};

/// A canonical column of the normalized dataset.
///
/// The `Display`/`FromStr` form is the canonical snake-case field name;
/// [`Column::raw_header`] gives the header as it appears in ASRS exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Column {
    /// `ACN`
    Acn,
    /// `Date`
    DateRaw,
    /// `Locale Reference`
    Airport,
    /// `State Reference`
    State,
    /// `Contributing Factors / Situations`
    ContributingFactors,
    /// `Primary Problem`
    PrimaryProblem,
    /// `Narrative`
    Narrative,
    /// `Synopsis`
    Synopsis,
    /// `Flight Conditions`
    FlightConditions,
    /// `Weather Elements / Visibility`
    Weather,
    /// `Light`
    Light,
    /// `Make Model Name`
    AircraftType,
    /// `Aircraft Operator`
    Operator,
    /// `Local Time Of Day`
    TimeOfDay,
    /// `Anomaly`
    Anomaly,
    /// `Flight Phase`
    FlightPhase,
    /// `Human Factors`
    HumanFactors,
}

impl Column {
    /// Header text used by the ASRS database export.
    #[must_use]
    pub const fn raw_header(self) -> &'static str {
        match self {
            Self::Acn => "ACN",
            Self::DateRaw => "Date",
            Self::Airport => "Locale Reference",
            Self::State => "State Reference",
            Self::ContributingFactors => "Contributing Factors / Situations",
            Self::PrimaryProblem => "Primary Problem",
            Self::Narrative => "Narrative",
            Self::Synopsis => "Synopsis",
            Self::FlightConditions => "Flight Conditions",
            Self::Weather => "Weather Elements / Visibility",
            Self::Light => "Light",
            Self::AircraftType => "Make Model Name",
            Self::Operator => "Aircraft Operator",
            Self::TimeOfDay => "Local Time Of Day",
            Self::Anomaly => "Anomaly",
            Self::FlightPhase => "Flight Phase",
            Self::HumanFactors => "Human Factors",
        }
    }

    /// Looks up the canonical column for a raw header. Unknown headers
    /// return `None` and are carried through as passthrough columns.
    #[must_use]
    pub fn from_raw_header(header: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.raw_header() == header)
    }

    /// Writes a cleaned cell value into the matching record field.
    pub fn assign(self, record: &mut IncidentRecord, value: Option<String>) {
        match self {
            Self::Acn => record.acn = value.unwrap_or_default(),
            Self::DateRaw => record.date_raw = value,
            Self::Airport => record.airport = value,
            Self::State => record.state = value,
            Self::ContributingFactors => record.contributing_factors = value,
            Self::PrimaryProblem => record.primary_problem = value,
            Self::Narrative => record.narrative = value,
            Self::Synopsis => record.synopsis = value,
            Self::FlightConditions => record.flight_conditions = value,
            Self::Weather => record.weather = value,
            Self::Light => record.light = value,
            Self::AircraftType => record.aircraft_type = value,
            Self::Operator => record.operator = value,
            Self::TimeOfDay => record.time_of_day = value,
            Self::Anomaly => record.anomaly = value,
            Self::FlightPhase => record.flight_phase = value,
            Self::HumanFactors => record.human_factors = value,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Acn,
            Self::DateRaw,
            Self::Airport,
            Self::State,
            Self::ContributingFactors,
            Self::PrimaryProblem,
            Self::Narrative,
            Self::Synopsis,
            Self::FlightConditions,
            Self::Weather,
            Self::Light,
            Self::AircraftType,
            Self::Operator,
            Self::TimeOfDay,
            Self::Anomaly,
            Self::FlightPhase,
            Self::HumanFactors,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_header_roundtrip() {
        for column in Column::all() {
            assert_eq!(Column::from_raw_header(column.raw_header()), Some(*column));
        }
    }

    #[test]
    fn canonical_names_are_snake_case() {
        assert_eq!(Column::ContributingFactors.to_string(), "contributing_factors");
        assert_eq!(Column::DateRaw.as_ref(), "date_raw");
        assert_eq!("airport".parse::<Column>().unwrap(), Column::Airport);
    }

    #[test]
    fn unknown_header_is_passthrough() {
        assert!(Column::from_raw_header("Crew Size").is_none());
        assert!(Column::from_raw_header("acn").is_none());
    }
}
