#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregation queries over the in-memory ASRS incident dataset.
//!
//! Every public function is pure: it borrows a [`Dataset`] (or a filtered
//! slice of its records) plus plain parameters and returns one of the
//! result types from `asrs_dashboard_analytics_models`. Nothing here loads
//! data or mutates the dataset.
//!
//! [`Dataset`]: asrs_dashboard_dataset::Dataset

pub mod factors;
pub mod filter;
pub mod incidents;
pub mod pagination;
pub mod severity;
pub mod similarity;
pub mod summary;
pub mod timeline;
pub mod topics;
pub mod trends;

use thiserror::Error;

/// Errors returned by analytics queries.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// No record with the requested ACN exists.
    #[error("Incident {acn} not found")]
    NotFound {
        /// The ACN that was looked up.
        acn: String,
    },

    /// A query parameter was out of range or unparseable.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of what went wrong.
        message: String,
    },
}

/// Rounds to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_one_decimal() {
        assert!((round1(2.345) - 2.3).abs() < 1e-9);
        assert!((round1(-2.36) - -2.4).abs() < 1e-9);
        assert!((round1(0.04)).abs() < 1e-9);
    }

    #[test]
    fn fixture_undated_row_has_no_year() {
        let dataset = fixtures::dataset();
        assert_eq!(dataset.len(), 4);
        assert!(dataset.records()[3].year.is_none());
        assert_eq!(dataset.records()[0].year, Some(2017));
    }

    #[test]
    fn not_found_message() {
        let err = AnalyticsError::NotFound {
            acn: "42".to_string(),
        };
        assert_eq!(err.to_string(), "Incident 42 not found");
    }
}
