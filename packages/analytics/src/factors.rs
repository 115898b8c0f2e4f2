//! Contributing-factor explosion, counting, and risk labelling.

use std::collections::BTreeMap;

use asrs_dashboard_analytics_models::{FactorCount, FactorsResult, RiskThresholdCounts};
use asrs_dashboard_dataset::Dataset;
use asrs_dashboard_incident_models::{IncidentRecord, Risk, YearRange};

use crate::filter::filter_by_year_range;

/// Separator between factors in the raw column.
pub const FACTOR_SEPARATOR: &str = "; ";

/// Default number of factors returned by [`top_factors`].
pub const DEFAULT_FACTOR_LIMIT: usize = 10;

/// Fractions of the top count that mark the high and medium risk bands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    /// Fraction of the maximum count at or above which a factor is high risk.
    pub high_ratio: f64,
    /// Fraction of the maximum count at or above which a factor is medium risk.
    pub medium_ratio: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high_ratio: 0.7,
            medium_ratio: 0.4,
        }
    }
}

impl RiskThresholds {
    /// Absolute thresholds for a given maximum count, truncated toward zero.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn counts_for(&self, max_count: u64) -> RiskThresholdCounts {
        RiskThresholdCounts {
            high: (max_count as f64 * self.high_ratio) as u64,
            medium: (max_count as f64 * self.medium_ratio) as u64,
        }
    }
}

/// Labels a count against absolute thresholds.
#[must_use]
pub const fn classify_risk(count: u64, thresholds: RiskThresholdCounts) -> Risk {
    if count >= thresholds.high {
        Risk::High
    } else if count >= thresholds.medium {
        Risk::Medium
    } else {
        Risk::Low
    }
}

/// Splits a raw factor string into trimmed, non-empty factors.
pub fn explode_factors(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(FACTOR_SEPARATOR)
        .map(str::trim)
        .filter(|f| !f.is_empty())
}

/// Every factor mentioned by `records`, flattened.
pub fn factor_mentions<'a>(records: &[&'a IncidentRecord]) -> impl Iterator<Item = &'a str> {
    records
        .iter()
        .filter_map(|r| r.contributing_factors.as_deref())
        .flat_map(explode_factors)
}

/// Counts factor mentions, ordered by descending count then name.
#[must_use]
pub fn count_factors(records: &[&IncidentRecord]) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for factor in factor_mentions(records) {
        *counts.entry(factor).or_insert(0) += 1;
    }

    let mut sorted: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(factor, count)| (factor.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Percentage share of each factor among all mentions in `records`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn factor_distribution(records: &[&IncidentRecord]) -> BTreeMap<String, f64> {
    let counts = count_factors(records);
    let total: u64 = counts.iter().map(|(_, c)| c).sum();
    if total == 0 {
        return BTreeMap::new();
    }

    counts
        .into_iter()
        .map(|(factor, count)| (factor, count as f64 / total as f64 * 100.0))
        .collect()
}

/// Most frequent factors in the year range with risk labels.
///
/// Thresholds come from the largest count before `limit` is applied.
#[must_use]
pub fn top_factors(
    dataset: &Dataset,
    years: YearRange,
    limit: usize,
    thresholds: RiskThresholds,
) -> FactorsResult {
    let records = filter_by_year_range(dataset, years);
    let counts = count_factors(&records);

    let max_count = counts.first().map_or(0, |(_, c)| *c);
    let risk_thresholds = thresholds.counts_for(max_count);

    let factors = counts
        .into_iter()
        .take(limit)
        .map(|(factor, count)| FactorCount {
            risk: classify_risk(count, risk_thresholds),
            factor,
            count,
        })
        .collect();

    FactorsResult {
        factors,
        total_incidents_analyzed: records.len() as u64,
        risk_thresholds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, record};

    #[test]
    fn explodes_and_drops_empty_parts() {
        let parts: Vec<&str> = explode_factors("Human Factors;  Procedure ; ; ").collect();
        assert_eq!(parts, vec!["Human Factors", "Procedure"]);

        let parts: Vec<&str> = explode_factors("Airport; Human Factors; ").collect();
        assert_eq!(parts, vec!["Airport", "Human Factors"]);

        assert_eq!(explode_factors("   ").count(), 0);
    }

    #[test]
    fn two_row_example_counts() {
        let dataset = Dataset::from_records(vec![
            record("1", "201703", Some("Human Factors; Procedure"), None),
            record("2", "201801", Some("Human Factors"), None),
        ]);
        let records: Vec<&IncidentRecord> = dataset.iter().collect();
        assert_eq!(
            count_factors(&records),
            vec![
                ("Human Factors".to_string(), 2),
                ("Procedure".to_string(), 1)
            ]
        );
    }

    #[test]
    fn counts_sum_to_token_count() {
        let dataset = fixtures::dataset();
        let records: Vec<&IncidentRecord> = dataset.iter().collect();
        let total: u64 = count_factors(&records).iter().map(|(_, c)| c).sum();
        assert_eq!(total, factor_mentions(&records).count() as u64);
        assert_eq!(total, 6);
    }

    #[test]
    fn ties_sort_by_name() {
        let dataset = Dataset::from_records(vec![record(
            "1",
            "201703",
            Some("Zeta; Alpha; Mid"),
            None,
        )]);
        let records: Vec<&IncidentRecord> = dataset.iter().collect();
        let names: Vec<String> = count_factors(&records)
            .into_iter()
            .map(|(f, _)| f)
            .collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn risk_thresholds_truncate() {
        let counts = RiskThresholds::default().counts_for(11);
        assert_eq!(counts, RiskThresholdCounts { high: 7, medium: 4 });
        assert_eq!(classify_risk(7, counts), Risk::High);
        assert_eq!(classify_risk(6, counts), Risk::Medium);
        assert_eq!(classify_risk(3, counts), Risk::Low);
    }

    #[test]
    fn top_factors_labels_from_pre_limit_max() {
        let dataset = fixtures::dataset();
        let result = top_factors(
            &dataset,
            YearRange::unbounded(),
            1,
            RiskThresholds::default(),
        );

        assert_eq!(result.factors.len(), 1);
        assert_eq!(result.factors[0].factor, "Human Factors");
        assert_eq!(result.factors[0].count, 3);
        assert_eq!(result.factors[0].risk, Risk::High);
        assert_eq!(result.risk_thresholds, RiskThresholdCounts { high: 2, medium: 1 });
        assert_eq!(result.total_incidents_analyzed, 4);
    }

    #[test]
    fn top_factors_respects_year_filter() {
        let dataset = fixtures::dataset();
        let result = top_factors(
            &dataset,
            YearRange::new(Some(2018), Some(2018)),
            DEFAULT_FACTOR_LIMIT,
            RiskThresholds::default(),
        );
        let names: Vec<&str> = result.factors.iter().map(|f| f.factor.as_str()).collect();
        assert_eq!(names, vec!["Human Factors", "Airport"]);
        // max 2: high = floor(1.4) = 1, so a single mention is already high
        assert_eq!(result.risk_thresholds, RiskThresholdCounts { high: 1, medium: 0 });
        assert_eq!(result.factors[1].risk, Risk::High);
        assert_eq!(result.total_incidents_analyzed, 2);
    }

    #[test]
    fn distribution_sums_to_hundred() {
        let dataset = fixtures::dataset();
        let records: Vec<&IncidentRecord> = dataset.iter().collect();
        let dist = factor_distribution(&records);
        let sum: f64 = dist.values().sum();
        assert!((sum - 100.0).abs() < 1e-9);
        assert!((dist["Human Factors"] - 50.0).abs() < 1e-9);
        assert!(factor_distribution(&[]).is_empty());
    }
}
