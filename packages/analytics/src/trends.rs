//! Baseline vs inference period comparison.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use asrs_dashboard_analytics_models::{
    ComparisonPoint, ComparisonResult, ComparisonView, DeltaKpi, EmergingPatternsResult,
    FactorVariance, GreatestChange, KpisResult, PeriodComparison, PeriodStats,
};
use asrs_dashboard_dataset::Dataset;
use asrs_dashboard_incident_models::{TrendDirection, YearSpan};
use asrs_dashboard_topics::TopicModel;

use crate::{factors::factor_distribution, filter::filter_by_year_range, round1};

/// Volume changes within this many percent either way are neutral.
pub const TREND_DEAD_BAND: f64 = 5.0;

/// Factors at or below this share in both periods are left off the chart.
pub const MIN_CHART_SHARE: f64 = 1.0;

/// Default number of rows on the comparison chart.
pub const DEFAULT_COMPARISON_LIMIT: usize = 7;

/// Default number of emerging patterns returned.
pub const DEFAULT_EMERGING_LIMIT: usize = 4;

const KPI_LABEL_CHARS: usize = 30;

/// KPI description when neither period has a contributing factor.
const UNKNOWN_FACTOR: &str = "Unknown";

/// Maps a percentage change onto a trend arrow.
#[must_use]
pub fn trend_for(change: f64) -> TrendDirection {
    if change > TREND_DEAD_BAND {
        TrendDirection::Up
    } else if change < -TREND_DEAD_BAND {
        TrendDirection::Down
    } else {
        TrendDirection::Neutral
    }
}

#[allow(clippy::cast_precision_loss)]
fn period_stats(dataset: &Dataset, span: YearSpan) -> PeriodStats {
    let count = filter_by_year_range(dataset, span.as_range()).len() as u64;
    let years = span.years();
    PeriodStats {
        span,
        count,
        annual_count: if years > 0 {
            count as f64 / f64::from(years)
        } else {
            0.0
        },
    }
}

fn by_variance_desc(a: &FactorVariance, b: &FactorVariance) -> Ordering {
    b.variance
        .total_cmp(&a.variance)
        .then_with(|| a.factor.cmp(&b.factor))
}

/// Compares incident volume and factor mix between two periods.
#[must_use]
pub fn compare_periods(
    dataset: &Dataset,
    baseline: YearSpan,
    inference: YearSpan,
) -> PeriodComparison {
    let baseline_stats = period_stats(dataset, baseline);
    let inference_stats = period_stats(dataset, inference);

    let volume_change = if baseline_stats.annual_count > 0.0 {
        (inference_stats.annual_count - baseline_stats.annual_count) / baseline_stats.annual_count
            * 100.0
    } else {
        0.0
    };

    let baseline_dist = factor_distribution(&filter_by_year_range(dataset, baseline.as_range()));
    let inference_dist = factor_distribution(&filter_by_year_range(dataset, inference.as_range()));

    let factors: BTreeSet<&String> = baseline_dist.keys().chain(inference_dist.keys()).collect();
    let mut variances: Vec<FactorVariance> = factors
        .into_iter()
        .map(|factor| {
            let baseline_percent = baseline_dist.get(factor).copied().unwrap_or(0.0);
            let inference_percent = inference_dist.get(factor).copied().unwrap_or(0.0);
            FactorVariance {
                factor: factor.clone(),
                baseline_percent,
                inference_percent,
                variance: inference_percent - baseline_percent,
            }
        })
        .collect();
    variances.sort_by(by_variance_desc);

    let rising_risk = variances.first().cloned();
    let declining_risk = variances
        .iter()
        .min_by(|a, b| a.variance.total_cmp(&b.variance))
        .cloned();

    log::debug!(
        "Compared {baseline} ({} rows) with {inference} ({} rows): volume change {volume_change:.1}%",
        baseline_stats.count,
        inference_stats.count,
    );

    PeriodComparison {
        baseline: baseline_stats,
        inference: inference_stats,
        volume_change,
        trend: trend_for(volume_change),
        variances,
        rising_risk,
        declining_risk,
    }
}

fn risk_kpi(title: &str, variance: Option<&FactorVariance>, trend: TrendDirection) -> DeltaKpi {
    let (label, value) = variance.map_or((UNKNOWN_FACTOR.to_string(), 0.0), |v| {
        (v.factor.chars().take(KPI_LABEL_CHARS).collect(), v.variance)
    });

    DeltaKpi {
        title: title.to_string(),
        value: format!("{value:+.1}%"),
        description: label,
        trend,
        raw_value: Some(round1(value)),
    }
}

/// Volume, rising-risk and declining-risk KPI cards for two periods.
#[must_use]
pub fn delta_kpis(dataset: &Dataset, baseline: YearSpan, inference: YearSpan) -> KpisResult {
    let comparison = compare_periods(dataset, baseline, inference);

    let kpis = vec![
        DeltaKpi {
            title: "Total Volume Change".to_string(),
            value: format!("{:+.0}%", comparison.volume_change),
            description: "Annual Report Frequency".to_string(),
            trend: comparison.trend,
            raw_value: Some(round1(comparison.volume_change)),
        },
        risk_kpi(
            "Rising Risk",
            comparison.rising_risk.as_ref(),
            TrendDirection::Up,
        ),
        risk_kpi(
            "Declining Risk",
            comparison.declining_risk.as_ref(),
            TrendDirection::Down,
        ),
    ];

    KpisResult {
        kpis,
        baseline: comparison.baseline,
        inference: comparison.inference,
    }
}

fn factor_chart_rows(
    dataset: &Dataset,
    baseline: YearSpan,
    inference: YearSpan,
) -> Vec<ComparisonPoint> {
    compare_periods(dataset, baseline, inference)
        .variances
        .into_iter()
        .filter(|v| {
            v.baseline_percent > MIN_CHART_SHARE || v.inference_percent > MIN_CHART_SHARE
        })
        .map(|v| ComparisonPoint {
            category: v.factor,
            baseline: round1(v.baseline_percent),
            inference: round1(v.inference_percent),
            variance: round1(v.variance),
        })
        .collect()
}

fn greatest_change(points: &[ComparisonPoint]) -> Option<GreatestChange> {
    let mut best: Option<&ComparisonPoint> = None;
    for point in points {
        if best.is_none_or(|b| point.variance.abs() > b.variance.abs()) {
            best = Some(point);
        }
    }

    best.map(|p| GreatestChange {
        category: p.category.clone(),
        variance: p.variance,
        direction: if p.variance > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        },
    })
}

/// Bar chart rows comparing the two periods, largest categories first.
///
/// The factors view is computed from the dataset; the topics view asks
/// the topic model for per-topic shares.
#[must_use]
pub fn comparison_chart(
    dataset: &Dataset,
    topics: &dyn TopicModel,
    view: ComparisonView,
    baseline: YearSpan,
    inference: YearSpan,
    limit: usize,
) -> ComparisonResult {
    let mut data = match view {
        ComparisonView::Factors => factor_chart_rows(dataset, baseline, inference),
        ComparisonView::Topics => topics.topic_shares(baseline, inference),
    };

    if view == ComparisonView::Factors {
        data.sort_by(|a, b| {
            (b.baseline + b.inference)
                .total_cmp(&(a.baseline + a.inference))
                .then_with(|| a.category.cmp(&b.category))
        });
    }
    data.truncate(limit);

    ComparisonResult {
        greatest_change: greatest_change(&data),
        data,
        baseline_label: baseline.to_string(),
        inference_label: inference.to_string(),
    }
}

/// Topics that emerged during the inference period.
#[must_use]
pub fn emerging_patterns(
    topics: &dyn TopicModel,
    inference: YearSpan,
    limit: usize,
) -> EmergingPatternsResult {
    let mut patterns = topics.emerging_patterns(inference);
    patterns.truncate(limit);

    EmergingPatternsResult {
        patterns,
        analysis_method: "Temporal Topic Modeling".to_string(),
        significance_threshold: 0.05,
    }
}
