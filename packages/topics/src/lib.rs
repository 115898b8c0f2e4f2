#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Topic model capability.
//!
//! Callers talk to a [`TopicModel`], which produces topic clusters,
//! keywords, emerging patterns, and per-topic period shares for a model
//! kind and year range. [`StaticTopicModel`] answers from fixed lookup
//! tables exported from an offline LDA/BERTopic run; a trained model can
//! replace it without changing any caller.

use asrs_dashboard_analytics_models::{
    ComparisonPoint, EmergingPattern, TopicCluster, TopicKeyword, TopicModelKind,
};
use asrs_dashboard_incident_models::{YearRange, YearSpan};

/// Clusters produced by one model.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicClusterSet {
    /// Display name of the model.
    pub model_name: String,
    /// Topic bubbles.
    pub clusters: Vec<TopicCluster>,
    /// Model coherence score.
    pub coherence_score: f64,
}

/// Something that can describe the topics in the incident corpus.
pub trait TopicModel: Send + Sync {
    /// Topic clusters for the given model over the given years.
    fn clusters(&self, kind: TopicModelKind, years: YearRange) -> TopicClusterSet;

    /// Keywords for a topic, highest weight first. Unknown topic ids get
    /// the model's fallback topic.
    fn keywords(&self, topic_id: u32) -> Vec<TopicKeyword>;

    /// Topics that emerged in the inference period, most significant first.
    fn emerging_patterns(&self, inference: YearSpan) -> Vec<EmergingPattern>;

    /// Share of reports per topic in each period.
    fn topic_shares(&self, baseline: YearSpan, inference: YearSpan) -> Vec<ComparisonPoint>;
}

/// Topic whose keywords stand in for unknown ids.
pub const FALLBACK_TOPIC_ID: u32 = 1;

type ClusterRow = (u32, f64, f64, u64, &'static str);

const LDA_TOPICS: &[ClusterRow] = &[
    (1, 15.0, 65.0, 487, "RWY Incursion"),
    (2, 45.0, 75.0, 412, "Communication"),
    (3, 70.0, 60.0, 356, "Clearance"),
    (4, 25.0, 35.0, 298, "Taxi Error"),
    (5, 80.0, 25.0, 234, "Hold Short"),
    (6, 55.0, 40.0, 189, "Weather"),
    (7, 35.0, 55.0, 167, "ATC"),
    (8, 60.0, 80.0, 145, "Equipment"),
    (9, 85.0, 45.0, 112, "Lighting"),
    (10, 40.0, 20.0, 98, "Training"),
];

const BERT_TOPICS: &[ClusterRow] = &[
    (1, 20.0, 70.0, 523, "Runway Safety"),
    (2, 50.0, 80.0, 445, "Radio Comms"),
    (3, 75.0, 55.0, 378, "Taxi Clearance"),
    (4, 30.0, 40.0, 312, "Ground Ops"),
    (5, 85.0, 30.0, 256, "Hold Position"),
    (6, 60.0, 45.0, 198, "Visibility"),
];

const TOPIC_KEYWORDS: &[(u32, &[(&str, f64)])] = &[
    (
        1,
        &[
            ("runway", 0.92),
            ("incursion", 0.88),
            ("crossed", 0.85),
            ("hold", 0.82),
            ("short", 0.78),
            ("clearance", 0.75),
            ("taxiway", 0.71),
            ("line", 0.68),
            ("active", 0.65),
            ("entered", 0.62),
        ],
    ),
    (
        2,
        &[
            ("communication", 0.90),
            ("tower", 0.87),
            ("frequency", 0.84),
            ("radio", 0.80),
            ("atc", 0.77),
            ("misheard", 0.73),
            ("readback", 0.70),
            ("instruction", 0.67),
            ("contact", 0.64),
            ("callsign", 0.61),
        ],
    ),
    (
        3,
        &[
            ("clearance", 0.91),
            ("taxi", 0.86),
            ("route", 0.83),
            ("authorized", 0.79),
            ("permission", 0.76),
            ("ground", 0.72),
            ("proceed", 0.69),
            ("instruction", 0.66),
            ("ramp", 0.63),
            ("gate", 0.60),
        ],
    ),
    (
        4,
        &[
            ("taxi", 0.89),
            ("wrong", 0.85),
            ("turn", 0.81),
            ("missed", 0.78),
            ("signage", 0.74),
            ("confusion", 0.71),
            ("unfamiliar", 0.68),
            ("airport", 0.65),
            ("layout", 0.62),
            ("diagram", 0.59),
        ],
    ),
    (
        5,
        &[
            ("hold", 0.93),
            ("short", 0.89),
            ("line", 0.85),
            ("crossed", 0.81),
            ("marking", 0.77),
            ("paint", 0.73),
            ("faded", 0.69),
            ("visibility", 0.65),
            ("night", 0.61),
            ("lights", 0.57),
        ],
    ),
];

const TOPIC_SHARES: &[(&str, f64, f64)] = &[
    ("RWY Incursion", 25.4, 28.1),
    ("Communication", 19.2, 24.5),
    ("Clearance Issues", 18.7, 16.2),
    ("Taxi Errors", 15.3, 18.9),
    ("Hold Short", 12.8, 10.4),
    ("Equipment", 8.6, 11.9),
];

type PatternRow = (u32, &'static str, &'static str, u64, &'static str, &'static str, f64);

const EMERGING_PATTERNS: &[PatternRow] = &[
    (
        4,
        "Electronic Flight Bag (EFB) Distraction",
        "New cluster associated with iPad/Tablet usage during taxi operations. Pilots report distraction from navigational apps and digital charts.",
        247,
        "Q2 2018",
        "+156% since 2020",
        156.0,
    ),
    (
        7,
        "Remote Tower Operations",
        "Emerging pattern related to remote/virtual tower control systems. Communication delays and video feed quality issues cited.",
        89,
        "Q4 2021",
        "+89% since 2022",
        89.0,
    ),
    (
        11,
        "Multi-Frequency Confusion",
        "Incidents involving confusion when switching between multiple ATC frequencies during complex taxi routes at major hubs.",
        312,
        "Q1 2019",
        "+124% since 2019",
        124.0,
    ),
    (
        14,
        "NextGen Procedure Adaptation",
        "Reports related to pilot adaptation challenges with NextGen navigation procedures and RNAV taxi routes.",
        178,
        "Q3 2020",
        "+78% since 2021",
        78.0,
    ),
];

/// Topic model backed by precomputed lookup tables.
///
/// The tables are not year-aware, so the `years` and period arguments are
/// accepted and ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTopicModel;

impl StaticTopicModel {
    /// Creates the model.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TopicModel for StaticTopicModel {
    fn clusters(&self, kind: TopicModelKind, _years: YearRange) -> TopicClusterSet {
        let (rows, coherence_score) = match kind {
            TopicModelKind::Lda => (LDA_TOPICS, 0.42),
            TopicModelKind::Bert => (BERT_TOPICS, 0.58),
        };

        TopicClusterSet {
            model_name: kind.model_name().to_string(),
            clusters: rows
                .iter()
                .map(|&(id, x, y, size, label)| TopicCluster {
                    id,
                    x,
                    y,
                    size,
                    label: label.to_string(),
                })
                .collect(),
            coherence_score,
        }
    }

    fn keywords(&self, topic_id: u32) -> Vec<TopicKeyword> {
        let lookup = |id: u32| TOPIC_KEYWORDS.iter().find(|(t, _)| *t == id);

        lookup(topic_id)
            .or_else(|| lookup(FALLBACK_TOPIC_ID))
            .map(|(_, words)| {
                words
                    .iter()
                    .map(|&(keyword, weight)| TopicKeyword {
                        keyword: keyword.to_string(),
                        weight,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn emerging_patterns(&self, _inference: YearSpan) -> Vec<EmergingPattern> {
        EMERGING_PATTERNS
            .iter()
            .map(
                |&(topic_id, label, description, report_count, first, growth, growth_rate)| {
                    EmergingPattern {
                        topic_id,
                        topic_label: label.to_string(),
                        description: description.to_string(),
                        report_count,
                        first_appeared: first.to_string(),
                        growth: growth.to_string(),
                        growth_rate,
                    }
                },
            )
            .collect()
    }

    fn topic_shares(&self, _baseline: YearSpan, _inference: YearSpan) -> Vec<ComparisonPoint> {
        TOPIC_SHARES
            .iter()
            .map(|&(category, baseline, inference)| ComparisonPoint {
                category: category.to_string(),
                baseline,
                inference,
                variance: ((inference - baseline) * 10.0).round() / 10.0,
            })
            .collect()
    }
}
