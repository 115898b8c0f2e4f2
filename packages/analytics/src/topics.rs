//! Topic views backed by a [`TopicModel`].

use asrs_dashboard_analytics_models::{
    TopicKeywordsResult, TopicModelKind, TopicNarrative, TopicNarrativesResult, TopicsOverview,
};
use asrs_dashboard_dataset::Dataset;
use asrs_dashboard_incident_models::{IncidentRecord, YearRange};
use asrs_dashboard_topics::TopicModel;

use crate::filter::filter_by_year_range;

/// Default number of keywords returned per topic.
pub const DEFAULT_KEYWORD_LIMIT: usize = 10;

/// Default number of representative narratives per topic.
pub const DEFAULT_NARRATIVE_LIMIT: usize = 3;

/// Keywords used to score narratives against a topic.
const SCORING_KEYWORDS: usize = 5;

/// Keywords attached to the placeholder narrative.
const PLACEHOLDER_KEYWORDS: usize = 3;

const MAX_NARRATIVE_CHARS: usize = 500;
const TRUNCATED_NARRATIVE_CHARS: usize = 497;

const PLACEHOLDER_ACN: &str = "ACN-Sample";
const PLACEHOLDER_NARRATIVE: &str = "No matching narratives found for this topic. This may indicate the topic model needs retraining with the current dataset.";

/// Topic clusters for `kind` plus the size of the year-filtered corpus.
#[must_use]
pub fn topics_overview(
    dataset: &Dataset,
    topics: &dyn TopicModel,
    kind: TopicModelKind,
    years: YearRange,
) -> TopicsOverview {
    let total_documents = filter_by_year_range(dataset, years).len() as u64;
    let set = topics.clusters(kind, years);

    TopicsOverview {
        num_topics: set.clusters.len(),
        topics: set.clusters,
        model: set.model_name,
        total_documents,
        coherence_score: set.coherence_score,
    }
}

/// The top `limit` keywords for a topic.
#[must_use]
pub fn topic_keywords(
    topics: &dyn TopicModel,
    topic_id: u32,
    limit: usize,
) -> TopicKeywordsResult {
    let mut keywords = topics.keywords(topic_id);
    keywords.truncate(limit);
    TopicKeywordsResult { topic_id, keywords }
}

fn matched_keywords(text: &str, keywords: &[String]) -> Vec<String> {
    let lowered = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| lowered.contains(k.as_str()))
        .cloned()
        .collect()
}

fn truncate_narrative(text: &str) -> String {
    if text.chars().count() > MAX_NARRATIVE_CHARS {
        let mut truncated: String = text.chars().take(TRUNCATED_NARRATIVE_CHARS).collect();
        truncated.push_str("...");
        truncated
    } else {
        text.to_string()
    }
}

/// Records whose text best matches a topic's leading keywords.
///
/// Records are ranked on their full text; the keywords reported with each
/// narrative are the ones still visible after truncation. Returns a single
/// placeholder narrative when nothing matches.
#[must_use]
pub fn topic_narratives(
    dataset: &Dataset,
    topics: &dyn TopicModel,
    topic_id: u32,
    limit: usize,
) -> TopicNarrativesResult {
    let keywords: Vec<String> = topics
        .keywords(topic_id)
        .into_iter()
        .take(SCORING_KEYWORDS)
        .map(|k| k.keyword)
        .collect();

    let mut scored: Vec<(&IncidentRecord, &str, usize)> = dataset
        .iter()
        .filter_map(|r| {
            let text = r.primary_text()?;
            let score = matched_keywords(text, &keywords).len();
            (score > 0).then_some((r, text, score))
        })
        .collect();

    scored.sort_by(|a, b| b.2.cmp(&a.2));

    let mut narratives: Vec<TopicNarrative> = scored
        .into_iter()
        .take(limit)
        .map(|(record, text, _)| {
            let narrative = truncate_narrative(text);
            TopicNarrative {
                acn: format!("ACN-{}", record.acn),
                keywords: matched_keywords(&narrative, &keywords),
                narrative,
            }
        })
        .collect();

    if narratives.is_empty() {
        log::debug!("No narratives matched topic {topic_id}");
        narratives.push(TopicNarrative {
            acn: PLACEHOLDER_ACN.to_string(),
            narrative: PLACEHOLDER_NARRATIVE.to_string(),
            keywords: keywords.into_iter().take(PLACEHOLDER_KEYWORDS).collect(),
        });
    }

    TopicNarrativesResult {
        topic_id,
        narratives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, record};
    use asrs_dashboard_topics::StaticTopicModel;

    #[test]
    fn overview_counts_filtered_documents() {
        let dataset = fixtures::dataset();
        let model = StaticTopicModel::new();

        let all = topics_overview(&dataset, &model, TopicModelKind::Lda, YearRange::unbounded());
        assert_eq!(all.total_documents, 4);
        assert_eq!(all.model, "LDA");
        assert_eq!(all.num_topics, all.topics.len());

        let recent = topics_overview(
            &dataset,
            &model,
            TopicModelKind::Bert,
            YearRange::new(Some(2018), None),
        );
        assert_eq!(recent.total_documents, 2);
        assert_eq!(recent.model, "BERTopic");
    }

    #[test]
    fn keywords_are_limited_and_fall_back() {
        let model = StaticTopicModel::new();
        let result = topic_keywords(&model, 42, 3);
        assert_eq!(result.topic_id, 42);
        assert_eq!(result.keywords.len(), 3);
        assert_eq!(result.keywords[0].keyword, "runway");
    }

    #[test]
    fn narratives_rank_by_keyword_hits() {
        let dataset = fixtures::dataset();
        let model = StaticTopicModel::new();
        let result = topic_narratives(&dataset, &model, 1, DEFAULT_NARRATIVE_LIMIT);

        // topic 1 scores on runway, incursion, crossed, hold, short
        let acns: Vec<&str> = result.narratives.iter().map(|n| n.acn.as_str()).collect();
        assert_eq!(acns, vec!["ACN-1001", "ACN-1002"]);
        assert_eq!(
            result.narratives[0].keywords,
            vec!["runway", "incursion", "hold", "short"]
        );
        assert_eq!(result.narratives[1].keywords, vec!["runway", "crossed"]);
    }

    #[test]
    fn placeholder_when_nothing_matches() {
        let dataset =
            Dataset::from_records(vec![record("1", "201801", None, Some("Quiet night."))]);
        let result = topic_narratives(&dataset, &StaticTopicModel::new(), 2, 3);

        assert_eq!(result.narratives.len(), 1);
        assert_eq!(result.narratives[0].acn, "ACN-Sample");
        assert_eq!(
            result.narratives[0].keywords,
            vec!["communication", "tower", "frequency"]
        );
    }

    #[test]
    fn long_narratives_are_truncated() {
        let text = format!("runway {}", "x".repeat(600));
        let dataset = Dataset::from_records(vec![record("1", "201801", None, Some(&text))]);
        let result = topic_narratives(&dataset, &StaticTopicModel::new(), 1, 3);

        let narrative = &result.narratives[0].narrative;
        assert_eq!(narrative.chars().count(), 500);
        assert!(narrative.ends_with("..."));
        assert_eq!(truncate_narrative("short"), "short");
    }

    #[test]
    fn keywords_cut_by_truncation_still_rank_but_are_not_reported() {
        // "incursion" only appears past the truncation point
        let late = format!("runway {} incursion", "x".repeat(600));
        let dataset = Dataset::from_records(vec![
            record("1", "201801", None, Some("runway only")),
            record("2", "201801", None, Some(&late)),
        ]);
        let result = topic_narratives(&dataset, &StaticTopicModel::new(), 1, 3);

        let acns: Vec<&str> = result.narratives.iter().map(|n| n.acn.as_str()).collect();
        assert_eq!(acns, vec!["ACN-2", "ACN-1"]);
        assert_eq!(result.narratives[0].keywords, vec!["runway"]);
    }
}
