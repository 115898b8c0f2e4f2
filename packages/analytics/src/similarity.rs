//! Keyword-overlap similarity between incidents.

use asrs_dashboard_analytics_models::SimilarIncident;
use asrs_dashboard_dataset::Dataset;
use asrs_dashboard_incident_models::IncidentRecord;

use crate::AnalyticsError;

/// Default number of similar incidents returned.
pub const DEFAULT_SIMILAR_LIMIT: usize = 4;

/// Maximum number of matched terms listed in a match reason.
const MAX_REASON_TERMS: usize = 3;

/// Scoring constants for [`find_similar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimilarityScoring {
    /// Similarity reported for a single shared term, minus `per_term`.
    pub base: u32,
    /// Added per shared term.
    pub per_term: u32,
    /// Upper bound on the reported similarity.
    pub cap: u32,
    /// Terms looked for in the target text, in reporting order. Matching is
    /// case-insensitive.
    pub vocabulary: Vec<String>,
    /// Term used when the target contains none of `vocabulary`.
    pub fallback_term: String,
}

impl Default for SimilarityScoring {
    fn default() -> Self {
        Self {
            base: 70,
            per_term: 7,
            cap: 98,
            vocabulary: [
                "runway",
                "taxiway",
                "hold short",
                "clearance",
                "tower",
                "ground",
                "radio",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            fallback_term: "runway".to_string(),
        }
    }
}

impl SimilarityScoring {
    /// Similarity percentage for `score` shared terms.
    #[must_use]
    pub fn similarity(&self, score: usize) -> u32 {
        let score = u32::try_from(score).unwrap_or(u32::MAX);
        self.base
            .saturating_add(score.saturating_mul(self.per_term))
            .min(self.cap)
    }

    /// Lowercased vocabulary terms present in `text`, or the lowercased
    /// fallback term if none are.
    #[must_use]
    pub fn key_terms(&self, text: &str) -> Vec<String> {
        let text = text.to_lowercase();
        let terms: Vec<String> = self
            .vocabulary
            .iter()
            .map(|t| t.to_lowercase())
            .filter(|t| text.contains(t.as_str()))
            .collect();

        if terms.is_empty() {
            vec![self.fallback_term.to_lowercase()]
        } else {
            terms
        }
    }
}

fn lowered_text(record: &IncidentRecord) -> String {
    record.primary_text().unwrap_or_default().to_lowercase()
}

/// Finds up to `limit` records that share vocabulary with incident `acn`.
///
/// Records with the same ACN as the target are never returned. Higher
/// scores come first; equal scores keep dataset order.
///
/// # Errors
///
/// * If no record has the given ACN
pub fn find_similar(
    dataset: &Dataset,
    acn: &str,
    limit: usize,
    scoring: &SimilarityScoring,
) -> Result<Vec<SimilarIncident>, AnalyticsError> {
    let target = dataset
        .find_by_acn(acn)
        .ok_or_else(|| AnalyticsError::NotFound {
            acn: acn.to_string(),
        })?;

    let target_text = lowered_text(target);
    let key_terms = scoring.key_terms(&target_text);

    let mut scored: Vec<(&IncidentRecord, Vec<&str>)> = dataset
        .iter()
        .filter(|r| r.acn != acn)
        .filter_map(|r| {
            let text = lowered_text(r);
            let matched: Vec<&str> = key_terms
                .iter()
                .map(String::as_str)
                .filter(|t| text.contains(t))
                .collect();
            (!matched.is_empty()).then_some((r, matched))
        })
        .collect();

    // stable, so equal scores stay in dataset order
    scored.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    log::debug!(
        "Similarity for {acn}: terms={key_terms:?} candidates={}",
        scored.len()
    );

    Ok(scored
        .into_iter()
        .take(limit)
        .map(|(record, matched)| SimilarIncident {
            acn: record.acn.clone(),
            location: record.location_label().unwrap_or("Unknown").to_string(),
            similarity: scoring.similarity(matched.len()),
            match_reason: format!(
                "Similar: {}",
                matched
                    .iter()
                    .take(MAX_REASON_TERMS)
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, record};

    #[test]
    fn similarity_is_capped() {
        let scoring = SimilarityScoring::default();
        assert_eq!(scoring.similarity(1), 77);
        assert_eq!(scoring.similarity(4), 98);
        assert_eq!(scoring.similarity(7), 98);
    }

    #[test]
    fn key_terms_fall_back() {
        let scoring = SimilarityScoring::default();
        assert_eq!(scoring.key_terms("nothing relevant"), vec!["runway"]);
        assert_eq!(
            scoring.key_terms("tower cleared us to the runway"),
            vec!["runway", "tower"]
        );
    }

    #[test]
    fn configured_terms_match_case_insensitively() {
        let scoring = SimilarityScoring {
            vocabulary: vec!["Hold Short".to_string(), "ATIS".to_string()],
            fallback_term: "Taxiway".to_string(),
            ..SimilarityScoring::default()
        };
        assert_eq!(
            scoring.key_terms("crossed the hold short line"),
            vec!["hold short"]
        );
        assert_eq!(scoring.key_terms("nothing relevant"), vec!["taxiway"]);

        let dataset = Dataset::from_records(vec![
            record("1", "201801", None, Some("Missed ATIS update")),
            record("2", "201801", None, Some("atis was stale")),
        ]);
        let similar = find_similar(&dataset, "1", 4, &scoring).unwrap();
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].match_reason, "Similar: atis");
    }

    #[test]
    fn unknown_acn_is_not_found() {
        let dataset = fixtures::dataset();
        let err = find_similar(&dataset, "9999", 4, &SimilarityScoring::default()).unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFound { acn } if acn == "9999"));
    }

    #[test]
    fn ranks_by_shared_terms() {
        let dataset = fixtures::dataset();
        let similar = find_similar(&dataset, "1001", 4, &SimilarityScoring::default()).unwrap();

        // 1001 mentions runway, hold short, tower
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].acn, "1002");
        assert_eq!(similar[0].location, "KLAX");
        assert_eq!(similar[0].similarity, 77);
        assert_eq!(similar[0].match_reason, "Similar: runway");
    }

    #[test]
    fn excludes_target_and_duplicates_and_keeps_dataset_order() {
        let dataset = Dataset::from_records(vec![
            record("1", "201801", None, Some("runway tower")),
            record("2", "201801", None, Some("tower only")),
            record("1", "201802", None, Some("runway tower duplicate")),
            record("3", "201803", None, Some("runway here")),
            record("4", "201804", None, Some("runway and tower again")),
        ]);
        let similar = find_similar(&dataset, "1", 3, &SimilarityScoring::default()).unwrap();
        let acns: Vec<&str> = similar.iter().map(|s| s.acn.as_str()).collect();

        assert_eq!(acns, vec!["4", "2", "3"]);
        assert_eq!(similar[0].match_reason, "Similar: runway, tower");
        assert_eq!(similar[1].location, "Unknown");
    }

    #[test]
    fn match_reason_lists_at_most_three_terms() {
        let text = "runway taxiway hold short clearance tower";
        let dataset = Dataset::from_records(vec![
            record("1", "201801", None, Some(text)),
            record("2", "201801", None, Some(text)),
        ]);
        let similar = find_similar(&dataset, "1", 4, &SimilarityScoring::default()).unwrap();
        assert_eq!(
            similar[0].match_reason,
            "Similar: runway, taxiway, hold short"
        );
        assert_eq!(similar[0].similarity, 98);
    }
}
