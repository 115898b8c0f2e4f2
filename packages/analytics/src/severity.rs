//! Keyword-based severity classification.

use asrs_dashboard_incident_models::{IncidentRecord, Severity};

/// Phrases that promote an incident to high or medium severity.
///
/// Matching is a case-insensitive substring search; high phrases are
/// checked first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityRules {
    /// Any of these makes an incident [`Severity::High`].
    pub high: Vec<String>,
    /// Any of these makes an incident [`Severity::Medium`].
    pub medium: Vec<String>,
}

impl Default for SeverityRules {
    fn default() -> Self {
        Self {
            high: ["runway incursion", "near miss", "collision", "go around", "aborted"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            medium: ["hold short", "crossed", "deviation", "confusion"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

impl SeverityRules {
    /// Classifies free text.
    #[must_use]
    pub fn classify_text(&self, text: &str) -> Severity {
        let text = text.to_lowercase();
        let hit = |phrases: &[String]| {
            phrases
                .iter()
                .any(|p| text.contains(p.to_lowercase().as_str()))
        };

        if hit(&self.high) {
            Severity::High
        } else if hit(&self.medium) {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Classifies a record from its synopsis, falling back to its narrative.
#[must_use]
pub fn classify_severity(record: &IncidentRecord, rules: &SeverityRules) -> Severity {
    record
        .primary_text()
        .map_or(Severity::Low, |text| rules.classify_text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, record};

    #[test]
    fn high_phrases_win_over_medium() {
        let rules = SeverityRules::default();
        assert_eq!(
            rules.classify_text("Runway Incursion after crossing HOLD SHORT line"),
            Severity::High
        );
        assert_eq!(rules.classify_text("Aircraft crossed the bars"), Severity::Medium);
        assert_eq!(rules.classify_text("Routine taxi"), Severity::Low);
    }

    #[test]
    fn human_factors_alone_is_low() {
        let rules = SeverityRules::default();
        assert_eq!(rules.classify_text("Human Factors"), Severity::Low);
    }

    #[test]
    fn falls_back_to_narrative() {
        let rules = SeverityRules::default();
        let mut row = record("1", "201703", None, Some(""));
        row.narrative = Some("We executed a go around.".to_string());
        assert_eq!(classify_severity(&row, &rules), Severity::High);

        row.narrative = None;
        assert_eq!(classify_severity(&row, &rules), Severity::Low);
    }

    #[test]
    fn synopsis_takes_precedence() {
        let rules = SeverityRules::default();
        let mut row = record("1", "201703", None, Some("Taxiway confusion."));
        row.narrative = Some("Near miss on the runway.".to_string());
        assert_eq!(classify_severity(&row, &rules), Severity::Medium);
    }

    #[test]
    fn classifies_fixture_rows() {
        let rules = SeverityRules::default();
        let dataset = fixtures::dataset();
        let severities: Vec<Severity> = dataset
            .iter()
            .map(|r| classify_severity(r, &rules))
            .collect();
        assert_eq!(
            severities,
            vec![Severity::High, Severity::Medium, Severity::Medium, Severity::Low]
        );
    }

    #[test]
    fn custom_rules() {
        let rules = SeverityRules {
            high: vec!["Engine Fire".to_string()],
            medium: vec![],
        };
        assert_eq!(rules.classify_text("engine fire on roll"), Severity::High);
        assert_eq!(rules.classify_text("runway incursion"), Severity::Low);
    }
}
