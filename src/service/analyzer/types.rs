//! Shared types for analysis results.
//!
//! These types are analyzer-agnostic and work with both the Content and
//! Technical analyzers.

use serde::Serialize;

/// Wrapper type for scores, storing an integer 0-100 value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    pub const FULL: Score = Score(100);
    pub const ZERO: Score = Score(0);

    pub fn value(self) -> u8 {
        self.0
    }

    /// Subtract a penalty, flooring at 0.
    #[must_use]
    pub fn penalize(self, penalty: u8) -> Score {
        Score(self.0.saturating_sub(penalty))
    }

    /// Unweighted arithmetic mean of category scores, rounded to the
    /// nearest integer. An empty slice means no category ran and yields a
    /// neutral full score.
    pub fn average(scores: &[Score]) -> Score {
        if scores.is_empty() {
            return Score::FULL;
        }
        let total: u32 = scores.iter().map(|s| u32::from(s.0)).sum();
        Score((total as f64 / scores.len() as f64).round() as u8)
    }
}

impl Default for Score {
    fn default() -> Self {
        Score::FULL
    }
}

impl From<u8> for Score {
    fn from(v: u8) -> Self {
        Score(v.min(100))
    }
}

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingStatus {
    Good,
    Warning,
    Error,
}

impl FindingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindingStatus::Good => "good",
            FindingStatus::Warning => "warning",
            FindingStatus::Error => "error",
        }
    }
}

/// Estimated impact of fixing a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
        }
    }
}

/// One reported issue or confirmation.
///
/// `id` is a fixed category label (e.g. `"missing-title"`), not an
/// instance identifier; repeated analyses produce the same ids for the
/// same categories.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub id: &'static str,
    pub title: String,
    pub description: String,
    pub status: FindingStatus,
    pub score: Score,
    pub impact: Impact,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affected_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl Finding {
    /// A passing confirmation for a category with no issues.
    pub fn good(id: &'static str, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status: FindingStatus::Good,
            score: Score::FULL,
            impact: Impact::Low,
            affected_urls: Vec::new(),
            solution: None,
            recommendation: None,
        }
    }

    /// A warning finding. Carries `100 - penalty` as its check-local score.
    pub fn warning(
        id: &'static str,
        title: impl Into<String>,
        description: impl Into<String>,
        penalty: u8,
        impact: Impact,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status: FindingStatus::Warning,
            score: Score::FULL.penalize(penalty),
            impact,
            affected_urls: Vec::new(),
            solution: None,
            recommendation: None,
        }
    }

    /// An error finding. Carries a zero check-local score.
    pub fn error(
        id: &'static str,
        title: impl Into<String>,
        description: impl Into<String>,
        impact: Impact,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            status: FindingStatus::Error,
            score: Score::ZERO,
            impact,
            affected_urls: Vec::new(),
            solution: None,
            recommendation: None,
        }
    }

    pub fn with_affected_urls(mut self, urls: Vec<String>) -> Self {
        self.affected_urls = urls;
        self
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// Result of one `analyze()` call.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult<D> {
    /// Unweighted mean of the per-category scores, 0-100.
    pub score: Score,
    pub items: Vec<Finding>,
    pub passed: usize,
    pub warning: usize,
    pub failed: usize,
    pub details: D,
}

impl<D> AnalysisResult<D> {
    pub fn new(score: Score, items: Vec<Finding>, details: D) -> Self {
        let passed = items
            .iter()
            .filter(|f| f.status == FindingStatus::Good)
            .count();
        let warning = items
            .iter()
            .filter(|f| f.status == FindingStatus::Warning)
            .count();
        let failed = items
            .iter()
            .filter(|f| f.status == FindingStatus::Error)
            .count();
        Self {
            score,
            items,
            passed,
            warning,
            failed,
            details,
        }
    }

    /// Findings with a given id. Ids are category labels, so this returns
    /// at most one entry per analysis.
    pub fn find(&self, id: &str) -> Option<&Finding> {
        self.items.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalize_floors_at_zero() {
        let score = Score::FULL.penalize(40).penalize(40).penalize(40);
        assert_eq!(score, Score::ZERO);
    }

    #[test]
    fn average_rounds_to_nearest() {
        let scores = [Score::from(100), Score::from(85)];
        assert_eq!(Score::average(&scores).value(), 93); // 92.5 rounds up

        let scores = [Score::from(100), Score::from(100), Score::from(70)];
        assert_eq!(Score::average(&scores).value(), 90);
    }

    #[test]
    fn average_of_no_categories_is_neutral() {
        assert_eq!(Score::average(&[]), Score::FULL);
    }

    #[test]
    fn counts_partition_items_by_status() {
        let items = vec![
            Finding::good("a-ok", "A", "fine"),
            Finding::warning("b-warn", "B", "meh", 10, Impact::Low),
            Finding::error("c-bad", "C", "broken", Impact::High),
            Finding::error("d-bad", "D", "broken", Impact::High),
        ];
        let result = AnalysisResult::new(Score::from(50), items, ());
        assert_eq!(result.passed, 1);
        assert_eq!(result.warning, 1);
        assert_eq!(result.failed, 2);
        assert_eq!(
            result.passed + result.warning + result.failed,
            result.items.len()
        );
    }

    #[test]
    fn finding_score_convention() {
        assert_eq!(
            Finding::error("x", "X", "d", Impact::High).score,
            Score::ZERO
        );
        assert_eq!(
            Finding::warning("y", "Y", "d", 15, Impact::Medium).score.value(),
            85
        );
        assert_eq!(Finding::good("z", "Z", "d").score, Score::FULL);
    }
}
