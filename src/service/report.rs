//! AuditReport - merges both analyzer results into one consumer-facing
//! summary with an overall score, aggregate counts and JSON output.

use crate::domain::models::PageRecord;
use crate::error::Result;
use crate::service::analyzer::{
    AnalysisResult, Analyzer, ContentAnalyzer, ContentDetails, Finding, FindingStatus, Impact,
    Score, TechnicalAnalyzer, TechnicalDetails,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Combined audit of one crawl: the content and technical results plus
/// site-wide aggregates. Produced once per audit run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub audit_id: String,
    pub generated_at: DateTime<Utc>,
    /// Equal-weight mean of the two analyzer scores.
    pub overall_score: Score,
    pub passed: usize,
    pub warning: usize,
    pub failed: usize,
    pub content: AnalysisResult<ContentDetails>,
    pub technical: AnalysisResult<TechnicalDetails>,
}

impl AuditReport {
    /// Merge one content and one technical result. Both are expected to
    /// come from the same page set, but nothing here depends on that.
    pub fn assemble(
        content: AnalysisResult<ContentDetails>,
        technical: AnalysisResult<TechnicalDetails>,
    ) -> Self {
        let overall_score = Score::average(&[content.score, technical.score]);
        let report = Self {
            audit_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            overall_score,
            passed: content.passed + technical.passed,
            warning: content.warning + technical.warning,
            failed: content.failed + technical.failed,
            content,
            technical,
        };
        info!(
            audit_id = %report.audit_id,
            score = report.overall_score.value(),
            failed = report.failed,
            "audit report assembled"
        );
        report
    }

    /// Run both analyzers over one page set and assemble the report.
    pub fn from_pages<I>(pages: I) -> Self
    where
        I: IntoIterator<Item = PageRecord>,
    {
        let mut content = ContentAnalyzer::new();
        let mut technical = TechnicalAnalyzer::new();
        for page in pages {
            technical.add_page(page.clone());
            content.add_page(page);
        }
        Self::assemble(content.analyze(), technical.analyze())
    }

    /// Worst findings first: errors before warnings, higher impact first.
    /// Good findings are never included.
    pub fn top_issues(&self, limit: usize) -> Vec<&Finding> {
        let mut issues: Vec<&Finding> = self
            .content
            .items
            .iter()
            .chain(self.technical.items.iter())
            .filter(|f| f.status != FindingStatus::Good)
            .collect();
        issues.sort_by_key(|f| {
            let status_rank = match f.status {
                FindingStatus::Error => 0,
                FindingStatus::Warning => 1,
                FindingStatus::Good => 2,
            };
            let impact_rank = match f.impact {
                Impact::High => 0,
                Impact::Medium => 1,
                Impact::Low => 2,
            };
            (status_rank, impact_rank)
        });
        issues.truncate(limit);
        issues
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[test]
    fn overall_score_is_mean_of_both_results() {
        let report = AuditReport::from_pages(vec![
            fixtures::healthy_page("https://example.com/"),
            fixtures::healthy_page("https://example.com/about"),
        ]);
        assert_eq!(report.overall_score, Score::FULL);
        assert_eq!(report.failed, 0);
        assert_eq!(report.warning, 0);
    }

    #[test]
    fn totals_partition_all_findings() {
        let mut page = fixtures::bare_page("http://example.com/");
        page.status_code = Some(503);
        let report = AuditReport::from_pages(vec![page]);

        assert_eq!(
            report.passed + report.warning + report.failed,
            report.content.items.len() + report.technical.items.len()
        );
        assert!(report.failed > 0);
    }

    #[test]
    fn top_issues_orders_errors_before_warnings() {
        let mut page = fixtures::bare_page("http://example.com/");
        page.status_code = Some(404);
        let report = AuditReport::from_pages(vec![page]);

        let issues = report.top_issues(3);
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|f| f.status == FindingStatus::Error));

        let all = report.top_issues(usize::MAX);
        let first_warning = all
            .iter()
            .position(|f| f.status == FindingStatus::Warning)
            .expect("some warning expected");
        assert!(all[..first_warning]
            .iter()
            .all(|f| f.status == FindingStatus::Error));
    }

    #[test]
    fn json_round_trips_ids() {
        let report = AuditReport::from_pages(vec![fixtures::bare_page("https://example.com/")]);
        let json = report.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["overall_score"], report.overall_score.value());
        let ids: Vec<&str> = value["content"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["id"].as_str().unwrap())
            .collect();
        assert!(ids.contains(&"missing-title"));
    }
}
