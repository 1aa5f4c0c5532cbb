//! Content analyzer - on-page SEO quality scoring.
//!
//! Scores a site's on-page optimization from structural/textual metadata:
//! titles, descriptions, headings, URL shape and internal linking. Five
//! equally-weighted categories each start at 100 and lose points per
//! triggered check; the overall score is their unweighted mean.

use super::{AnalysisResult, Analyzer, Finding, Impact, Score};
use crate::domain::models::PageRecord;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

// Recommended length bands (bytes, matching the crawler's extraction)
const TITLE_MIN_LEN: usize = 30;
const TITLE_MAX_LEN: usize = 60;
const DESCRIPTION_MIN_LEN: usize = 120;
const DESCRIPTION_MAX_LEN: usize = 160;
const URL_MAX_LEN: usize = 100;
const MIN_AVG_INTERNAL_LINKS: f64 = 2.0;

// Per-check score penalties
const PENALTY_MISSING_TITLE: u8 = 30;
const PENALTY_TITLE_TOO_LONG: u8 = 15;
const PENALTY_TITLE_TOO_SHORT: u8 = 10;
const PENALTY_DUPLICATE_TITLES: u8 = 20;
const PENALTY_MISSING_DESCRIPTION: u8 = 25;
const PENALTY_DESCRIPTION_TOO_LONG: u8 = 15;
const PENALTY_DESCRIPTION_TOO_SHORT: u8 = 10;
const PENALTY_MISSING_H1: u8 = 30;
const PENALTY_MULTIPLE_H1: u8 = 20;
const PENALTY_HEADING_HIERARCHY: u8 = 15;
const PENALTY_LONG_URLS: u8 = 10;
const PENALTY_URL_QUERY_PARAMS: u8 = 5;
const PENALTY_URL_UNDERSCORES: u8 = 5;
const PENALTY_LOW_INTERNAL_LINKING: u8 = 20;

/// Aggregate counters for the content analysis.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentDetails {
    pub pages_analyzed: usize,
    pub missing_titles: usize,
    pub duplicate_title_groups: usize,
    pub missing_descriptions: usize,
    pub pages_without_h1: usize,
    pub pages_with_multiple_h1: usize,
    pub average_internal_links: f64,
}

/// On-page SEO analyzer. Pages are appended while a crawl runs and scored
/// once with `analyze`.
#[derive(Debug, Default)]
pub struct ContentAnalyzer {
    pages: Vec<PageRecord>,
}

impl ContentAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn check_titles(&self, items: &mut Vec<Finding>, details: &mut ContentDetails) -> Score {
        let before = items.len();
        let mut score = Score::FULL;

        let missing: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.title_text().is_none())
            .map(|p| p.url.clone())
            .collect();
        details.missing_titles = missing.len();
        if !missing.is_empty() {
            score = score.penalize(PENALTY_MISSING_TITLE);
            items.push(
                Finding::error(
                    "missing-title",
                    "Missing title tags",
                    format!("{} page(s) have no title tag", missing.len()),
                    Impact::High,
                )
                .with_affected_urls(missing)
                .with_solution("Add a unique title tag to every page")
                .with_recommendation("Write a descriptive 30-60 character title for each page"),
            );
        }

        // Length checks only apply to pages that actually have a title
        let too_long: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.title_text().is_some_and(|t| t.len() > TITLE_MAX_LEN))
            .map(|p| p.url.clone())
            .collect();
        if !too_long.is_empty() {
            score = score.penalize(PENALTY_TITLE_TOO_LONG);
            items.push(
                Finding::warning(
                    "title-too-long",
                    "Titles exceed 60 characters",
                    format!("{} page(s) have titles that will truncate in search results", too_long.len()),
                    PENALTY_TITLE_TOO_LONG,
                    Impact::Medium,
                )
                .with_affected_urls(too_long)
                .with_recommendation("Shorten titles so they display fully in search results"),
            );
        }

        let too_short: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.title_text().is_some_and(|t| t.len() < TITLE_MIN_LEN))
            .map(|p| p.url.clone())
            .collect();
        if !too_short.is_empty() {
            score = score.penalize(PENALTY_TITLE_TOO_SHORT);
            items.push(
                Finding::warning(
                    "title-too-short",
                    "Titles under 30 characters",
                    format!("{} page(s) have titles too short to describe the content", too_short.len()),
                    PENALTY_TITLE_TOO_SHORT,
                    Impact::Low,
                )
                .with_affected_urls(too_short)
                .with_recommendation("Expand titles to 30-60 characters including the main keyword"),
            );
        }

        // Pages with absent titles are excluded from the duplicate tally;
        // they are already flagged by the missing-title check.
        let mut by_title: HashMap<&str, Vec<&str>> = HashMap::new();
        for page in &self.pages {
            if let Some(title) = page.title_text() {
                by_title.entry(title).or_default().push(page.url.as_str());
            }
        }
        let mut duplicated: Vec<String> = by_title
            .values()
            .filter(|urls| urls.len() >= 2)
            .flat_map(|urls| urls.iter().map(|u| u.to_string()))
            .collect();
        duplicated.sort();
        details.duplicate_title_groups = by_title.values().filter(|urls| urls.len() >= 2).count();
        if !duplicated.is_empty() {
            score = score.penalize(PENALTY_DUPLICATE_TITLES);
            items.push(
                Finding::error(
                    "duplicate-titles",
                    "Duplicate title tags",
                    format!(
                        "{} page(s) share a title with at least one other page",
                        duplicated.len()
                    ),
                    Impact::High,
                )
                .with_affected_urls(duplicated)
                .with_solution("Give every page a unique title")
                .with_recommendation("Differentiate titles so search engines can tell pages apart"),
            );
        }

        if items.len() == before {
            items.push(Finding::good(
                "titles-optimal",
                "Title tags look good",
                "All pages have unique, well-sized title tags",
            ));
        }
        score
    }

    fn check_descriptions(&self, items: &mut Vec<Finding>, details: &mut ContentDetails) -> Score {
        let before = items.len();
        let mut score = Score::FULL;

        let missing: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.description_text().is_none())
            .map(|p| p.url.clone())
            .collect();
        details.missing_descriptions = missing.len();
        if !missing.is_empty() {
            score = score.penalize(PENALTY_MISSING_DESCRIPTION);
            items.push(
                Finding::error(
                    "missing-description",
                    "Missing meta descriptions",
                    format!("{} page(s) have no meta description", missing.len()),
                    Impact::High,
                )
                .with_affected_urls(missing)
                .with_solution("Add a meta description to every page")
                .with_recommendation("Write a compelling 120-160 character description per page"),
            );
        }

        let too_long: Vec<String> = self
            .pages
            .iter()
            .filter(|p| {
                p.description_text()
                    .is_some_and(|d| d.len() > DESCRIPTION_MAX_LEN)
            })
            .map(|p| p.url.clone())
            .collect();
        if !too_long.is_empty() {
            score = score.penalize(PENALTY_DESCRIPTION_TOO_LONG);
            items.push(
                Finding::warning(
                    "description-too-long",
                    "Descriptions exceed 160 characters",
                    format!("{} page(s) have descriptions that will truncate", too_long.len()),
                    PENALTY_DESCRIPTION_TOO_LONG,
                    Impact::Medium,
                )
                .with_affected_urls(too_long)
                .with_recommendation("Shorten descriptions to prevent truncation in results"),
            );
        }

        let too_short: Vec<String> = self
            .pages
            .iter()
            .filter(|p| {
                p.description_text()
                    .is_some_and(|d| d.len() < DESCRIPTION_MIN_LEN)
            })
            .map(|p| p.url.clone())
            .collect();
        if !too_short.is_empty() {
            score = score.penalize(PENALTY_DESCRIPTION_TOO_SHORT);
            items.push(
                Finding::warning(
                    "description-too-short",
                    "Descriptions under 120 characters",
                    format!("{} page(s) have descriptions too short to be useful", too_short.len()),
                    PENALTY_DESCRIPTION_TOO_SHORT,
                    Impact::Low,
                )
                .with_affected_urls(too_short)
                .with_recommendation("Expand descriptions to 120-160 characters with a call to action"),
            );
        }

        if items.len() == before {
            items.push(Finding::good(
                "descriptions-optimal",
                "Meta descriptions look good",
                "All pages have well-sized meta descriptions",
            ));
        }
        score
    }

    fn check_headings(&self, items: &mut Vec<Finding>, details: &mut ContentDetails) -> Score {
        let before = items.len();
        let mut score = Score::FULL;

        let missing: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.h1.is_empty())
            .map(|p| p.url.clone())
            .collect();
        details.pages_without_h1 = missing.len();
        if !missing.is_empty() {
            score = score.penalize(PENALTY_MISSING_H1);
            items.push(
                Finding::error(
                    "missing-h1",
                    "Missing H1 headings",
                    format!("{} page(s) have no H1 heading", missing.len()),
                    Impact::High,
                )
                .with_affected_urls(missing)
                .with_solution("Add one H1 heading near the top of each page")
                .with_recommendation("Use the H1 to state the page's main topic"),
            );
        }

        let multiple: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.h1.len() > 1)
            .map(|p| p.url.clone())
            .collect();
        details.pages_with_multiple_h1 = multiple.len();
        if !multiple.is_empty() {
            score = score.penalize(PENALTY_MULTIPLE_H1);
            items.push(
                Finding::warning(
                    "multiple-h1",
                    "Multiple H1 headings",
                    format!("{} page(s) have more than one H1 heading", multiple.len()),
                    PENALTY_MULTIPLE_H1,
                    Impact::Medium,
                )
                .with_affected_urls(multiple)
                .with_recommendation("Use a single H1 per page and H2-H6 for subsections"),
            );
        }

        let irregular: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.h1.len() != 1)
            .map(|p| p.url.clone())
            .collect();
        if !irregular.is_empty() {
            score = score.penalize(PENALTY_HEADING_HIERARCHY);
            items.push(
                Finding::warning(
                    "heading-hierarchy",
                    "Irregular heading hierarchy",
                    format!("{} page(s) do not have exactly one H1 heading", irregular.len()),
                    PENALTY_HEADING_HIERARCHY,
                    Impact::Medium,
                )
                .with_affected_urls(irregular)
                .with_recommendation("Structure each page around exactly one H1"),
            );
        }

        if items.len() == before {
            items.push(Finding::good(
                "headings-optimal",
                "Heading structure looks good",
                "Every page has exactly one H1 heading",
            ));
        }
        score
    }

    fn check_urls(&self, items: &mut Vec<Finding>) -> Score {
        let before = items.len();
        let mut score = Score::FULL;

        let long: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.url.len() > URL_MAX_LEN)
            .map(|p| p.url.clone())
            .collect();
        if !long.is_empty() {
            score = score.penalize(PENALTY_LONG_URLS);
            items.push(
                Finding::warning(
                    "long-urls",
                    "URLs exceed 100 characters",
                    format!("{} page(s) have overly long URLs", long.len()),
                    PENALTY_LONG_URLS,
                    Impact::Low,
                )
                .with_affected_urls(long)
                .with_recommendation("Keep URLs short and descriptive"),
            );
        }

        let with_query: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.has_query_params())
            .map(|p| p.url.clone())
            .collect();
        if !with_query.is_empty() {
            score = score.penalize(PENALTY_URL_QUERY_PARAMS);
            items.push(
                Finding::warning(
                    "url-query-params",
                    "URLs contain query parameters",
                    format!("{} page(s) expose query parameters in their URL", with_query.len()),
                    PENALTY_URL_QUERY_PARAMS,
                    Impact::Low,
                )
                .with_affected_urls(with_query)
                .with_recommendation("Prefer clean path-based URLs for indexable pages"),
            );
        }

        let with_underscores: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.url.contains('_'))
            .map(|p| p.url.clone())
            .collect();
        if !with_underscores.is_empty() {
            score = score.penalize(PENALTY_URL_UNDERSCORES);
            items.push(
                Finding::warning(
                    "url-underscores",
                    "URLs contain underscores",
                    format!("{} page(s) use underscores in their URL", with_underscores.len()),
                    PENALTY_URL_UNDERSCORES,
                    Impact::Low,
                )
                .with_affected_urls(with_underscores)
                .with_recommendation("Use hyphens instead of underscores as word separators"),
            );
        }

        if items.len() == before {
            items.push(Finding::good(
                "urls-optimal",
                "URL structure looks good",
                "All URLs are short and cleanly formatted",
            ));
        }
        score
    }

    fn check_internal_linking(
        &self,
        items: &mut Vec<Finding>,
        details: &mut ContentDetails,
    ) -> Score {
        let before = items.len();
        let mut score = Score::FULL;

        let average = if self.pages.is_empty() {
            0.0
        } else {
            let total: usize = self.pages.iter().map(|p| p.internal_links.len()).sum();
            total as f64 / self.pages.len() as f64
        };
        details.average_internal_links = average;

        // Never fires on an empty page set; an empty crawl has no linking
        // problem to report.
        if !self.pages.is_empty() && average < MIN_AVG_INTERNAL_LINKS {
            score = score.penalize(PENALTY_LOW_INTERNAL_LINKING);
            items.push(
                Finding::warning(
                    "low-internal-linking",
                    "Low internal linking",
                    format!("Pages average {:.1} internal links (recommend at least 2)", average),
                    PENALTY_LOW_INTERNAL_LINKING,
                    Impact::Medium,
                )
                .with_recommendation("Link related pages to each other to spread authority"),
            );
        }

        if items.len() == before {
            items.push(Finding::good(
                "internal-linking-optimal",
                "Internal linking looks good",
                "Pages are well connected by internal links",
            ));
        }
        score
    }
}

impl Analyzer for ContentAnalyzer {
    type Details = ContentDetails;

    fn add_page(&mut self, page: PageRecord) {
        self.pages.push(page);
    }

    fn analyze(&self) -> AnalysisResult<ContentDetails> {
        debug!(pages = self.pages.len(), "content analysis started");

        let mut items = Vec::new();
        let mut details = ContentDetails {
            pages_analyzed: self.pages.len(),
            ..Default::default()
        };

        let scores = [
            self.check_titles(&mut items, &mut details),
            self.check_descriptions(&mut items, &mut details),
            self.check_headings(&mut items, &mut details),
            self.check_urls(&mut items),
            self.check_internal_linking(&mut items, &mut details),
        ];

        let score = Score::average(&scores);
        debug!(
            score = score.value(),
            findings = items.len(),
            "content analysis complete"
        );
        AnalysisResult::new(score, items, details)
    }

    fn name(&self) -> &'static str {
        "Content/SEO"
    }
}
