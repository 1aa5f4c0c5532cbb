//! Technical analyzer - transport-level and crawlability health scoring.
//!
//! Scores protocol security, HTTP status codes, redirect behavior,
//! response times, indexability and content-type mix. Six equally-weighted
//! categories; same scoring model as the content analyzer.

use super::{AnalysisResult, Analyzer, Finding, Impact, Score};
use crate::domain::models::PageRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

// Thresholds
const SLOW_LOAD_MS: f64 = 3000.0;
const MODERATE_LOAD_MS: f64 = 1000.0;
const MAX_REDIRECT_RATIO: f64 = 0.2;

// Per-check score penalties
const PENALTY_NO_HTTPS: u8 = 40;
const PENALTY_CLIENT_ERRORS: u8 = 30;
const PENALTY_SERVER_ERRORS: u8 = 40;
const PENALTY_EXCESSIVE_REDIRECTS: u8 = 15;
const PENALTY_REDIRECT_CHAINS: u8 = 25;
const PENALTY_HAS_REDIRECTS: u8 = 10;
const PENALTY_SLOW_LOAD: u8 = 30;
const PENALTY_MODERATE_LOAD: u8 = 15;
const PENALTY_BLOCKED_INDEXING: u8 = 20;

/// Aggregate counters for the technical analysis.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TechnicalDetails {
    pub pages_analyzed: usize,
    pub https_pages: usize,
    pub http_pages: usize,
    pub client_error_pages: usize,
    pub server_error_pages: usize,
    pub redirected_pages: usize,
    pub redirect_chain_pages: usize,
    /// Mean over pages that reported a load time; `None` when no page did.
    pub average_load_time_ms: Option<f64>,
    pub blocked_pages: usize,
    pub content_types: BTreeMap<String, usize>,
}

/// Transport-health analyzer. Mirrors the content analyzer's contract.
#[derive(Debug, Default)]
pub struct TechnicalAnalyzer {
    pages: Vec<PageRecord>,
}

impl TechnicalAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn check_protocol(&self, items: &mut Vec<Finding>, details: &mut TechnicalDetails) -> Score {
        let mut score = Score::FULL;

        let insecure: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.is_insecure())
            .map(|p| p.url.clone())
            .collect();
        details.http_pages = insecure.len();
        details.https_pages = self.pages.iter().filter(|p| p.is_https()).count();

        if !insecure.is_empty() {
            score = score.penalize(PENALTY_NO_HTTPS);
            items.push(
                Finding::error(
                    "no-https",
                    "Pages served over plain HTTP",
                    format!("{} page(s) are not served over HTTPS", insecure.len()),
                    Impact::High,
                )
                .with_affected_urls(insecure)
                .with_solution("Serve every page over HTTPS and redirect HTTP traffic")
                .with_recommendation("Install a TLS certificate and enforce HTTPS site-wide"),
            );
        } else if self.pages.iter().all(|p| p.is_https()) {
            // Vacuously true for an empty crawl
            items.push(Finding::good(
                "https-enabled",
                "HTTPS everywhere",
                "Every page is served over a secure connection",
            ));
        }
        score
    }

    fn check_status_codes(
        &self,
        items: &mut Vec<Finding>,
        details: &mut TechnicalDetails,
    ) -> Score {
        let before = items.len();
        let mut score = Score::FULL;

        let client_errors: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.is_client_error())
            .map(|p| p.url.clone())
            .collect();
        details.client_error_pages = client_errors.len();
        if !client_errors.is_empty() {
            score = score.penalize(PENALTY_CLIENT_ERRORS);
            items.push(
                Finding::error(
                    "client-errors",
                    "Pages returning 4xx errors",
                    format!("{} page(s) returned a client error status", client_errors.len()),
                    Impact::High,
                )
                .with_affected_urls(client_errors)
                .with_solution("Fix or redirect broken pages and remove links to them"),
            );
        }

        let server_errors: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.is_server_error())
            .map(|p| p.url.clone())
            .collect();
        details.server_error_pages = server_errors.len();
        if !server_errors.is_empty() {
            score = score.penalize(PENALTY_SERVER_ERRORS);
            items.push(
                Finding::error(
                    "server-errors",
                    "Pages returning 5xx errors",
                    format!("{} page(s) returned a server error status", server_errors.len()),
                    Impact::High,
                )
                .with_affected_urls(server_errors)
                .with_solution("Investigate server logs and fix the failing endpoints"),
            );
        }

        if items.len() == before {
            items.push(Finding::good(
                "status-codes-ok",
                "No HTTP errors",
                "No page returned a 4xx or 5xx status",
            ));
        }
        score
    }

    fn check_redirects(&self, items: &mut Vec<Finding>, details: &mut TechnicalDetails) -> Score {
        let before = items.len();
        let mut score = Score::FULL;

        let redirected = self.pages.iter().filter(|p| p.is_redirected()).count();
        details.redirected_pages = redirected;

        if !self.pages.is_empty()
            && redirected as f64 / self.pages.len() as f64 > MAX_REDIRECT_RATIO
        {
            score = score.penalize(PENALTY_EXCESSIVE_REDIRECTS);
            items.push(
                Finding::warning(
                    "excessive-redirects",
                    "High share of redirected pages",
                    format!(
                        "{} of {} crawled pages were reached through a redirect",
                        redirected,
                        self.pages.len()
                    ),
                    PENALTY_EXCESSIVE_REDIRECTS,
                    Impact::Medium,
                )
                .with_recommendation("Link directly to final URLs to save redirect round-trips"),
            );
        }

        let chains: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.has_redirect_chain())
            .map(|p| p.url.clone())
            .collect();
        details.redirect_chain_pages = chains.len();
        let simple: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.has_simple_redirect())
            .map(|p| p.url.clone())
            .collect();

        // Chains take precedence: when any page has a multi-hop chain, the
        // plain has-redirects finding is suppressed for the whole analysis,
        // even for disjoint pages with a single-hop redirect.
        if !chains.is_empty() {
            score = score.penalize(PENALTY_REDIRECT_CHAINS);
            items.push(
                Finding::error(
                    "redirect-chains",
                    "Redirect chains",
                    format!("{} page(s) are reached through multi-hop redirect chains", chains.len()),
                    Impact::High,
                )
                .with_affected_urls(chains)
                .with_solution("Point every redirect straight at the final URL"),
            );
        } else if !simple.is_empty() {
            score = score.penalize(PENALTY_HAS_REDIRECTS);
            items.push(
                Finding::warning(
                    "has-redirects",
                    "Redirected pages",
                    format!("{} page(s) are reached through a redirect", simple.len()),
                    PENALTY_HAS_REDIRECTS,
                    Impact::Low,
                )
                .with_affected_urls(simple)
                .with_recommendation("Update internal links to target final URLs directly"),
            );
        }

        if items.len() == before {
            items.push(Finding::good(
                "redirects-ok",
                "Redirect usage looks fine",
                "No redirect chains and no excessive redirect share",
            ));
        }
        score
    }

    fn check_response_times(
        &self,
        items: &mut Vec<Finding>,
        details: &mut TechnicalDetails,
    ) -> Score {
        let timed: Vec<(&str, f64)> = self
            .pages
            .iter()
            .filter_map(|p| p.load_time_ms.map(|t| (p.url.as_str(), t)))
            .collect();

        // No timing data at all: the category is skipped, contributing a
        // neutral score with no findings (good or bad).
        if timed.is_empty() {
            details.average_load_time_ms = None;
            return Score::FULL;
        }

        let before = items.len();
        let mut score = Score::FULL;
        let average = timed.iter().map(|(_, t)| t).sum::<f64>() / timed.len() as f64;
        details.average_load_time_ms = Some(average);

        if average > SLOW_LOAD_MS {
            score = score.penalize(PENALTY_SLOW_LOAD);
            items.push(
                Finding::error(
                    "slow-load-time",
                    "Slow average load time",
                    format!("Pages load in {:.0}ms on average (over 3000ms)", average),
                    Impact::High,
                )
                .with_solution("Optimize images, enable caching, reduce server response time"),
            );
        } else if average > MODERATE_LOAD_MS {
            score = score.penalize(PENALTY_MODERATE_LOAD);
            items.push(
                Finding::warning(
                    "moderate-load-time",
                    "Moderate average load time",
                    format!("Pages load in {:.0}ms on average (over 1000ms)", average),
                    PENALTY_MODERATE_LOAD,
                    Impact::Medium,
                )
                .with_recommendation("Aim for an average load time under one second"),
            );
        }

        // Individual outliers are reported alongside the average check but
        // carry no score delta of their own.
        let slow: Vec<String> = timed
            .iter()
            .filter(|(_, t)| *t > SLOW_LOAD_MS)
            .map(|(url, _)| url.to_string())
            .collect();
        if !slow.is_empty() {
            items.push(
                Finding::warning(
                    "slow-pages",
                    "Individual slow pages",
                    format!("{} page(s) took over 3000ms to load", slow.len()),
                    0,
                    Impact::Medium,
                )
                .with_affected_urls(slow)
                .with_recommendation("Profile these pages for oversized assets or slow endpoints"),
            );
        }

        if items.len() == before {
            items.push(Finding::good(
                "load-time-good",
                "Response times are good",
                format!("Pages load in {:.0}ms on average", average),
            ));
        }
        score
    }

    fn check_indexability(
        &self,
        items: &mut Vec<Finding>,
        details: &mut TechnicalDetails,
    ) -> Score {
        let mut score = Score::FULL;

        let blocked: Vec<String> = self
            .pages
            .iter()
            .filter(|p| p.is_blocked_from_indexing())
            .map(|p| p.url.clone())
            .collect();
        details.blocked_pages = blocked.len();

        if !blocked.is_empty() {
            score = score.penalize(PENALTY_BLOCKED_INDEXING);
            items.push(
                Finding::warning(
                    "blocked-indexing",
                    "Pages blocked from indexing",
                    format!("{} page(s) are excluded from search engine indexes", blocked.len()),
                    PENALTY_BLOCKED_INDEXING,
                    Impact::Medium,
                )
                .with_affected_urls(blocked)
                .with_recommendation("Remove noindex directives from pages that should rank"),
            );
        } else {
            items.push(Finding::good(
                "indexing-allowed",
                "All pages indexable",
                "No crawled page is blocked from search engine indexes",
            ));
        }
        score
    }

    fn check_content_types(
        &self,
        items: &mut Vec<Finding>,
        details: &mut TechnicalDetails,
    ) -> Score {
        let mut tally: BTreeMap<String, usize> = BTreeMap::new();
        for page in &self.pages {
            if let Some(ct) = page.content_type.as_deref() {
                *tally.entry(ct.to_string()).or_default() += 1;
            }
        }
        let distinct = tally.len();
        details.content_types = tally;

        // Informational only, never penalized.
        items.push(Finding::good(
            "content-types",
            "Content type mix",
            format!("{} distinct content type(s) served", distinct),
        ));
        Score::FULL
    }
}

impl Analyzer for TechnicalAnalyzer {
    type Details = TechnicalDetails;

    fn add_page(&mut self, page: PageRecord) {
        self.pages.push(page);
    }

    fn analyze(&self) -> AnalysisResult<TechnicalDetails> {
        debug!(pages = self.pages.len(), "technical analysis started");

        let mut items = Vec::new();
        let mut details = TechnicalDetails {
            pages_analyzed: self.pages.len(),
            ..Default::default()
        };

        let scores = [
            self.check_protocol(&mut items, &mut details),
            self.check_status_codes(&mut items, &mut details),
            self.check_redirects(&mut items, &mut details),
            self.check_response_times(&mut items, &mut details),
            self.check_indexability(&mut items, &mut details),
            self.check_content_types(&mut items, &mut details),
        ];

        let score = Score::average(&scores);
        debug!(
            score = score.value(),
            findings = items.len(),
            "technical analysis complete"
        );
        AnalysisResult::new(score, items, details)
    }

    fn name(&self) -> &'static str {
        "Technical"
    }
}
