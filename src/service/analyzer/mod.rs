//! Audit analyzers for crawled page data.
//!
//! Two leaf analyzers share one contract:
//! - **Content**: on-page optimization quality from structural/textual
//!   metadata (titles, descriptions, headings, URLs, internal links)
//! - **Technical**: transport-level health (protocol, status codes,
//!   redirects, response times, indexability)
//!
//! Both implement the `Analyzer` trait for consistent usage. A caller
//! feeds the same crawled pages to each, calls `analyze()` once after the
//! crawl completes, and merges the results (see `service::report`).

mod content;
mod technical;
mod types;

pub use content::{ContentAnalyzer, ContentDetails};
pub use technical::{TechnicalAnalyzer, TechnicalDetails};
pub use types::*;

use crate::domain::models::PageRecord;
use serde::Serialize;

/// Strategy trait for audit scoring over an accumulated page set.
///
/// `analyze` is a pure function of the appended pages: no I/O, no
/// mutation, total over every input shape including the empty set.
/// Calling it twice on an unmodified analyzer yields identical results.
pub trait Analyzer {
    /// Category-specific aggregate counters attached to the result.
    type Details: Serialize;

    /// Append one crawled page. No validation, constant time.
    fn add_page(&mut self, page: PageRecord);

    /// Score the accumulated pages and return all applicable findings.
    fn analyze(&self) -> AnalysisResult<Self::Details>;

    /// Human-readable name for this analyzer.
    fn name(&self) -> &'static str;

    /// Append a batch of pages. Default implementation calls `add_page`
    /// for each record.
    fn add_pages<I>(&mut self, pages: I)
    where
        I: IntoIterator<Item = PageRecord>,
        Self: Sized,
    {
        for page in pages {
            self.add_page(page);
        }
    }
}
