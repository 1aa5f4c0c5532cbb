//! Rule-based audit scoring engine for crawled site data.
//!
//! Two independent analyzers operate over the same input shape
//! ([`PageRecord`]) and produce the same output shape ([`AnalysisResult`]):
//!
//! - [`ContentAnalyzer`]: on-page optimization quality (titles,
//!   descriptions, headings, URL shape, internal linking)
//! - [`TechnicalAnalyzer`]: transport-level health (protocol, status codes,
//!   redirects, response times, indexability)
//!
//! Both are fed incrementally via `add_page` while a crawl runs, then
//! `analyze()` is called once. Analysis is synchronous, performs no I/O and
//! is total over its input: malformed or empty records produce findings,
//! never errors. [`AuditReport`] merges the two results for consumers.

pub mod domain;
pub mod error;
pub mod service;
pub mod test_utils;

pub use domain::models::{PageLink, PageRecord};
pub use error::{AppError, Result};
pub use service::analyzer::{
    AnalysisResult, Analyzer, ContentAnalyzer, ContentDetails, Finding, FindingStatus, Impact,
    Score, TechnicalAnalyzer, TechnicalDetails,
};
pub use service::report::AuditReport;
