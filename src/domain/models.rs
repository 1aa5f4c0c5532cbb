//! Input model for the analyzers - behavior lives WITH data.
//!
//! A `PageRecord` is one crawled URL's metadata, supplied by an external
//! crawler. Records are immutable once appended to an analyzer; the
//! analyzers only read them. Every field an upstream collector might fail
//! to produce is an explicit `Option` or an empty `Vec` - absence is never
//! encoded as an empty-string-that-means-something.

use serde::Serialize;
use url::Url;

/// One outgoing link on a page. Only the count is consumed by the
/// analyzers; the href/text are carried for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub href: String,
    pub text: Option<String>,
}

impl PageLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: None,
        }
    }
}

/// One crawled URL's metadata, the unit of input to both analyzers.
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    /// Absolute URL; the scheme indicates transport security.
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Ordered H1 heading texts. Zero, one and many are all meaningful.
    pub h1: Vec<String>,
    pub internal_links: Vec<PageLink>,
    pub external_links: Vec<PageLink>,
    pub status_code: Option<u16>,
    /// Ordered redirect hops. More than one entry means the page was
    /// redirected; more than two means a chain.
    pub redirect_chain: Vec<String>,
    pub load_time_ms: Option<f64>,
    /// `None` means indexable (no directive seen by the crawler).
    pub is_indexable: Option<bool>,
    pub content_type: Option<String>,
}

impl PageRecord {
    /// An empty record for the given URL. Tests and callers fill in the
    /// rest with struct-update syntax.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            description: None,
            h1: Vec::new(),
            internal_links: Vec::new(),
            external_links: Vec::new(),
            status_code: None,
            redirect_chain: Vec::new(),
            load_time_ms: None,
            is_indexable: None,
            content_type: None,
        }
    }

    /// Title if present and non-empty. `Some("")` from a sloppy collector
    /// counts as missing.
    pub fn title_text(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// Description if present and non-empty.
    pub fn description_text(&self) -> Option<&str> {
        non_empty(self.description.as_deref())
    }

    pub fn parsed_url(&self) -> Option<Url> {
        Url::parse(&self.url).ok()
    }

    pub fn is_https(&self) -> bool {
        match self.parsed_url() {
            Some(u) => u.scheme() == "https",
            None => self.url.starts_with("https://"),
        }
    }

    /// True for plain-HTTP pages. Unparseable URLs fall back to a prefix
    /// check so a broken record can still be flagged.
    pub fn is_insecure(&self) -> bool {
        match self.parsed_url() {
            Some(u) => u.scheme() == "http",
            None => self.url.starts_with("http://"),
        }
    }

    pub fn has_query_params(&self) -> bool {
        match self.parsed_url() {
            Some(u) => u.query().is_some(),
            None => self.url.contains('?'),
        }
    }

    pub fn is_redirected(&self) -> bool {
        self.redirect_chain.len() > 1
    }

    /// A chain is more than two hops before reaching the final URL.
    pub fn has_redirect_chain(&self) -> bool {
        self.redirect_chain.len() > 2
    }

    /// Exactly one redirect hop, not a chain.
    pub fn has_simple_redirect(&self) -> bool {
        self.redirect_chain.len() == 2
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code, Some(code) if (400..500).contains(&code))
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code, Some(code) if code >= 500)
    }

    /// Pages are indexable unless the crawler saw an explicit block.
    pub fn is_blocked_from_indexing(&self) -> bool {
        self.is_indexable == Some(false)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_counts_as_missing() {
        let mut page = PageRecord::new("https://example.com/");
        assert_eq!(page.title_text(), None);

        page.title = Some(String::new());
        assert_eq!(page.title_text(), None);

        page.title = Some("Hello".to_string());
        assert_eq!(page.title_text(), Some("Hello"));
    }

    #[test]
    fn scheme_classification() {
        assert!(PageRecord::new("https://example.com/").is_https());
        assert!(!PageRecord::new("https://example.com/").is_insecure());
        assert!(PageRecord::new("http://example.com/").is_insecure());
        // Unparseable URL falls back to prefix matching
        assert!(PageRecord::new("http://").is_insecure());
        // Other schemes are neither secure nor flagged as plain HTTP
        let ftp = PageRecord::new("ftp://example.com/file");
        assert!(!ftp.is_https());
        assert!(!ftp.is_insecure());
    }

    #[test]
    fn redirect_shape() {
        let mut page = PageRecord::new("https://example.com/");
        assert!(!page.is_redirected());

        page.redirect_chain = vec!["https://a/".into(), "https://b/".into()];
        assert!(page.is_redirected());
        assert!(page.has_simple_redirect());
        assert!(!page.has_redirect_chain());

        page.redirect_chain.push("https://c/".into());
        assert!(page.has_redirect_chain());
        assert!(!page.has_simple_redirect());
    }

    #[test]
    fn status_classification() {
        let mut page = PageRecord::new("https://example.com/");
        assert!(!page.is_client_error());
        assert!(!page.is_server_error());

        page.status_code = Some(404);
        assert!(page.is_client_error());
        assert!(!page.is_server_error());

        page.status_code = Some(500);
        assert!(!page.is_client_error());
        assert!(page.is_server_error());
    }

    #[test]
    fn query_detection_uses_parsed_url() {
        assert!(PageRecord::new("https://example.com/search?q=seo").has_query_params());
        assert!(!PageRecord::new("https://example.com/search").has_query_params());
    }
}
