//! Shared fixtures for unit tests, integration tests and benches.

pub mod fixtures {
    use crate::domain::models::{PageLink, PageRecord};

    /// A page that passes every content and technical check: in-band title
    /// (URL-prefixed, so fixtures never collide on the duplicate-title
    /// check), 147-character description, one H1, three internal links,
    /// HTTPS, status 200, 500ms load time. Keep URLs under ~30 characters
    /// so the derived title stays inside the 30-60 band.
    pub fn healthy_page(url: &str) -> PageRecord {
        PageRecord {
            title: Some(format!("{url} | a well optimized page title")),
            description: Some(
                "Fixture meta description for audit engine tests. ".repeat(3),
            ),
            h1: vec![format!("Welcome to {url}")],
            internal_links: vec![
                PageLink::new("/"),
                PageLink::new("/about"),
                PageLink::new("/contact"),
            ],
            external_links: vec![PageLink::new("https://elsewhere.example/")],
            status_code: Some(200),
            load_time_ms: Some(500.0),
            content_type: Some("text/html".to_string()),
            ..PageRecord::new(url)
        }
    }

    /// A record with nothing but a URL, the way a failed fetch comes back
    /// from a crawler.
    pub fn bare_page(url: &str) -> PageRecord {
        PageRecord::new(url)
    }

    /// Structurally sound page with no title or description.
    pub fn untitled_page(url: &str) -> PageRecord {
        PageRecord {
            title: None,
            description: None,
            ..healthy_page(url)
        }
    }

    /// A healthy page that reached its URL through the given redirect hops.
    pub fn redirected_page(url: &str, hops: &[&str]) -> PageRecord {
        PageRecord {
            redirect_chain: hops.iter().map(|h| h.to_string()).collect(),
            ..healthy_page(url)
        }
    }
}
