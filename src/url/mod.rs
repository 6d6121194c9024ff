//! URL handling module for Pdf-Scout
//!
//! This module provides href resolution against a base URL, host allow-list
//! matching, and asset classification.

mod matcher;
mod resolve;

// Re-export main functions
pub use matcher::{host_allowed, host_matches_pattern};
pub use resolve::resolve_href;

use url::Url;

/// Classification of a discovered URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlClassification {
    /// Document asset - recorded, never fetched
    Asset,
    /// Regular page - fetched and recursed into
    Page,
}

impl UrlClassification {
    /// Returns true if the URL should be recorded as an asset
    pub fn is_asset(&self) -> bool {
        matches!(self, Self::Asset)
    }

    /// Returns true if the URL should be fetched and recursed into
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page)
    }
}

/// Classifies a URL as a document asset or a page to recurse into
///
/// A URL is an asset when its path component ends in the case-sensitive
/// literal suffix `.pdf`. The test is on the path only, so `.pdf` inside a
/// query string still classifies as a page, and `/doc.PDF` classifies as a
/// page. Classification is pure and never requires a network round-trip.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use pdf_scout::url::{classify_url, UrlClassification};
///
/// let url = Url::parse("https://example.org/reports/annual.pdf").unwrap();
/// assert_eq!(classify_url(&url), UrlClassification::Asset);
///
/// let url = Url::parse("https://example.org/reports/").unwrap();
/// assert_eq!(classify_url(&url), UrlClassification::Page);
/// ```
pub fn classify_url(url: &Url) -> UrlClassification {
    if url.path().ends_with(".pdf") {
        UrlClassification::Asset
    } else {
        UrlClassification::Page
    }
}

/// Returns true if the URL carries a crawl-eligible scheme
///
/// Only `http` and `https` URLs are ever fetched or recorded.
pub fn is_crawlable_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
