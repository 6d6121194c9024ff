//! Link extraction from fetched pages
//!
//! This module walks a parsed document and yields the in-scope, unvisited
//! absolute URLs referenced by anchor elements. Parsing happens in a
//! synchronous helper so the document tree never lives across an await
//! point.

use crate::state::CrawlLedger;
use crate::url::{host_allowed, is_crawlable_scheme, resolve_href};
use scraper::{Html, Selector};
use url::Url;

/// Extracts the in-scope candidate links from an HTML page
///
/// Anchors are visited in document order (pre-order over the whole tree, via
/// the `a[href]` selector). For each href:
/// 1. Resolve against the base URL; drop on resolution failure
/// 2. Require an `http` or `https` scheme
/// 3. Require the host to match the allow-list
/// 4. Drop URLs already present in the ledger
///
/// The result is the ordered candidate list for this document only; a fresh
/// extraction must be performed for each freshly fetched page.
///
/// # Arguments
///
/// * `html` - The fetched page body
/// * `base_url` - The base URL for resolving relative hrefs
/// * `allowed_hosts` - The host allow-list patterns
/// * `ledger` - The shared visited ledger
pub fn extract_links(
    html: &str,
    base_url: &Url,
    allowed_hosts: &[String],
    ledger: &CrawlLedger,
) -> Vec<Url> {
    let document = Html::parse_document(html);

    let mut links = Vec::new();

    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let href = href.trim();

        // Same-page anchors resolve to the page itself plus a fragment,
        // which would dodge the ledger's string-keyed dedup
        if href.is_empty() || href.starts_with('#') {
            continue;
        }

        let link = match resolve_href(base_url, href) {
            Ok(link) => link,
            Err(e) => {
                tracing::debug!("Skipping unresolvable href: {}", e);
                continue;
            }
        };

        if !is_crawlable_scheme(&link) {
            continue;
        }

        let Some(host) = link.host_str() else {
            continue;
        };

        if !host_allowed(host, allowed_hosts) {
            tracing::debug!("Host not allowed: {}", host);
            continue;
        }

        if ledger.contains(link.as_str()) {
            continue;
        }

        tracing::debug!("Found link: {}", link);
        links.push(link);
    }

    links
}
