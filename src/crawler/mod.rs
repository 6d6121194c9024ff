//! Crawler module for page fetching and traversal
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and error classification
//! - Link extraction from fetched pages
//! - Concurrent traversal with a structured parent-waits-for-children join

mod engine;
mod extractor;
mod fetcher;

pub use engine::{crawl, CrawlEngine, CrawlReport};
pub use extractor::extract_links;
pub use fetcher::{build_http_client, fetch_page, FetchResult};
