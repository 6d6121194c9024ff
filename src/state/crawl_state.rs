/// Crawl state definitions for the visited ledger
///
/// This module defines all possible states a URL can be in during the crawl
/// process.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the current state of a URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlState {
    /// URL has been claimed by a task but not yet processed
    Discovered,

    /// URL was fetched, parsed, and its links followed
    CrawledPage,

    /// URL was classified as a document asset and recorded without a fetch
    CrawledAsset,

    /// URL could not be processed (disallowed host, fetch or parse failure)
    Failed,
}

impl CrawlState {
    /// Returns true if this is a terminal state (no further processing)
    ///
    /// `Discovered` is the only non-terminal state; a URL is written to its
    /// terminal state exactly once.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Discovered)
    }

    /// Returns true if this represents a successfully processed URL
    pub fn is_success(&self) -> bool {
        matches!(self, Self::CrawledPage | Self::CrawledAsset)
    }

    /// Converts the crawl state to its snapshot string representation
    ///
    /// This is the form used for the ledger snapshot file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::CrawledPage => "crawled_page",
            Self::CrawledAsset => "crawled_asset",
            Self::Failed => "failed",
        }
    }

    /// Parses a crawl state from its snapshot string representation
    ///
    /// Returns None if the string doesn't match any known state.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "discovered" => Some(Self::Discovered),
            "crawled_page" => Some(Self::CrawledPage),
            "crawled_asset" => Some(Self::CrawledAsset),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Returns all possible crawl states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Discovered,
            Self::CrawledPage,
            Self::CrawledAsset,
            Self::Failed,
        ]
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
