use crate::state::CrawlState;
use std::collections::HashMap;
use std::sync::Mutex;

/// Shared visited ledger and asset list for a single crawl
///
/// The ledger is the mechanism that prevents duplicate fetches and keeps
/// link cycles from recursing forever: every URL is claimed exactly once via
/// [`CrawlLedger::mark_seen`], and exactly one task ever transitions a key
/// out of `Discovered`.
///
/// Both the visited map and the asset list sit behind one mutex, so every
/// read-modify-write sequence is a single critical section. The ledger is
/// shared across crawl tasks via `Arc<CrawlLedger>`; it holds no ambient
/// global state.
pub struct CrawlLedger {
    inner: Mutex<LedgerInner>,
}

struct LedgerInner {
    visited: HashMap<String, CrawlState>,
    assets: Vec<String>,
}

/// A consistent point-in-time copy of the ledger, taken under the lock
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    /// Every seen URL and its current state
    pub visited: HashMap<String, CrawlState>,

    /// Asset URLs in discovery order
    pub assets: Vec<String>,
}

impl CrawlLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LedgerInner {
                visited: HashMap::new(),
                assets: Vec::new(),
            }),
        }
    }

    /// Atomically claims a URL for processing
    ///
    /// If the URL is absent it is inserted in `Discovered` state and true is
    /// returned: the caller has won the right to process it. If it is
    /// already present, false is returned. The check and the insert happen
    /// under one lock acquisition, so two concurrent callers can never both
    /// win the same URL.
    pub fn mark_seen(&self, url: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        if inner.visited.contains_key(url) {
            return false;
        }
        inner.visited.insert(url.to_string(), CrawlState::Discovered);
        true
    }

    /// Returns true if the URL is already present in the ledger
    ///
    /// Used by the link extractor to drop duplicates early; the authoritative
    /// claim still happens through [`CrawlLedger::mark_seen`].
    pub fn contains(&self, url: &str) -> bool {
        self.inner.lock().unwrap().visited.contains_key(url)
    }

    /// Transitions a `Discovered` entry to a terminal state
    ///
    /// Returns false, without modifying the ledger, if the key is unknown,
    /// still untracked, or already terminal. That is a logic condition, not
    /// an error: the caller that won `mark_seen` is the only one expected to
    /// ever make this transition.
    pub fn mark_terminal(&self, url: &str, state: CrawlState) -> bool {
        if !state.is_terminal() {
            return false;
        }

        let mut inner = self.inner.lock().unwrap();
        match inner.visited.get_mut(url) {
            Some(current) if !current.is_terminal() => {
                *current = state;
                true
            }
            Some(_) => {
                tracing::debug!("Ignoring terminal transition for settled URL: {}", url);
                false
            }
            None => {
                tracing::debug!("Ignoring terminal transition for unknown URL: {}", url);
                false
            }
        }
    }

    /// Appends a URL to the asset list
    ///
    /// The caller must have won `mark_seen` for this URL first; the asset
    /// list is append-only and ordered by discovery.
    pub fn record_asset(&self, url: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.assets.push(url.to_string());
    }

    /// Takes a consistent snapshot of the ledger for persistence
    pub fn snapshot(&self) -> LedgerSnapshot {
        let inner = self.inner.lock().unwrap();
        LedgerSnapshot {
            visited: inner.visited.clone(),
            assets: inner.assets.clone(),
        }
    }

    /// Number of URLs ever seen
    pub fn seen_count(&self) -> usize {
        self.inner.lock().unwrap().visited.len()
    }

    /// Number of assets recorded so far
    pub fn asset_count(&self) -> usize {
        self.inner.lock().unwrap().assets.len()
    }
}

impl Default for CrawlLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_mark_seen_first_wins() {
        let ledger = CrawlLedger::new();

        assert!(ledger.mark_seen("https://example.org/"));
        assert!(!ledger.mark_seen("https://example.org/"));
        assert_eq!(ledger.seen_count(), 1);
    }

    #[test]
    fn test_contains() {
        let ledger = CrawlLedger::new();

        assert!(!ledger.contains("https://example.org/"));
        ledger.mark_seen("https://example.org/");
        assert!(ledger.contains("https://example.org/"));
    }

    #[test]
    fn test_mark_terminal_from_discovered() {
        let ledger = CrawlLedger::new();
        ledger.mark_seen("https://example.org/");

        assert!(ledger.mark_terminal("https://example.org/", CrawlState::CrawledPage));

        let snapshot = ledger.snapshot();
        assert_eq!(
            snapshot.visited.get("https://example.org/"),
            Some(&CrawlState::CrawledPage)
        );
    }

    #[test]
    fn test_mark_terminal_unknown_key() {
        let ledger = CrawlLedger::new();
        assert!(!ledger.mark_terminal("https://example.org/", CrawlState::Failed));
        assert_eq!(ledger.seen_count(), 0);
    }

    #[test]
    fn test_mark_terminal_only_once() {
        let ledger = CrawlLedger::new();
        ledger.mark_seen("https://example.org/");

        assert!(ledger.mark_terminal("https://example.org/", CrawlState::CrawledAsset));
        assert!(!ledger.mark_terminal("https://example.org/", CrawlState::Failed));

        let snapshot = ledger.snapshot();
        assert_eq!(
            snapshot.visited.get("https://example.org/"),
            Some(&CrawlState::CrawledAsset)
        );
    }

    #[test]
    fn test_mark_terminal_rejects_discovered() {
        let ledger = CrawlLedger::new();
        ledger.mark_seen("https://example.org/");

        assert!(!ledger.mark_terminal("https://example.org/", CrawlState::Discovered));
    }

    #[test]
    fn test_record_asset_order() {
        let ledger = CrawlLedger::new();

        ledger.mark_seen("https://example.org/b.pdf");
        ledger.record_asset("https://example.org/b.pdf");
        ledger.mark_seen("https://example.org/a.pdf");
        ledger.record_asset("https://example.org/a.pdf");

        let snapshot = ledger.snapshot();
        assert_eq!(
            snapshot.assets,
            vec![
                "https://example.org/b.pdf".to_string(),
                "https://example.org/a.pdf".to_string()
            ]
        );
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let ledger = CrawlLedger::new();
        ledger.mark_seen("https://example.org/");

        let snapshot = ledger.snapshot();
        ledger.mark_seen("https://example.org/other");

        assert_eq!(snapshot.visited.len(), 1);
        assert_eq!(ledger.seen_count(), 2);
    }

    #[tokio::test]
    async fn test_mark_seen_single_winner_under_concurrency() {
        let ledger = Arc::new(CrawlLedger::new());
        let mut handles = Vec::new();

        for _ in 0..32 {
            let ledger = Arc::clone(&ledger);
            handles.push(tokio::spawn(async move {
                ledger.mark_seen("https://example.org/contested")
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(ledger.seen_count(), 1);
    }
}
