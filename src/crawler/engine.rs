//! Crawl engine - traversal orchestration
//!
//! One task per page URL: claim the URL in the ledger, fetch, extract links,
//! record assets, fan out child tasks over discovered pages, and join every
//! child before the page itself completes. The recursion is bounded by the
//! depth of the reachable link graph; the number of in-flight fetches is
//! bounded by a semaphore sized from configuration.

use crate::config::Config;
use crate::crawler::extractor::extract_links;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::output::PersistenceSink;
use crate::state::{CrawlLedger, CrawlState};
use crate::url::{classify_url, host_allowed, is_crawlable_scheme};
use crate::{ScoutError, UrlError};
use futures::future::BoxFuture;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Summary of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Total URLs seen (pages, assets, and failures)
    pub urls_seen: usize,

    /// Document assets recorded
    pub assets_found: usize,
}

/// Main crawl engine structure
///
/// Holds the shared handles every crawl task needs: configuration, the HTTP
/// client, the visited ledger, the persistence sink, and the fetch
/// semaphore. Tasks receive it as `Arc<CrawlEngine>`.
pub struct CrawlEngine {
    config: Arc<Config>,
    client: Client,
    ledger: Arc<CrawlLedger>,
    sink: Arc<PersistenceSink>,
    fetch_permits: Arc<Semaphore>,
}

impl CrawlEngine {
    /// Creates a new engine from configuration
    pub fn new(config: Config) -> Result<Self, ScoutError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        let sink = PersistenceSink::new(
            &config.output.assets_path,
            &config.output.ledger_path,
        );
        let fetch_permits = Arc::new(Semaphore::new(
            config.crawler.max_concurrent_fetches as usize,
        ));

        Ok(Self {
            config: Arc::new(config),
            client,
            ledger: Arc::new(CrawlLedger::new()),
            sink: Arc::new(sink),
            fetch_permits,
        })
    }

    /// Validates a seed URL against the engine's scope
    ///
    /// Seed validation failures are the only fatal errors of a crawl: the
    /// seed must parse, carry an http(s) scheme, and sit inside the host
    /// allow-list.
    pub fn validate_seed(&self, seed: &str) -> Result<Url, ScoutError> {
        let url = Url::parse(seed).map_err(|e| UrlError::Parse(format!("{}: {}", seed, e)))?;

        if !is_crawlable_scheme(&url) {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()).into());
        }

        let host = url.host_str().ok_or(UrlError::MissingHost)?;

        if !host_allowed(host, &self.config.scope.allowed_hosts) {
            return Err(ScoutError::SeedOutOfScope {
                url: url.to_string(),
            });
        }

        Ok(url)
    }

    /// Runs a crawl from the given seed URL
    ///
    /// Per-page failures after seed validation are isolated: they are logged,
    /// marked `Failed` in the ledger, and never abort sibling or ancestor
    /// tasks. A final flush runs after the traversal settles so the outputs
    /// reflect the complete ledger even when the seed itself failed.
    pub async fn run(self: Arc<Self>, seed: &str) -> Result<CrawlReport, ScoutError> {
        let seed_url = self.validate_seed(seed)?;
        tracing::info!("Crawling from seed: {}", seed_url);

        Arc::clone(&self).process_page(seed_url).await;

        if let Err(e) = self.sink.flush(&self.ledger.snapshot()) {
            tracing::error!("Final flush failed: {}", e);
        }

        let report = CrawlReport {
            urls_seen: self.ledger.seen_count(),
            assets_found: self.ledger.asset_count(),
        };
        tracing::info!(
            "Crawl complete: {} URLs seen, {} assets found",
            report.urls_seen,
            report.assets_found
        );

        Ok(report)
    }

    /// Processes one page URL, recursing concurrently over its links
    ///
    /// The future is boxed because the function is recursive: each child
    /// page spawns this same future through the `JoinSet`, and the parent
    /// joins every child before it completes.
    fn process_page(self: Arc<Self>, url: Url) -> BoxFuture<'static, ()> {
        Box::pin(async move {
            if !self.ledger.mark_seen(url.as_str()) {
                // Another task already owns this URL
                return;
            }

            // Idempotent re-check before touching the network
            let in_scope = url
                .host_str()
                .map(|host| host_allowed(host, &self.config.scope.allowed_hosts))
                .unwrap_or(false);
            if !in_scope {
                tracing::warn!("Host not allowed: {}", url);
                self.ledger.mark_terminal(url.as_str(), CrawlState::Failed);
                return;
            }

            tracing::info!("Crawling: {}", url);

            let fetched = {
                let Ok(_permit) = Arc::clone(&self.fetch_permits).acquire_owned().await else {
                    // Semaphore closed means the engine is shutting down
                    self.ledger.mark_terminal(url.as_str(), CrawlState::Failed);
                    return;
                };
                fetch_page(&self.client, url.as_str()).await
            };

            let (final_url, body) = match fetched {
                FetchResult::Success {
                    final_url,
                    status_code,
                    body,
                } => {
                    tracing::debug!("Fetched {} ({})", url, status_code);
                    (final_url, body)
                }
                FetchResult::HttpError { status_code } => {
                    tracing::warn!("HTTP {} for {}", status_code, url);
                    self.ledger.mark_terminal(url.as_str(), CrawlState::Failed);
                    return;
                }
                FetchResult::TransportError { error } => {
                    tracing::warn!("Failed to fetch {}: {}", url, error);
                    self.ledger.mark_terminal(url.as_str(), CrawlState::Failed);
                    return;
                }
            };

            // Redirects may have moved the page; links resolve against where
            // the content actually lives, and the final host must still be
            // in scope
            let base = Url::parse(&final_url).unwrap_or_else(|_| url.clone());
            let final_in_scope = base
                .host_str()
                .map(|host| host_allowed(host, &self.config.scope.allowed_hosts))
                .unwrap_or(false);
            if !final_in_scope {
                tracing::warn!("Redirected out of scope: {} -> {}", url, base);
                self.ledger.mark_terminal(url.as_str(), CrawlState::Failed);
                return;
            }

            let links = extract_links(
                &body,
                &base,
                &self.config.scope.allowed_hosts,
                &self.ledger,
            );

            let mut children = JoinSet::new();

            for link in links {
                if classify_url(&link).is_asset() {
                    // Assets are recorded without a fetch; the mark_seen
                    // claim keeps the asset list duplicate-free
                    if self.ledger.mark_seen(link.as_str()) {
                        tracing::info!("Found asset: {}", link);
                        self.ledger.record_asset(link.as_str());
                        self.ledger
                            .mark_terminal(link.as_str(), CrawlState::CrawledAsset);
                    }
                } else {
                    children.spawn(Arc::clone(&self).process_page(link));
                }
            }

            // Structured join: this page is not done until every child is
            while let Some(joined) = children.join_next().await {
                if let Err(e) = joined {
                    tracing::error!("Crawl task panicked: {}", e);
                }
            }

            self.ledger
                .mark_terminal(url.as_str(), CrawlState::CrawledPage);

            if let Err(e) = self.sink.flush(&self.ledger.snapshot()) {
                tracing::error!("Failed to persist crawl state: {}", e);
            }
        })
    }
}

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl: it builds the engine
/// from configuration, validates the seed, and walks the reachable link
/// graph.
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The seed URL string
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Crawl completed; per-page failures do not surface here
/// * `Err(ScoutError)` - Configuration or seed validation failed
pub async fn crawl(config: Config, seed: &str) -> Result<CrawlReport, ScoutError> {
    let engine = Arc::new(CrawlEngine::new(config)?);
    engine.run(seed).await
}
