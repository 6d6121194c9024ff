use serde::Deserialize;

/// Main configuration structure for Pdf-Scout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub scope: ScopeConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of concurrent page fetches
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Deadline for a single fetch, in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the newline-delimited asset list
    #[serde(rename = "assets-path", default = "default_assets_path")]
    pub assets_path: String,

    /// Path to the JSON ledger snapshot
    #[serde(rename = "ledger-path", default = "default_ledger_path")]
    pub ledger_path: String,
}

fn default_assets_path() -> String {
    "pdf_urls.txt".to_string()
}

fn default_ledger_path() -> String {
    "visited_urls.json".to_string()
}

/// Crawl scope configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    /// Host patterns in scope for crawling; anything else is never fetched.
    /// A `*` segment matches exactly one dot-delimited host segment
    /// (e.g. "*.example.org" covers "www.example.org" but not "example.org").
    #[serde(rename = "allowed-hosts")]
    pub allowed_hosts: Vec<String>,
}
