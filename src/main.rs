//! Pdf-Scout main entry point
//!
//! This is the command-line interface for the Pdf-Scout asset discovery
//! crawler.

use anyhow::Context;
use clap::Parser;
use pdf_scout::config::load_config;
use pdf_scout::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Pdf-Scout: a scoped PDF asset discovery crawler
///
/// Pdf-Scout follows links from a seed page, restricted to the configured
/// host allow-list, and records every reachable PDF document. Discovered
/// asset URLs and the full visited ledger are written to disk after each
/// processed page.
#[derive(Parser, Debug)]
#[command(name = "pdf-scout")]
#[command(version = "1.0.0")]
#[command(about = "A scoped PDF asset discovery crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Seed URL to start crawling from (absolute, http or https)
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and seed and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config, &cli.seed)?;
    } else {
        handle_crawl(config, &cli.seed).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pdf_scout=info,warn"),
            1 => EnvFilter::new("pdf_scout=debug,info"),
            2 => EnvFilter::new("pdf_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and seed, prints the plan
fn handle_dry_run(config: &pdf_scout::config::Config, seed: &str) -> anyhow::Result<()> {
    use pdf_scout::crawler::CrawlEngine;

    println!("=== Pdf-Scout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);

    println!("\nOutput:");
    println!("  Asset list: {}", config.output.assets_path);
    println!("  Ledger: {}", config.output.ledger_path);

    println!("\nAllowed Hosts ({}):", config.scope.allowed_hosts.len());
    for pattern in &config.scope.allowed_hosts {
        println!("  - {}", pattern);
    }

    let engine = CrawlEngine::new(config.clone())?;
    let seed_url = engine.validate_seed(seed).context("invalid seed URL")?;

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {}", seed_url);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: pdf_scout::config::Config, seed: &str) -> anyhow::Result<()> {
    tracing::info!(
        "Allowed hosts: {}, output: {} / {}",
        config.scope.allowed_hosts.len(),
        config.output.assets_path,
        config.output.ledger_path
    );

    match crawl(config, seed).await {
        Ok(report) => {
            tracing::info!(
                "Done: {} URLs seen, {} assets found",
                report.urls_seen,
                report.assets_found
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
