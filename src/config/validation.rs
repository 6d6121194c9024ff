use crate::config::types::Config;
use crate::ConfigError;

/// Validates a parsed configuration
///
/// Checks, in order:
/// 1. The concurrency ceiling is at least 1
/// 2. The fetch timeout is non-zero
/// 3. Output paths are non-empty
/// 4. The allow-list is non-empty and every pattern is well-formed
///
/// # Arguments
///
/// * `config` - The configuration to validate
///
/// # Returns
///
/// * `Ok(())` - Configuration is valid
/// * `Err(ConfigError)` - The first problem found
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.crawler.max_concurrent_fetches == 0 {
        return Err(ConfigError::Validation(
            "max-concurrent-fetches must be at least 1".to_string(),
        ));
    }

    if config.crawler.fetch_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "fetch-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.output.assets_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "assets-path must not be empty".to_string(),
        ));
    }

    if config.output.ledger_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "ledger-path must not be empty".to_string(),
        ));
    }

    if config.scope.allowed_hosts.is_empty() {
        return Err(ConfigError::Validation(
            "allowed-hosts must contain at least one pattern".to_string(),
        ));
    }

    for pattern in &config.scope.allowed_hosts {
        validate_host_pattern(pattern)?;
    }

    Ok(())
}

/// Validates a single host pattern
///
/// A pattern is a dot-separated list of segments where each segment is
/// either `*` or a non-empty literal. Schemes, paths, and ports do not
/// belong in a pattern.
fn validate_host_pattern(pattern: &str) -> Result<(), ConfigError> {
    if pattern.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "empty pattern".to_string(),
        ));
    }

    if pattern.contains("://") || pattern.contains('/') {
        return Err(ConfigError::InvalidPattern(format!(
            "{} (patterns are bare hostnames, not URLs)",
            pattern
        )));
    }

    if pattern.contains(':') {
        return Err(ConfigError::InvalidPattern(format!(
            "{} (patterns must not carry a port)",
            pattern
        )));
    }

    for segment in pattern.split('.') {
        if segment.is_empty() {
            return Err(ConfigError::InvalidPattern(format!(
                "{} (empty dot segment)",
                pattern
            )));
        }
        if segment.contains('*') && segment != "*" {
            return Err(ConfigError::InvalidPattern(format!(
                "{} (a wildcard must be a whole segment)",
                pattern
            )));
        }
    }

    Ok(())
}
