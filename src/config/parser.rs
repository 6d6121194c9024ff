use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use pdf_scout::config::load_config;
///
/// let config = load_config(Path::new("crawl.toml")).unwrap();
/// println!("Allowed hosts: {:?}", config.scope.allowed_hosts);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
max-concurrent-fetches = 8
fetch-timeout-secs = 15

[user-agent]
crawler-name = "TestScout"
crawler-version = "1.0"
contact-url = "https://example.org/about"

[output]
assets-path = "./pdf_urls.txt"
ledger-path = "./visited_urls.json"

[scope]
allowed-hosts = ["example.org", "*.example.org"]
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_concurrent_fetches, 8);
        assert_eq!(config.crawler.fetch_timeout_secs, 15);
        assert_eq!(config.user_agent.crawler_name, "TestScout");
        assert_eq!(config.scope.allowed_hosts.len(), 2);
    }

    #[test]
    fn test_default_output_paths() {
        let config_content = r#"
[crawler]
max-concurrent-fetches = 8

[user-agent]
crawler-name = "TestScout"
crawler-version = "1.0"
contact-url = "https://example.org/about"

[output]

[scope]
allowed-hosts = ["example.org"]
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.output.assets_path, "pdf_urls.txt");
        assert_eq!(config.output.ledger_path, "visited_urls.json");
        assert_eq!(config.crawler.fetch_timeout_secs, 30);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config(Path::new("/nonexistent/crawl.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_malformed_toml() {
        let file = create_temp_config("this is not [valid toml");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let config_content = r#"
[crawler]
max-concurrent-fetches = 0

[user-agent]
crawler-name = "TestScout"
crawler-version = "1.0"
contact-url = "https://example.org/about"

[output]

[scope]
allowed-hosts = ["example.org"]
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
