//! Configuration module for Pdf-Scout
//!
//! Configuration comes from a TOML file carrying the crawler limits, the
//! user-agent identity, the output paths, and the host allow-list.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, OutputConfig, ScopeConfig, UserAgentConfig};
pub use validation::validate;
