//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CERT_TRANSPARENCY_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_OUTPUT_PATH,
    DEFAULT_SEED_PROPERTY, DEFAULT_USER_AGENT, REPUTATION_BASE_URL, THREAT_INTEL_BASE_URL,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// External subdomain discovery sources, in the order they are queried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DiscoverySource {
    /// Threat-intelligence API (historically observed subdomains)
    ThreatIntel,
    /// Certificate-transparency log search
    CertTransparency,
    /// Domain reputation page ("observed subdomains" section)
    Reputation,
}

impl DiscoverySource {
    /// All sources in their default query order.
    pub const ALL: [DiscoverySource; 3] = [
        DiscoverySource::ThreatIntel,
        DiscoverySource::CertTransparency,
        DiscoverySource::Reputation,
    ];
}

/// Application configuration.
///
/// Parsed from the command line by the binary, or constructed
/// programmatically by library users.
///
/// # Examples
///
/// ```no_run
/// use mx_finder::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: Some(PathBuf::from("domains.txt")),
///     max_concurrency: 8,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mx_finder",
    version,
    about = "Expands domains into subdomains and finds the ones that operate mail servers"
)]
pub struct Config {
    /// File to read seed domains or URLs from (one per line, `-` for stdin)
    pub file: Option<PathBuf>,

    /// GeoJSON dataset to read seed websites from (used when no file is given)
    #[arg(long)]
    pub seed_url: Option<String>,

    /// GeoJSON feature property holding the website/domain
    #[arg(long, default_value = DEFAULT_SEED_PROPERTY)]
    pub seed_property: String,

    /// File the confirmed mail servers are appended to
    #[arg(long, short, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Records checked concurrently at each level of the search (1 = sequential)
    #[arg(long, default_value_t = 1)]
    pub max_concurrency: usize,

    /// Stop expanding subdomains below this depth (unbounded when omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Discovery sources to query, in order (comma separated)
    #[arg(long, value_enum, value_delimiter = ',', default_values_t = DiscoverySource::ALL)]
    pub sources: Vec<DiscoverySource>,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Base URL of the threat-intelligence API
    #[arg(long, default_value = THREAT_INTEL_BASE_URL, hide = true)]
    pub threat_intel_url: String,

    /// Base URL of the certificate-transparency search
    #[arg(long, default_value = CERT_TRANSPARENCY_BASE_URL, hide = true)]
    pub cert_transparency_url: String,

    /// Base URL of the reputation site
    #[arg(long, default_value = REPUTATION_BASE_URL, hide = true)]
    pub reputation_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: None,
            seed_url: None,
            seed_property: DEFAULT_SEED_PROPERTY.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_concurrency: 1,
            max_depth: None,
            sources: DiscoverySource::ALL.to_vec(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            threat_intel_url: THREAT_INTEL_BASE_URL.to_string(),
            cert_transparency_url: CERT_TRANSPARENCY_BASE_URL.to_string(),
            reputation_url: REPUTATION_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default_matches_cli_defaults() {
        let parsed = Config::parse_from(["mx_finder"]);
        let default = Config::default();

        assert_eq!(parsed.file, default.file);
        assert_eq!(parsed.seed_url, default.seed_url);
        assert_eq!(parsed.seed_property, default.seed_property);
        assert_eq!(parsed.output, default.output);
        assert_eq!(parsed.max_concurrency, default.max_concurrency);
        assert_eq!(parsed.max_depth, default.max_depth);
        assert_eq!(parsed.sources, default.sources);
        assert_eq!(parsed.timeout_seconds, default.timeout_seconds);
        assert_eq!(parsed.user_agent, default.user_agent);
        assert_eq!(parsed.threat_intel_url, default.threat_intel_url);
        assert_eq!(parsed.cert_transparency_url, default.cert_transparency_url);
        assert_eq!(parsed.reputation_url, default.reputation_url);
    }

    #[test]
    fn test_sources_parse_comma_separated() {
        let config = Config::parse_from([
            "mx_finder",
            "--sources",
            "reputation,threat-intel",
        ]);
        assert_eq!(
            config.sources,
            vec![DiscoverySource::Reputation, DiscoverySource::ThreatIntel]
        );
    }

    #[test]
    fn test_default_sources_order() {
        let config = Config::default();
        assert_eq!(
            config.sources,
            vec![
                DiscoverySource::ThreatIntel,
                DiscoverySource::CertTransparency,
                DiscoverySource::Reputation,
            ]
        );
    }
}
