//! Subdomain discovery sources.
//!
//! Each source queries one external service and reports the hostnames it
//! has observed under a domain:
//! - [`ThreatIntelSource`]: threat-intelligence API (JSON)
//! - [`CertTransparencySource`]: certificate-transparency search (HTML)
//! - [`ReputationSource`]: domain reputation page (HTML)
//!
//! The search only depends on the [`SubdomainDiscoverer`] trait. A failing
//! source never aborts anything: callers log the error and move on.
//! Response parsing lives in plain functions so it can be tested on
//! fixtures without a network.

mod cert_transparency;
mod reputation;
mod threat_intel;

use std::collections::BTreeSet;

use async_trait::async_trait;
use scraper::Selector;
use thiserror::Error;

pub use cert_transparency::{parse_cert_transparency, CertTransparencySource};
pub use reputation::{parse_reputation, ReputationSource};
pub use threat_intel::{parse_threat_intel, ThreatIntelSource};

/// Failure of one discovery source for one domain.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Connection, timeout or non-success HTTP status.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The source URL could not be built.
    #[error("invalid source URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response did not have the expected shape.
    #[error("malformed response from {origin}: {reason}")]
    Malformed {
        /// Name of the source that produced the response
        origin: &'static str,
        /// What was wrong with it
        reason: String,
    },
}

/// A source of subdomain names for a given domain.
#[async_trait]
pub trait SubdomainDiscoverer: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Returns the subdomain names the source knows for `domain`.
    async fn discover(&self, domain: &str) -> Result<BTreeSet<String>, DiscoveryError>;
}

/// GETs `url` and returns the body, treating non-2xx statuses as errors.
async fn fetch_text(client: &reqwest::Client, url: url::Url) -> Result<String, DiscoveryError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}

/// Parses a CSS selector that is a compile-time constant.
///
/// # Panics
///
/// Panics if the selector cannot be parsed (indicates a programming error).
fn static_selector(css: &'static str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| {
        panic!("Failed to parse CSS selector '{css}': {e}. This is a programming error.")
    })
}

/// Joins a base URL and a path, tolerating a trailing slash on the base.
fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
