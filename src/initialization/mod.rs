//! Application initialization and resource setup.
//!
//! This module provides functions to initialize all shared resources:
//! - Logger
//! - HTTP client for the discovery sources
//! - DNS resolver
//! - The configured discovery sources

mod client;
mod logger;
mod resolver;

use std::sync::Arc;

use crate::config::{Config, DiscoverySource};
use crate::discovery::{
    CertTransparencySource, ReputationSource, SubdomainDiscoverer, ThreatIntelSource,
};

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;
pub use resolver::init_resolver;

/// Builds the discovery sources enabled in `config`, in configured order.
///
/// A source listed twice is only queried once.
pub fn init_discoverers(
    config: &Config,
    client: &Arc<reqwest::Client>,
) -> Vec<Arc<dyn SubdomainDiscoverer>> {
    let mut seen = Vec::with_capacity(config.sources.len());
    let mut discoverers: Vec<Arc<dyn SubdomainDiscoverer>> = Vec::new();
    for source in &config.sources {
        if seen.contains(source) {
            continue;
        }
        seen.push(*source);
        let client = Arc::clone(client);
        let discoverer: Arc<dyn SubdomainDiscoverer> = match source {
            DiscoverySource::ThreatIntel => Arc::new(ThreatIntelSource::new(
                client,
                config.threat_intel_url.clone(),
            )),
            DiscoverySource::CertTransparency => Arc::new(CertTransparencySource::new(
                client,
                config.cert_transparency_url.clone(),
            )),
            DiscoverySource::Reputation => Arc::new(ReputationSource::new(
                client,
                config.reputation_url.clone(),
            )),
        };
        discoverers.push(discoverer);
    }
    discoverers
}
