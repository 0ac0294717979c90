//! Threat-intelligence API source.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use super::{endpoint, fetch_text, DiscoveryError, SubdomainDiscoverer};

const NAME: &str = "threat-intel";

#[derive(Debug, Deserialize)]
struct DomainReport {
    response_code: Option<String>,
    subdomains: Option<Vec<String>>,
}

/// Parses a domain report body into the set of reported subdomains.
///
/// The API answers `{"response_code": "0"}` without a `subdomains` field
/// when it knows nothing about the domain; that is an empty result. Any
/// other body without a `subdomains` array is malformed.
pub fn parse_threat_intel(body: &str) -> Result<BTreeSet<String>, DiscoveryError> {
    let report: DomainReport =
        serde_json::from_str(body).map_err(|e| DiscoveryError::Malformed {
            origin: NAME,
            reason: e.to_string(),
        })?;

    match report.subdomains {
        Some(subdomains) => Ok(subdomains
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()),
        None if report.response_code.as_deref() == Some("0") => Ok(BTreeSet::new()),
        None => Err(DiscoveryError::Malformed {
            origin: NAME,
            reason: "report has no subdomains field".to_string(),
        }),
    }
}

/// Historically observed subdomains from a threat-intelligence API.
pub struct ThreatIntelSource {
    client: Arc<reqwest::Client>,
    base_url: String,
}

impl ThreatIntelSource {
    /// Queries the API at `base_url` using the shared `client`.
    pub fn new(client: Arc<reqwest::Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SubdomainDiscoverer for ThreatIntelSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn discover(&self, domain: &str) -> Result<BTreeSet<String>, DiscoveryError> {
        let url = url::Url::parse_with_params(
            &endpoint(&self.base_url, "searchApi/v2/domain/report/"),
            &[("domain", domain)],
        )?;
        let body = fetch_text(&self.client, url).await?;
        parse_threat_intel(&body)
    }
}
