//! Domain reputation page source.

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use scraper::{Html, Selector};

use super::{endpoint, fetch_text, static_selector, DiscoveryError, SubdomainDiscoverer};

const NAME: &str = "reputation";

static OBSERVED_SUBDOMAINS: LazyLock<Selector> =
    LazyLock::new(|| static_selector("#observed-subdomains"));
static ENTRY: LazyLock<Selector> = LazyLock::new(|| static_selector("div"));
static LINK: LazyLock<Selector> = LazyLock::new(|| static_selector("a"));

/// Extracts the "observed subdomains" section of a reputation page.
///
/// Each entry is a `div` whose first link carries the name. A page without
/// the section is a valid empty result.
pub fn parse_reputation(html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let Some(section) = document.select(&OBSERVED_SUBDOMAINS).next() else {
        return BTreeSet::new();
    };

    section
        .select(&ENTRY)
        .filter_map(|entry| entry.select(&LINK).next())
        .map(|link| link.text().collect::<String>().trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Observed subdomains listed on a domain reputation page.
pub struct ReputationSource {
    client: Arc<reqwest::Client>,
    base_url: String,
}

impl ReputationSource {
    /// Scrapes the pages under `base_url` using the shared `client`.
    pub fn new(client: Arc<reqwest::Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SubdomainDiscoverer for ReputationSource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn discover(&self, domain: &str) -> Result<BTreeSet<String>, DiscoveryError> {
        let url = url::Url::parse(&endpoint(
            &self.base_url,
            &format!("en/domain/{domain}/information/"),
        ))?;
        let body = fetch_text(&self.client, url).await?;
        Ok(parse_reputation(&body))
    }
}
