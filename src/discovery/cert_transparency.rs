//! Certificate-transparency log search source.

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use scraper::{Html, Selector};

use super::{endpoint, fetch_text, static_selector, DiscoveryError, SubdomainDiscoverer};

const NAME: &str = "cert-transparency";
/// Column of the results table holding the certificate common name.
const COMMON_NAME_COLUMN: usize = 4;

static ITALIC: LazyLock<Selector> = LazyLock::new(|| static_selector("i"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| static_selector("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| static_selector("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| static_selector("td"));

/// Extracts certificate names from a search results page.
///
/// The page lists results in a table nested in its second table; the fifth
/// cell of each row holds the names (one per line). Wildcard names are
/// skipped. A page with an `<i>` element is the "not found" notice and
/// yields an empty set.
pub fn parse_cert_transparency(html: &str) -> Result<BTreeSet<String>, DiscoveryError> {
    let document = Html::parse_document(html);
    if document.select(&ITALIC).next().is_some() {
        return Ok(BTreeSet::new());
    }

    let malformed = |reason: &str| DiscoveryError::Malformed {
        origin: NAME,
        reason: reason.to_string(),
    };
    let outer = document
        .select(&TABLE)
        .nth(1)
        .ok_or_else(|| malformed("results table not found"))?;
    let results = outer
        .select(&TABLE)
        .next()
        .ok_or_else(|| malformed("certificate table not found"))?;

    let mut names = BTreeSet::new();
    for row in results.select(&ROW) {
        let Some(cell) = row.select(&CELL).nth(COMMON_NAME_COLUMN) else {
            continue;
        };
        names.extend(
            cell.text()
                .map(str::trim)
                .filter(|name| !name.is_empty() && !name.contains('*'))
                .map(str::to_string),
        );
    }
    Ok(names)
}

/// Names from certificates issued to `*.{domain}`.
pub struct CertTransparencySource {
    client: Arc<reqwest::Client>,
    base_url: String,
}

impl CertTransparencySource {
    /// Queries the search at `base_url` using the shared `client`.
    pub fn new(client: Arc<reqwest::Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SubdomainDiscoverer for CertTransparencySource {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn discover(&self, domain: &str) -> Result<BTreeSet<String>, DiscoveryError> {
        let url = url::Url::parse_with_params(
            &endpoint(&self.base_url, "/"),
            &[("q", format!("%.{domain}"))],
        )?;
        let body = fetch_text(&self.client, url).await?;
        parse_cert_transparency(&body)
    }
}
