//! Seed domain loading.
//!
//! Seeds come from a line-oriented file (or stdin) or from a GeoJSON dataset
//! whose features carry a website property. Every entry is reduced to a bare
//! hostname before it becomes a [`DomainRecord`].

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::config::{Config, DEFAULT_SEED_URL, MAX_SEED_LENGTH};
use crate::domain::DomainRecord;
use crate::error_handling::SeedError;

/// Reduces a domain or URL to its hostname.
///
/// Adds an `https://` prefix if no scheme is present, then takes the host of
/// the parsed URL (scheme, port, path, query and fragment are dropped).
/// Returns `None` and logs a warning for entries that are too long, not
/// http(s), unparsable, or IP literals.
pub fn extract_hostname(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.len() > MAX_SEED_LENGTH {
        warn!(
            "Skipping seed exceeding maximum length ({} > {}): {}...",
            raw.len(),
            MAX_SEED_LENGTH,
            raw.chars().take(50).collect::<String>()
        );
        return None;
    }

    let normalized = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let parsed = match url::Url::parse(&normalized) {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!("Skipping invalid seed: {raw}");
            return None;
        }
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        warn!("Skipping unsupported scheme for seed: {raw}");
        return None;
    }
    match parsed.host() {
        Some(url::Host::Domain(host)) if !host.is_empty() => Some(host.to_string()),
        Some(url::Host::Ipv4(_) | url::Host::Ipv6(_)) => {
            warn!("Skipping IP address seed: {raw}");
            None
        }
        _ => {
            warn!("Skipping seed without a host: {raw}");
            None
        }
    }
}

/// Wraps seed entries into records, dropping unusable entries and
/// duplicates (by normalized name) while keeping input order.
pub fn seed_records<I, S>(entries: I) -> Vec<Arc<DomainRecord>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter_map(|entry| extract_hostname(entry.as_ref()))
        .map(|host| DomainRecord::new(&host))
        .filter(|record| !record.name().is_empty() && seen.insert(record.name().to_string()))
        .map(Arc::new)
        .collect()
}

/// Reads seed lines, skipping blank lines and `#` comments.
pub async fn read_seed_lines<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<String>> {
    let mut lines = BufReader::new(reader).lines();
    let mut entries = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read seed line")?
    {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        entries.push(trimmed.to_string());
    }
    Ok(entries)
}

/// Reads seed entries from `path`, or from stdin when `path` is `-`.
pub async fn read_seed_file(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        info!("Reading seed domains from stdin");
        return read_seed_lines(tokio::io::stdin()).await;
    }
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open seed file {}", path.display()))?;
    read_seed_lines(file).await
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Extracts the string value of `property` from every feature of a GeoJSON
/// feature collection. Features without it are skipped.
pub fn parse_geojson_seeds(body: &str, property: &str) -> Result<Vec<String>, SeedError> {
    let collection: FeatureCollection =
        serde_json::from_str(body).map_err(|e| SeedError::Parse(e.to_string()))?;
    Ok(collection
        .features
        .iter()
        .filter_map(|feature| feature.properties.as_ref()?.get(property)?.as_str())
        .map(str::to_string)
        .collect())
}

/// Downloads a GeoJSON seed dataset.
pub async fn fetch_seed_dataset(
    client: &reqwest::Client,
    url: &str,
    property: &str,
) -> Result<Vec<String>, SeedError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    parse_geojson_seeds(&body, property)
}

/// Loads the seed records for a run.
///
/// Uses the input file when one is configured, otherwise the GeoJSON
/// dataset at `--seed-url` (or the default dataset).
///
/// # Errors
///
/// Returns [`SeedError::Empty`] when no usable seed remains, and I/O or
/// download errors otherwise.
pub async fn load_seeds(
    config: &Config,
    client: &reqwest::Client,
) -> Result<Vec<Arc<DomainRecord>>> {
    let entries = match &config.file {
        Some(path) => read_seed_file(path).await?,
        None => {
            let url = config.seed_url.as_deref().unwrap_or(DEFAULT_SEED_URL);
            info!("Fetching seed domains from {url}");
            fetch_seed_dataset(client, url, &config.seed_property).await?
        }
    };

    let records = seed_records(entries);
    if records.is_empty() {
        return Err(SeedError::Empty.into());
    }
    info!("Loaded {} seed domain(s)", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_hostname_bare_domain() {
        assert_eq!(
            extract_hostname("example.com"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_hostname_strips_scheme_path_and_query() {
        assert_eq!(
            extract_hostname("https://www.Example.com/about?x=1#top"),
            Some("www.example.com".to_string())
        );
        assert_eq!(
            extract_hostname("http://example.com:8080/path"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_hostname_rejects_ip_addresses() {
        assert_eq!(extract_hostname("http://192.0.2.10/"), None);
        assert_eq!(extract_hostname("[2001:db8::1]"), None);
    }

    #[test]
    fn test_extract_hostname_rejects_unsupported_scheme() {
        assert_eq!(extract_hostname("ftp://example.com/file"), None);
    }

    #[test]
    fn test_extract_hostname_rejects_garbage() {
        assert_eq!(extract_hostname("not a domain at all!!!"), None);
        assert_eq!(extract_hostname(""), None);
    }

    #[test]
    fn test_extract_hostname_rejects_too_long_entry() {
        let long = format!("{}.com", "a".repeat(MAX_SEED_LENGTH));
        assert_eq!(extract_hostname(&long), None);
    }

    #[test]
    fn test_seed_records_normalize_and_dedupe() {
        let records = seed_records([
            "https://www.example.com/",
            "example.com",
            "http://shop.example.org",
            "ftp://bad.example",
        ]);
        let names: Vec<&str> = records.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["example.com", "shop.example.org"]);
    }

    #[tokio::test]
    async fn test_read_seed_lines_skips_comments_and_blanks() {
        let input: &[u8] = b"# Fortune 500\nexample.com\n\n   \nhttps://example.org/\n# end\n";
        let lines = read_seed_lines(input).await.expect("read should succeed");
        assert_eq!(lines, vec!["example.com", "https://example.org/"]);
    }

    #[tokio::test]
    async fn test_read_seed_file_missing_file() {
        let result = read_seed_file(Path::new("/nonexistent/seeds.txt")).await;
        let err = result.expect_err("missing file should fail");
        assert!(format!("{err:#}").contains("Failed to open seed file"));
    }

    #[test]
    fn test_parse_geojson_seeds() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"NAME": "A", "WEBSITE": "http://www.a.example"}},
                {"type": "Feature", "properties": {"NAME": "B"}},
                {"type": "Feature", "properties": null},
                {"type": "Feature", "properties": {"WEBSITE": 42}},
                {"type": "Feature", "properties": {"WEBSITE": "https://b.example/"}}
            ]
        }"#;
        let seeds = parse_geojson_seeds(body, "WEBSITE").expect("dataset should parse");
        assert_eq!(seeds, vec!["http://www.a.example", "https://b.example/"]);
    }

    #[test]
    fn test_parse_geojson_seeds_rejects_non_collection() {
        let result = parse_geojson_seeds(r#"{"error": "not found"}"#, "WEBSITE");
        assert!(matches!(result, Err(SeedError::Parse(_))));
    }

    #[tokio::test]
    async fn test_load_seeds_empty_file_is_seed_error() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "# nothing here").expect("write");
        writeln!(file, "ftp://not-usable.example").expect("write");
        let config = Config {
            file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let client = reqwest::Client::new();

        let err = load_seeds(&config, &client)
            .await
            .expect_err("no usable seeds should fail");
        assert!(matches!(
            err.downcast_ref::<SeedError>(),
            Some(SeedError::Empty)
        ));
    }
}
