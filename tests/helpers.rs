// Shared test helpers for integration tests.
//
// Provides a scripted DNS probe and small file/config builders used across
// the integration test files.

use std::collections::HashMap;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use mx_finder::dns::{DnsFailure, DnsProbe};
use mx_finder::{Config, DiscoverySource, LogFormat, LogLevel};
use tempfile::NamedTempFile;

/// DNS probe answering from fixed tables.
///
/// Names without an A entry are NXDOMAIN; names without an MX entry have no
/// answer.
#[derive(Default)]
pub struct StaticProbe {
    a_records: HashMap<String, IpAddr>,
    mx_records: HashMap<String, Vec<String>>,
    pub a_calls: AtomicUsize,
}

#[allow(dead_code)] // Not every test file uses every helper
impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valid(mut self, name: &str) -> Self {
        self.a_records
            .insert(name.to_string(), IpAddr::V4(Ipv4Addr::new(192, 0, 2, 10)));
        self
    }

    pub fn mail_server(self, name: &str, exchange: &str) -> Self {
        let mut probe = self.valid(name);
        probe
            .mx_records
            .insert(name.to_string(), vec![exchange.to_string()]);
        probe
    }

    pub fn a_call_count(&self) -> usize {
        self.a_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsProbe for StaticProbe {
    async fn resolve_a(&self, name: &str) -> Result<IpAddr, DnsFailure> {
        self.a_calls.fetch_add(1, Ordering::SeqCst);
        self.a_records
            .get(name)
            .copied()
            .ok_or(DnsFailure::NxDomain)
    }

    async fn resolve_mx(&self, name: &str) -> Result<Vec<String>, DnsFailure> {
        self.mx_records
            .get(name)
            .cloned()
            .ok_or(DnsFailure::NoAnswer)
    }
}

/// Writes one seed per line to a temporary file.
#[allow(dead_code)]
pub fn write_seeds_to_file(seeds: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    for seed in seeds {
        writeln!(file, "{}", seed).expect("Failed to write seed");
    }
    file.flush().expect("Failed to flush file");
    file
}

/// Basic config for tests: quiet logging, only the threat-intel source.
#[allow(dead_code)]
pub fn create_test_config(file: Option<PathBuf>, output: PathBuf) -> Config {
    Config {
        file,
        output,
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        sources: vec![DiscoverySource::ThreatIntel],
        timeout_seconds: 5,
        user_agent: "mx_finder_test/1.0".to_string(),
        ..Default::default()
    }
}
