//! Shared fakes for unit tests.

use std::collections::{BTreeSet, HashMap};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::discovery::{DiscoveryError, SubdomainDiscoverer};
use crate::dns::{DnsFailure, DnsProbe};

/// Scripted DNS answers with call counters.
///
/// Names without an A entry are NXDOMAIN; names without an MX entry have no
/// answer.
#[derive(Default)]
pub struct FakeProbe {
    a_records: HashMap<String, Result<IpAddr, DnsFailure>>,
    mx_records: HashMap<String, Result<Vec<String>, DnsFailure>>,
    cancel_on_a: Option<(String, CancellationToken)>,
    pub a_calls: AtomicUsize,
    pub mx_calls: AtomicUsize,
    mx_queried: Mutex<Vec<String>>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn valid(mut self, name: &str) -> Self {
        self.a_records
            .insert(name.to_string(), Ok(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1))));
        self
    }

    pub fn a_failure(mut self, name: &str, failure: DnsFailure) -> Self {
        self.a_records.insert(name.to_string(), Err(failure));
        self
    }

    pub fn mx(mut self, name: &str, hosts: &[&str]) -> Self {
        self.mx_records.insert(
            name.to_string(),
            Ok(hosts.iter().map(|h| h.to_string()).collect()),
        );
        self
    }

    pub fn mx_failure(mut self, name: &str, failure: DnsFailure) -> Self {
        self.mx_records.insert(name.to_string(), Err(failure));
        self
    }

    /// Cancels `token` when `name` is resolved, then never answers.
    pub fn cancel_on_resolve(mut self, name: &str, token: CancellationToken) -> Self {
        self.cancel_on_a = Some((name.to_string(), token));
        self
    }

    pub fn a_call_count(&self) -> usize {
        self.a_calls.load(Ordering::SeqCst)
    }

    pub fn mx_call_count(&self) -> usize {
        self.mx_calls.load(Ordering::SeqCst)
    }

    pub fn mx_queried(&self) -> Vec<String> {
        self.mx_queried.lock().expect("mutex poisoned").clone()
    }
}

#[async_trait]
impl DnsProbe for FakeProbe {
    async fn resolve_a(&self, name: &str) -> Result<IpAddr, DnsFailure> {
        self.a_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((trigger, token)) = &self.cancel_on_a {
            if trigger == name {
                token.cancel();
                return futures::future::pending().await;
            }
        }
        self.a_records
            .get(name)
            .cloned()
            .unwrap_or(Err(DnsFailure::NxDomain))
    }

    async fn resolve_mx(&self, name: &str) -> Result<Vec<String>, DnsFailure> {
        self.mx_calls.fetch_add(1, Ordering::SeqCst);
        self.mx_queried
            .lock()
            .expect("mutex poisoned")
            .push(name.to_string());
        self.mx_records
            .get(name)
            .cloned()
            .unwrap_or(Err(DnsFailure::NoAnswer))
    }
}

/// Discovery source answering from a fixed table, or always failing.
pub struct FakeDiscoverer {
    name: &'static str,
    answers: HashMap<String, Vec<String>>,
    failing: bool,
    pub calls: AtomicUsize,
}

impl FakeDiscoverer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            answers: HashMap::new(),
            failing: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            failing: true,
            ..Self::new(name)
        }
    }

    pub fn answer(mut self, domain: &str, subdomains: &[&str]) -> Self {
        self.answers.insert(
            domain.to_string(),
            subdomains.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl SubdomainDiscoverer for FakeDiscoverer {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn discover(&self, domain: &str) -> Result<BTreeSet<String>, DiscoveryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(DiscoveryError::Malformed {
                origin: self.name,
                reason: "scripted failure".to_string(),
            });
        }
        Ok(self
            .answers
            .get(domain)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default())
    }
}

/// Upcasts shared fakes for APIs taking trait objects.
pub fn as_discoverers(fakes: &[Arc<FakeDiscoverer>]) -> Vec<Arc<dyn SubdomainDiscoverer>> {
    fakes
        .iter()
        .map(|fake| Arc::clone(fake) as Arc<dyn SubdomainDiscoverer>)
        .collect()
}
