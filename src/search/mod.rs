//! Recursive mail server search.
//!
//! The search walks an implicit graph whose nodes are domain names and whose
//! edges are "is a subdomain / MX target of". For every record of a level:
//!
//! 1. no A record: terminal
//! 2. MX records: a confirmed mail server, terminal
//! 3. otherwise: discover subdomains and search them as the next level
//!
//! Failures are isolated per record. A [`CancellationToken`] stops the walk
//! early; the mail servers confirmed up to that point are still returned.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::discovery::SubdomainDiscoverer;
use crate::dns::DnsProbe;
use crate::domain::{DomainRecord, DomainSet};
use crate::error_handling::{OutcomeType, SearchStats};

/// Tuning knobs of the search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Records of one level checked concurrently (1 = strictly sequential).
    pub max_concurrency: usize,
    /// Records at this depth (seeds are depth 0) are not expanded further.
    pub max_depth: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_concurrency: 1,
            max_depth: None,
        }
    }
}

/// Names already picked up during one search run.
type Visited = Mutex<HashSet<String>>;

/// Finds the mail servers among a set of domains and their subdomains.
pub struct MailServerSearch {
    probe: Arc<dyn DnsProbe>,
    discoverers: Vec<Arc<dyn SubdomainDiscoverer>>,
    options: SearchOptions,
    stats: Arc<SearchStats>,
}

impl MailServerSearch {
    /// Creates a search over `probe` and `discoverers`, queried in order.
    pub fn new(
        probe: Arc<dyn DnsProbe>,
        discoverers: Vec<Arc<dyn SubdomainDiscoverer>>,
        options: SearchOptions,
    ) -> Self {
        Self {
            probe,
            discoverers,
            options,
            stats: Arc::new(SearchStats::new()),
        }
    }

    /// Outcome counters, shared with the caller for reporting.
    pub fn stats(&self) -> Arc<SearchStats> {
        Arc::clone(&self.stats)
    }

    /// Searches `seeds` and everything discovered below them.
    ///
    /// Returns the confirmed mail servers. When `cancel` fires, in-flight
    /// lookups are dropped and the servers confirmed so far are returned.
    pub async fn search(
        &self,
        seeds: impl IntoIterator<Item = Arc<DomainRecord>>,
        cancel: &CancellationToken,
    ) -> DomainSet {
        let visited = Visited::default();
        let seeds: Vec<Arc<DomainRecord>> = seeds.into_iter().collect();
        self.search_level(seeds, 0, &visited, cancel).await
    }

    fn search_level<'a>(
        &'a self,
        records: Vec<Arc<DomainRecord>>,
        depth: usize,
        visited: &'a Visited,
        cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, DomainSet> {
        async move {
            let mut found = DomainSet::new();
            let mut outcomes = stream::iter(records)
                .map(|record| self.visit(record, depth, visited, cancel))
                .buffer_unordered(self.options.max_concurrency.max(1));
            while let Some(partial) = outcomes.next().await {
                found.extend(partial);
            }
            found
        }
        .boxed()
    }

    async fn visit(
        &self,
        record: Arc<DomainRecord>,
        depth: usize,
        visited: &Visited,
        cancel: &CancellationToken,
    ) -> DomainSet {
        if cancel.is_cancelled() {
            self.stats.increment(OutcomeType::Cancelled);
            return DomainSet::new();
        }
        let first_visit = visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.name().to_string());
        if !first_visit {
            debug!("{record} was already checked in this run");
            self.stats.increment(OutcomeType::AlreadyVisited);
            return DomainSet::new();
        }

        info!("Checking {record}...");
        self.stats.increment(OutcomeType::Checked);

        let Some(valid) = self
            .until_cancelled(cancel, record.check_validity(self.probe.as_ref()))
            .await
        else {
            return DomainSet::new();
        };
        if !valid {
            info!("{record} is not valid");
            self.stats.increment(OutcomeType::Invalid);
            return DomainSet::new();
        }

        let Some(is_mail_server) = self
            .until_cancelled(cancel, record.check_mail_server(self.probe.as_ref()))
            .await
        else {
            return DomainSet::new();
        };
        if is_mail_server {
            info!("{record} is a valid mail server");
            self.stats.increment(OutcomeType::MailServer);
            return DomainSet::from([record]);
        }

        if self.options.max_depth.is_some_and(|max| depth >= max) {
            debug!("Not expanding {record}: depth limit reached");
            self.stats.increment(OutcomeType::DepthLimited);
            return DomainSet::new();
        }

        info!("Searching {record} for subdomains...");
        let Some(subdomains) = self
            .until_cancelled(cancel, record.find_subdomains(&self.discoverers))
            .await
        else {
            return DomainSet::new();
        };
        if subdomains.is_empty() {
            self.stats.increment(OutcomeType::DeadEnd);
            return DomainSet::new();
        }

        debug!("{record}: {} subdomain(s) to check", subdomains.len());
        self.stats.increment(OutcomeType::Expanded);
        self.search_level(subdomains.into_iter().collect(), depth + 1, visited, cancel)
            .await
    }

    /// Runs `work` unless `cancel` fires first, in which case the work is
    /// dropped and `None` returned.
    async fn until_cancelled<F: Future>(
        &self,
        cancel: &CancellationToken,
        work: F,
    ) -> Option<F::Output> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                self.stats.increment(OutcomeType::Cancelled);
                None
            }
            output = work => Some(output),
        }
    }
}
