//! Domain records and their cached DNS/discovery state.
//!
//! A [`DomainRecord`] is identified by its normalized name. Everything else
//! it carries is a lazily filled cache:
//! - validity (A record), computed at most once
//! - mail server status (MX records), computed at most once
//! - discovered subdomains, filled by MX targets and by the discovery sources
//!
//! Records are shared as `Arc<DomainRecord>`; the caches are set-once cells
//! so concurrent checks of the same record never query DNS twice.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, warn};
use tokio::sync::OnceCell;

use crate::discovery::SubdomainDiscoverer;
use crate::dns::{DnsFailure, DnsProbe};

/// Set of records, unique by normalized name and ordered by it.
pub type DomainSet = BTreeSet<Arc<DomainRecord>>;

/// Cached result of the A-record existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Not checked yet
    Unknown,
    /// The name resolves to an address
    Valid,
    /// NXDOMAIN, no answer, or a failed lookup
    Invalid,
}

/// Cached result of the MX lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MailServerStatus {
    /// Not checked yet
    Unknown,
    /// The name publishes MX records
    IsMailServer,
    /// No usable MX records
    NotMailServer,
}

/// Normalizes a hostname: lowercase, no leading `www.` label, no trailing
/// root dot or surrounding whitespace.
///
/// Idempotent: `normalize(&normalize(x)) == normalize(x)`.
///
/// # Examples
///
/// ```
/// use mx_finder::normalize;
///
/// assert_eq!(normalize("WWW.Example.com"), "example.com");
/// assert_eq!(normalize("mx1.example.com."), "mx1.example.com");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut name = raw
        .trim_start()
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .to_lowercase();
    while let Some(rest) = name.strip_prefix("www.") {
        name = rest.trim_start().to_string();
    }
    name
}

/// One hostname and its cached validation/discovery state.
pub struct DomainRecord {
    name: String,
    validity: OnceCell<Validity>,
    mail_server: OnceCell<MailServerStatus>,
    subdomains: Mutex<DomainSet>,
    discovery: OnceCell<()>,
}

impl DomainRecord {
    /// Creates a record for `raw`, normalizing the name once.
    pub fn new(raw: &str) -> Self {
        Self {
            name: normalize(raw),
            validity: OnceCell::new(),
            mail_server: OnceCell::new(),
            subdomains: Mutex::new(DomainSet::new()),
            discovery: OnceCell::new(),
        }
    }

    /// The normalized hostname.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cached validity, `Unknown` until [`check_validity`](Self::check_validity) ran.
    pub fn validity(&self) -> Validity {
        self.validity.get().copied().unwrap_or(Validity::Unknown)
    }

    /// Cached mail server status.
    pub fn mail_server_status(&self) -> MailServerStatus {
        self.mail_server
            .get()
            .copied()
            .unwrap_or(MailServerStatus::Unknown)
    }

    /// Snapshot of the subdomains discovered so far.
    pub fn subdomains(&self) -> DomainSet {
        self.lock_subdomains().clone()
    }

    /// Checks whether the name has an A record.
    ///
    /// The first call queries `probe`; later calls return the cached answer.
    /// DNS failures of any kind count as invalid and are never propagated.
    pub async fn check_validity(&self, probe: &dyn DnsProbe) -> bool {
        let validity = self
            .validity
            .get_or_init(|| async {
                match probe.resolve_a(&self.name).await {
                    Ok(addr) => {
                        debug!("{} resolves to {}", self.name, addr);
                        Validity::Valid
                    }
                    Err(DnsFailure::NxDomain | DnsFailure::NoAnswer) => Validity::Invalid,
                    Err(e) => {
                        warn!("A lookup for {} failed: {}", self.name, e);
                        Validity::Invalid
                    }
                }
            })
            .await;
        *validity == Validity::Valid
    }

    /// Checks whether the name has MX records.
    ///
    /// Any MX answer makes the record a mail server, and the exchange hosts
    /// are merged into the discovered subdomains. Cached like
    /// [`check_validity`](Self::check_validity).
    pub async fn check_mail_server(&self, probe: &dyn DnsProbe) -> bool {
        let status = self
            .mail_server
            .get_or_init(|| async {
                match probe.resolve_mx(&self.name).await {
                    Ok(hosts) => {
                        // The null MX (`.`) normalizes to an empty name and is not merged
                        let added = self
                            .merge_subdomains(hosts.iter().map(|host| DomainRecord::new(host)));
                        debug!("{} has MX records ({} new exchange host(s))", self.name, added);
                        MailServerStatus::IsMailServer
                    }
                    Err(
                        DnsFailure::NxDomain | DnsFailure::NoAnswer | DnsFailure::NoNameservers,
                    ) => MailServerStatus::NotMailServer,
                    Err(e) => {
                        warn!("MX lookup for {} failed: {}", self.name, e);
                        MailServerStatus::NotMailServer
                    }
                }
            })
            .await;
        *status == MailServerStatus::IsMailServer
    }

    /// Returns the subdomains of this record, querying the discovery sources
    /// if none are known yet.
    ///
    /// Sources run in the given order, at most once per record. A failing
    /// source is logged and skipped; the others still contribute.
    pub async fn find_subdomains(&self, discoverers: &[Arc<dyn SubdomainDiscoverer>]) -> DomainSet {
        {
            let cached = self.lock_subdomains();
            if !cached.is_empty() {
                return cached.clone();
            }
        }

        self.discovery
            .get_or_init(|| async {
                for discoverer in discoverers {
                    match discoverer.discover(&self.name).await {
                        Ok(names) => {
                            let added = self
                                .merge_subdomains(names.iter().map(|name| DomainRecord::new(name)));
                            debug!(
                                "{} reported {} new subdomain(s) of {}",
                                discoverer.name(),
                                added,
                                self.name
                            );
                        }
                        Err(e) => warn!(
                            "Subdomain source {} failed for {}: {}",
                            discoverer.name(),
                            self.name,
                            e
                        ),
                    }
                }
            })
            .await;

        self.subdomains()
    }

    /// Adds records to the discovered set, ignoring empty names and the
    /// record's own name. Returns how many were new.
    fn merge_subdomains(&self, records: impl IntoIterator<Item = DomainRecord>) -> usize {
        let mut subdomains = self.lock_subdomains();
        let mut added = 0;
        for record in records {
            if record.name.is_empty() || record.name == self.name {
                continue;
            }
            if subdomains.insert(Arc::new(record)) {
                added += 1;
            }
        }
        added
    }

    fn lock_subdomains(&self) -> MutexGuard<'_, DomainSet> {
        self.subdomains
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for DomainRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for DomainRecord {}

impl PartialOrd for DomainRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DomainRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl Hash for DomainRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for DomainRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for DomainRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainRecord")
            .field("name", &self.name)
            .field("validity", &self.validity())
            .field("mail_server", &self.mail_server_status())
            .finish_non_exhaustive()
    }
}
