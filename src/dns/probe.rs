//! DNS probe trait and the hickory-backed implementation.

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::TokioAsyncResolver;
use thiserror::Error;

/// Failure of a single DNS query.
///
/// Failures are terminal per call: no retries happen above the resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsFailure {
    /// The name does not exist.
    #[error("no such domain")]
    NxDomain,
    /// The name exists but has no record of the requested type.
    #[error("no answer")]
    NoAnswer,
    /// None of the nameservers could answer (SERVFAIL, REFUSED, unreachable).
    #[error("no nameservers available")]
    NoNameservers,
    /// Timeouts, I/O and protocol errors.
    #[error("DNS error: {0}")]
    Other(String),
}

impl From<ResolveError> for DnsFailure {
    fn from(err: ResolveError) -> Self {
        match err.kind() {
            ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
                ResponseCode::NXDomain => DnsFailure::NxDomain,
                ResponseCode::ServFail | ResponseCode::Refused => DnsFailure::NoNameservers,
                _ => DnsFailure::NoAnswer,
            },
            ResolveErrorKind::NoConnections => DnsFailure::NoNameservers,
            _ => DnsFailure::Other(err.to_string()),
        }
    }
}

/// DNS lookups needed by the mail server search.
#[async_trait]
pub trait DnsProbe: Send + Sync {
    /// Resolves an A record for `name`, returning the first address.
    async fn resolve_a(&self, name: &str) -> Result<IpAddr, DnsFailure>;

    /// Looks up MX records for `name`, returning the exchange hostnames
    /// ordered by preference.
    async fn resolve_mx(&self, name: &str) -> Result<Vec<String>, DnsFailure>;
}

/// [`DnsProbe`] backed by a shared hickory resolver.
pub struct ResolverProbe {
    resolver: TokioAsyncResolver,
}

impl ResolverProbe {
    /// Wraps a resolver built by [`init_resolver`](crate::initialization::init_resolver).
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsProbe for ResolverProbe {
    async fn resolve_a(&self, name: &str) -> Result<IpAddr, DnsFailure> {
        // The resolver is configured Ipv4Only, so this is an A query
        let response = self.resolver.lookup_ip(name).await?;
        response.iter().next().ok_or(DnsFailure::NoAnswer)
    }

    async fn resolve_mx(&self, name: &str) -> Result<Vec<String>, DnsFailure> {
        let lookup = self.resolver.mx_lookup(name).await?;
        let mut records: Vec<(u16, String)> = lookup
            .iter()
            .map(|mx| (mx.preference(), mx.exchange().to_utf8()))
            .collect();
        // Lower preference = higher priority
        records.sort_by_key(|(preference, _)| *preference);
        Ok(records.into_iter().map(|(_, host)| host).collect())
    }
}
