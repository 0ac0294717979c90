//! DNS resolver initialization.
//!
//! This module provides the function to initialize the DNS resolver pointed
//! at the fixed list of public recursive resolvers.

use std::time::Duration;

use hickory_resolver::config::{
    LookupIpStrategy, NameServerConfigGroup, ResolverConfig, ResolverOpts,
};
use hickory_resolver::TokioAsyncResolver;

use crate::config::{DNS_PORT, DNS_TIMEOUT_SECS, PUBLIC_RESOLVERS};

/// Initializes the DNS resolver used for A and MX lookups.
///
/// Queries go to the public resolvers in [`PUBLIC_RESOLVERS`] (UDP with TCP
/// fallback) instead of the system configuration, so results do not depend on
/// the local network. Address lookups are IPv4-only: an A record is the
/// existence check.
pub fn init_resolver() -> TokioAsyncResolver {
    let name_servers = NameServerConfigGroup::from_ips_clear(PUBLIC_RESOLVERS, DNS_PORT, true);
    let config = ResolverConfig::from_parts(None, Vec::new(), name_servers);

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(DNS_TIMEOUT_SECS);
    opts.ip_strategy = LookupIpStrategy::Ipv4Only;
    // Set ndots to 0 to prevent search domain appending
    opts.ndots = 0;

    TokioAsyncResolver::tokio(config, opts)
}
