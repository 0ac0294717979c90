//! DNS existence and mail exchanger checks.
//!
//! This module defines the [`DnsProbe`] capability used by domain records:
//! - A-record resolution, used purely as an existence check
//! - MX-record lookup, returning the mail exchange hostnames
//!
//! [`ResolverProbe`] is the production implementation, backed by
//! `hickory-resolver` and a fixed list of public resolvers.

mod probe;

// Re-export public API
pub use probe::{DnsFailure, DnsProbe, ResolverProbe};

#[cfg(test)]
mod tests;
