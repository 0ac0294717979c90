//! Error handling and search statistics.
//!
//! This module provides:
//! - Error type definitions for initialization and seed loading
//! - Search outcome statistics (one counter per outcome type)
//!
//! DNS and discovery failures are not listed here: they are recovered where
//! they happen (see `dns::DnsFailure` and `discovery::DiscoveryError`) and
//! only show up in the outcome counters.

mod stats;
mod types;

// Re-export public API
pub use stats::SearchStats;
pub use types::{InitializationError, OutcomeType, SeedError};
