//! Error type definitions.
//!
//! This module defines the error and outcome types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for seed loading.
///
/// `Empty` is the only fatal condition of a run; the binary maps it to a
/// dedicated exit code.
#[derive(Error, Debug)]
pub enum SeedError {
    /// The seed sequence contained no usable domain.
    #[error("No domains found")]
    Empty,

    /// The remote seed dataset could not be downloaded.
    #[error("Failed to fetch seed dataset: {0}")]
    Fetch(#[from] ReqwestError),

    /// The remote seed dataset is not a GeoJSON feature collection.
    #[error("Failed to parse seed dataset: {0}")]
    Parse(String),
}

/// Per-record outcomes of the mail server search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum OutcomeType {
    /// Record was picked up for checking
    Checked,
    /// No A record (or DNS failure)
    Invalid,
    /// Valid with MX records
    MailServer,
    /// Valid, no MX records, subdomains found and searched
    Expanded,
    /// Valid, no MX records and nothing discovered
    DeadEnd,
    /// Not expanded because the depth limit was reached
    DepthLimited,
    /// Name was already checked earlier in the run
    AlreadyVisited,
    /// Skipped or abandoned because of an interrupt
    Cancelled,
}

impl std::fmt::Display for OutcomeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl OutcomeType {
    /// Human-readable label used in the statistics summary.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeType::Checked => "Domains checked",
            OutcomeType::Invalid => "Not valid (no A record)",
            OutcomeType::MailServer => "Mail servers",
            OutcomeType::Expanded => "Expanded into subdomains",
            OutcomeType::DeadEnd => "No MX and no subdomains",
            OutcomeType::DepthLimited => "Depth limit reached",
            OutcomeType::AlreadyVisited => "Already visited",
            OutcomeType::Cancelled => "Cancelled",
        }
    }
}
