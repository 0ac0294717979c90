//! mx_finder library: finds the mail servers among a set of domains.
//!
//! Starting from seed domains, the search checks every name for an A record
//! and MX records. Names that exist but receive no mail are expanded into
//! their subdomains using external discovery sources (threat intelligence,
//! certificate transparency, domain reputation), and the subdomains are
//! searched the same way.
//!
//! # Example
//!
//! ```no_run
//! use mx_finder::{run_search, CancellationToken, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: Some(std::path::PathBuf::from("domains.txt")),
//!     max_concurrency: 8,
//!     ..Default::default()
//! };
//!
//! let report = run_search(config, CancellationToken::new()).await?;
//! println!("Found {} mail servers", report.mail_servers.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

#![warn(missing_docs)]

mod app;
pub mod config;
pub mod discovery;
pub mod dns;
mod domain;
mod error_handling;
pub mod initialization;
mod search;

#[cfg(test)]
mod test_helpers;

// Re-export public API
pub use app::{shutdown_gracefully, spawn_interrupt_listener};
pub use config::{Config, DiscoverySource, LogFormat, LogLevel};
pub use domain::{normalize, DomainRecord, DomainSet, MailServerStatus, Validity};
pub use error_handling::{InitializationError, OutcomeType, SearchStats, SeedError};
pub use run::{run_search, run_search_with, SearchReport};
pub use search::{MailServerSearch, SearchOptions};
pub use tokio_util::sync::CancellationToken;

// Internal run module (contains the driver logic)
mod run {
    use std::path::PathBuf;
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use log::info;
    use tokio_util::sync::CancellationToken;

    use crate::app::{
        append_mail_servers, load_seeds, print_search_statistics, print_simple_summary,
    };
    use crate::config::Config;
    use crate::discovery::SubdomainDiscoverer;
    use crate::dns::{DnsProbe, ResolverProbe};
    use crate::initialization::{init_client, init_discoverers, init_resolver};
    use crate::search::{MailServerSearch, SearchOptions};

    /// Results of a search run.
    #[derive(Debug, Clone)]
    pub struct SearchReport {
        /// Number of seed domains searched
        pub seeds: usize,
        /// Confirmed mail servers, sorted by name
        pub mail_servers: Vec<String>,
        /// File the mail servers were appended to
        pub output: PathBuf,
        /// Whether the run was cut short by cancellation
        pub interrupted: bool,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs a search with the provided configuration.
    ///
    /// This is the main entry point for the library. It loads the seed
    /// domains, searches them for mail servers using the public resolvers and
    /// the configured discovery sources, and appends the results to the
    /// output file.
    ///
    /// Cancelling `cancel` stops the search early; the mail servers found up
    /// to that point are still written and reported. A cancel while the seed
    /// domains are still loading ends the run with an empty report.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - No usable seed domain was found ([`SeedError::Empty`](crate::SeedError))
    /// - The seed file or dataset cannot be read
    /// - The HTTP client cannot be initialized
    /// - The output file cannot be written
    pub async fn run_search(config: Config, cancel: CancellationToken) -> Result<SearchReport> {
        let client = init_client(&config).context("Failed to initialize HTTP client")?;
        let probe: Arc<dyn DnsProbe> = Arc::new(ResolverProbe::new(init_resolver()));
        let discoverers = init_discoverers(&config, &client);
        run_search_with(&config, &client, probe, discoverers, cancel).await
    }

    /// Runs a search with explicit DNS and discovery collaborators.
    ///
    /// `client` is only used to download the seed dataset when no seed file
    /// is configured.
    pub async fn run_search_with(
        config: &Config,
        client: &reqwest::Client,
        probe: Arc<dyn DnsProbe>,
        discoverers: Vec<Arc<dyn SubdomainDiscoverer>>,
        cancel: CancellationToken,
    ) -> Result<SearchReport> {
        let seeds = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!("Interrupted while loading seed domains, nothing to search");
                return Ok(SearchReport {
                    seeds: 0,
                    mail_servers: Vec::new(),
                    output: config.output.clone(),
                    interrupted: true,
                    elapsed_seconds: 0.0,
                });
            }
            seeds = load_seeds(config, client) => seeds?,
        };
        let seed_count = seeds.len();

        let source_names: Vec<&str> = discoverers.iter().map(|d| d.name()).collect();
        if source_names.is_empty() {
            info!("No discovery sources enabled, only seed domains will be checked");
        } else {
            info!("Discovery sources: {}", source_names.join(", "));
        }

        let search = MailServerSearch::new(
            probe,
            discoverers,
            SearchOptions {
                max_concurrency: config.max_concurrency,
                max_depth: config.max_depth,
            },
        );

        let start_time = std::time::Instant::now();
        let mail_servers = search.search(seeds, &cancel).await;
        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        let interrupted = cancel.is_cancelled();
        if interrupted {
            info!(
                "Search interrupted, keeping {} mail server(s) found so far",
                mail_servers.len()
            );
        }

        append_mail_servers(&config.output, &mail_servers).await?;

        print_search_statistics(&search.stats());
        print_simple_summary(seed_count, mail_servers.len(), elapsed_seconds);

        Ok(SearchReport {
            seeds: seed_count,
            mail_servers: mail_servers
                .iter()
                .map(|record| record.name().to_string())
                .collect(),
            output: config.output.clone(),
            interrupted,
            elapsed_seconds,
        })
    }
}
