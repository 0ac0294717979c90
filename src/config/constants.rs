//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including resolver addresses, discovery source endpoints, timeouts and
//! process exit codes.

use std::net::{IpAddr, Ipv4Addr};

/// Public recursive resolvers queried for A and MX records.
pub const PUBLIC_RESOLVERS: &[IpAddr] = &[
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
    IpAddr::V4(Ipv4Addr::new(8, 8, 4, 4)),
    IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
];

/// Port the public resolvers are queried on (UDP with TCP fallback)
pub const DNS_PORT: u16 = 53;

/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 5;

/// HTTP request timeout used by the discovery sources (seconds)
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for discovery source requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Threat-intelligence API serving domain reports
pub const THREAT_INTEL_BASE_URL: &str = "https://www.threatcrowd.org";
/// Certificate-transparency log search
pub const CERT_TRANSPARENCY_BASE_URL: &str = "https://crt.sh";
/// Domain reputation site listing observed subdomains
pub const REPUTATION_BASE_URL: &str = "https://www.virustotal.com";

/// Seed dataset used when neither an input file nor `--seed-url` is given
/// (Fortune 500 company websites, GeoJSON).
pub const DEFAULT_SEED_URL: &str =
    "https://opendata.arcgis.com/datasets/a4d813c396934fc09d0b801a0c491852_0.geojson";
/// GeoJSON feature property holding the company website
pub const DEFAULT_SEED_PROPERTY: &str = "WEBSITE";

/// Maximum seed entry length. Longer lines are skipped.
pub const MAX_SEED_LENGTH: usize = 2048;

/// File confirmed mail servers are appended to
pub const DEFAULT_OUTPUT_PATH: &str = "output.txt";

/// Exit code for fatal errors (I/O, initialization)
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when the seed list turned out empty
pub const EXIT_NO_SEEDS: i32 = 2;
