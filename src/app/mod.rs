//! Main application modules.
//!
//! This module provides seed loading, result persistence, interrupt
//! handling and statistics printing used by the run driver.

pub mod output;
pub mod seeds;
pub mod shutdown;
pub mod statistics;

// Re-export public API
pub use output::append_mail_servers;
pub use seeds::{extract_hostname, load_seeds, seed_records};
pub use shutdown::{shutdown_gracefully, spawn_interrupt_listener};
pub use statistics::{print_search_statistics, print_simple_summary};
