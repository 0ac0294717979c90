//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{OutcomeType, SearchStats};

/// Prints the per-outcome counters of a search to the log.
pub fn print_search_statistics(stats: &SearchStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }
    info!("Search outcomes:");
    for outcome in OutcomeType::iter() {
        let count = stats.get_count(outcome);
        if count > 0 {
            info!("   {}: {}", outcome.as_str(), count);
        }
    }
}

/// Prints a one-line summary of the run.
pub fn print_simple_summary(seeds: usize, mail_servers: usize, elapsed_seconds: f64) {
    info!(
        "✅ Searched {} seed domain{} and found {} mail server{} in {:.1}s",
        seeds,
        if seeds == 1 { "" } else { "s" },
        mail_servers,
        if mail_servers == 1 { "" } else { "s" },
        elapsed_seconds
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_search_statistics_empty() {
        let stats = SearchStats::new();
        // Should not panic when nothing was counted
        print_search_statistics(&stats);
    }

    #[test]
    fn test_print_search_statistics_with_outcomes() {
        let stats = SearchStats::new();
        stats.increment(OutcomeType::Checked);
        stats.increment(OutcomeType::MailServer);
        stats.increment(OutcomeType::Cancelled);
        print_search_statistics(&stats);
    }

    #[test]
    fn test_print_simple_summary() {
        print_simple_summary(1, 0, 0.0);
        print_simple_summary(500, 42, 1234.5);
    }
}
