//! Search statistics tracking.
//!
//! This module provides thread-safe outcome counters for the mail server search.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::OutcomeType;

/// Thread-safe search statistics tracker.
///
/// Tracks per-record outcomes using atomic counters, allowing concurrent
/// access from multiple tasks. All outcome types are initialized to zero on
/// creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using `Arc`.
pub struct SearchStats {
    outcomes: HashMap<OutcomeType, AtomicUsize>,
}

impl Default for SearchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchStats {
    /// Creates a tracker with every outcome counter at zero.
    pub fn new() -> Self {
        let outcomes = OutcomeType::iter()
            .map(|outcome| (outcome, AtomicUsize::new(0)))
            .collect();
        SearchStats { outcomes }
    }

    /// Increment an outcome counter.
    pub fn increment(&self, outcome: OutcomeType) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment outcome counter for {:?} which is not in the map. \
                 This indicates a bug in SearchStats initialization.",
                outcome
            );
        }
    }

    /// Get the count for an outcome type.
    pub fn get_count(&self, outcome: OutcomeType) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of records that reached an outcome.
    ///
    /// `Checked` marks the start of a check and is followed by exactly one
    /// other outcome for the same record, so it is left out of the sum.
    pub fn total(&self) -> usize {
        OutcomeType::iter()
            .filter(|outcome| *outcome != OutcomeType::Checked)
            .map(|outcome| self.get_count(outcome))
            .sum()
    }
}
