//! Hooks for observing a search while it runs
//!
//! Instruments only observe. No strategy ever reads them back, so the control flow of a search is
//! the same whichever instruments are plugged in.

use std::cell::Cell;

use crate::turn::Turn;

/// Receives a callback for the interesting events of a search
pub trait SearchInstruments {
    /// A non-leaf node is about to iterate over the legal actions of `turn`
    fn observe_expansion(&self, turn: Turn);

    /// The evaluation function was applied to a leaf
    fn observe_evaluation(&self);

    /// Alpha-beta skipped the remaining siblings at a node where `turn` was to move
    fn observe_cutoff(&self, turn: Turn);
}

#[derive(Debug, Clone, Copy, Default)]
/// An empty struct that implements [SearchInstruments] as a no-op, which can be used when you don't
/// care about the statistics of a search
pub struct Instruments {}

impl SearchInstruments for Instruments {
    fn observe_expansion(&self, _turn: Turn) {}
    fn observe_evaluation(&self) {}
    fn observe_cutoff(&self, _turn: Turn) {}
}

#[derive(Debug, Default)]
/// Counts the events of a single search
///
/// ```
/// use multiagent_search::{SearchCounts, SearchInstruments};
/// use multiagent_search::turn::Turn;
///
/// let counts = SearchCounts::default();
/// counts.observe_expansion(Turn::Maximizer);
/// counts.observe_evaluation();
/// counts.observe_evaluation();
///
/// assert_eq!(counts.expansions(), 1);
/// assert_eq!(counts.evaluations(), 2);
/// assert_eq!(counts.cutoffs(), 0);
/// ```
pub struct SearchCounts {
    expansions: Cell<u64>,
    evaluations: Cell<u64>,
    cutoffs: Cell<u64>,
}

impl SearchCounts {
    /// Number of non-leaf nodes expanded
    pub fn expansions(&self) -> u64 {
        self.expansions.get()
    }

    /// Number of times the evaluation function was applied
    pub fn evaluations(&self) -> u64 {
        self.evaluations.get()
    }

    /// Number of alpha-beta cutoffs
    pub fn cutoffs(&self) -> u64 {
        self.cutoffs.get()
    }
}

impl SearchInstruments for SearchCounts {
    fn observe_expansion(&self, _turn: Turn) {
        self.expansions.set(self.expansions.get() + 1);
    }

    fn observe_evaluation(&self) {
        self.evaluations.set(self.evaluations.get() + 1);
    }

    fn observe_cutoff(&self, _turn: Turn) {
        self.cutoffs.set(self.cutoffs.get() + 1);
    }
}
