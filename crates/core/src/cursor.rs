//! Cursor bookkeeping carried between refreshes.
//!
//! The engine never advances a run's cursor. The orchestrating layer keeps a
//! [`CursorLedger`] from one refresh to the next so that a run whose snapshot
//! omits its cursor picks up where it left off. Each refresh produces a new
//! ledger value; nothing is mutated in place.

use std::collections::HashMap;

use railwatch_transit::{Run, RunIdentifier};
use tracing::debug;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorLedger {
    cursors: HashMap<RunIdentifier, usize>,
}

impl CursorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, run: &RunIdentifier) -> Option<usize> {
        self.cursors.get(run).copied()
    }

    /// Ledger for the next refresh: the cursors of exactly the runs seen in
    /// this one. Runs that dropped out of the feed are forgotten.
    pub fn record<'a>(&self, runs: impl IntoIterator<Item = &'a Run>) -> Self {
        let cursors: HashMap<_, _> = runs
            .into_iter()
            .map(|run| {
                match self.get(&run.id) {
                    Some(previous) if previous != run.cursor() => {
                        debug!(run = %run.id, from = previous, to = run.cursor(), "cursor moved");
                    }
                    None => debug!(run = %run.id, cursor = run.cursor(), "new run"),
                    _ => {}
                }
                (run.id.clone(), run.cursor())
            })
            .collect();

        let dropped = self.cursors.keys().filter(|id| !cursors.contains_key(*id)).count();
        if dropped > 0 {
            debug!(dropped, "runs left the feed");
        }

        Self { cursors }
    }

    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}
