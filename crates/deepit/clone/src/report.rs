//! Counters gathered during one clone call.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Aggregate counters for one clone call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneReport {
    /// Arrays, objects, maps and sets allocated and registered.
    pub composites_cloned: usize,
    /// Dates, patterns, buffers, typed views and errors copied by value.
    pub leaves_copied: usize,
    /// Visits answered from the cycle tracker (cycles and shared references).
    pub shared_hits: usize,
    /// Properties omitted because their key was in the skip list.
    pub keys_skipped: usize,
    /// Deepest depth at which an object was visited.
    pub deepest: usize,
}

impl CloneReport {
    /// Objects newly allocated for the copy.
    pub fn objects_allocated(&self) -> usize {
        self.composites_cloned + self.leaves_copied
    }

    pub(crate) fn observe_depth(&mut self, depth: usize) {
        self.deepest = self.deepest.max(depth);
    }
}

impl fmt::Display for CloneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[CLONE] composites={} leaves={} shared={} skipped={} deepest={}",
            self.composites_cloned,
            self.leaves_copied,
            self.shared_hits,
            self.keys_skipped,
            self.deepest
        )
    }
}
