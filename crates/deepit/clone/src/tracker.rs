//! Per-call bookkeeping: identity-keyed cycle tracker and depth guard.

use std::collections::HashMap;

use deepit_value::{ObjectId, ObjectRef};
use tracing::warn;

use crate::error::{CloneError, CloneResult};

/// Maps each source object already visited to its copy.
///
/// Keyed by identity, not structure. The source handle is kept next to the
/// copy so its address cannot be reused while the tracker is alive.
#[derive(Debug, Default)]
pub struct CycleTracker {
    seen: HashMap<ObjectId, (ObjectRef, ObjectRef)>,
}

impl CycleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `copy` as the clone of `source`. Call before populating `copy`.
    pub fn register(&mut self, source: &ObjectRef, copy: &ObjectRef) {
        self.seen
            .insert(source.id(), (source.clone(), copy.clone()));
    }

    pub fn lookup(&self, source: &ObjectRef) -> Option<ObjectRef> {
        self.seen.get(&source.id()).map(|(_, copy)| copy.clone())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Enforces the optional recursion bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthGuard {
    max_depth: Option<usize>,
}

impl DepthGuard {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn check(&self, depth: usize) -> CloneResult<()> {
        match self.max_depth {
            Some(max_depth) if depth > max_depth => {
                warn!(depth, max_depth, "Clone aborted: maximum depth exceeded");
                Err(CloneError::DepthExceeded { depth, max_depth })
            }
            _ => Ok(()),
        }
    }
}
