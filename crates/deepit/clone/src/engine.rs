//! The recursive walker and the public engine type.

use deepit_value::{ObjectRef, PropertyKey, Value};
use tracing::{debug, trace};

use crate::builtins;
use crate::dispatch::{classify, Category, ObjectCategory};
use crate::error::CloneResult;
use crate::options::{CloneOptions, DepthAccounting};
use crate::report::CloneReport;
use crate::structural;
use crate::tracker::{CycleTracker, DepthGuard};

/// Deep-copy engine configured with one set of [`CloneOptions`].
///
/// The engine itself holds no per-call state: every call builds its own
/// cycle tracker and depth guard, so one engine can serve any number of
/// calls.
#[derive(Debug, Clone, Default)]
pub struct DeepCloner {
    options: CloneOptions,
}

impl DeepCloner {
    pub fn new(options: CloneOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CloneOptions {
        &self.options
    }

    /// Copy `value`.
    ///
    /// Primitives and functions come back unchanged. Every object reachable
    /// from `value` is copied once; references that were identical in the
    /// source are identical in the copy, cycles included.
    pub fn clone_value(&self, value: &Value) -> CloneResult<Value> {
        self.clone_with_report(value).map(|(copy, _)| copy)
    }

    /// Copy `value` and return the counters gathered along the way.
    pub fn clone_with_report(&self, value: &Value) -> CloneResult<(Value, CloneReport)> {
        let mut walker = Walker::new(&self.options);
        debug!(
            kind = value.type_of(),
            max_depth = ?walker.guard.max_depth(),
            skip_keys = self.options.skip_keys.len(),
            accounting = ?self.options.depth_accounting,
            "Starting deep clone"
        );

        let copy = walker.walk(value, 0)?;

        debug!(
            composites = walker.report.composites_cloned,
            leaves = walker.report.leaves_copied,
            shared = walker.report.shared_hits,
            skipped = walker.report.keys_skipped,
            deepest = walker.report.deepest,
            tracked = walker.tracker.len(),
            "Deep clone finished"
        );
        Ok((copy, walker.report))
    }
}

/// State of one traversal. Lives exactly as long as one clone call.
pub(crate) struct Walker<'a> {
    options: &'a CloneOptions,
    guard: DepthGuard,
    tracker: CycleTracker,
    pub(crate) report: CloneReport,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(options: &'a CloneOptions) -> Self {
        Self {
            options,
            guard: DepthGuard::new(options.max_depth),
            tracker: CycleTracker::new(),
            report: CloneReport::default(),
        }
    }

    /// Copy one node found at `depth`.
    ///
    /// Primitives and functions return before the depth check: they need no
    /// descent, so a bound only ever stops objects.
    pub(crate) fn walk(&mut self, value: &Value, depth: usize) -> CloneResult<Value> {
        let (source, category) = match (value, classify(value)) {
            (Value::Object(source), Category::Object(category)) => (source, category),
            _ => return Ok(value.clone()),
        };

        self.guard.check(depth)?;
        self.report.observe_depth(depth);

        if let Some(copy) = self.tracker.lookup(source) {
            trace!(object = %source.id(), depth, "Reusing tracked copy");
            self.report.shared_hits += 1;
            return Ok(Value::Object(copy));
        }

        trace!(object = %source.id(), ?category, depth, "Dispatching");
        let copy = match &category {
            ObjectCategory::Array => structural::clone_array(self, source, depth)?,
            ObjectCategory::PlainObject | ObjectCategory::Fallback(_) => {
                structural::clone_object(self, source, depth)?
            }
            ObjectCategory::Error => structural::clone_error(source)?,
            ObjectCategory::Date => builtins::clone_date(source)?,
            ObjectCategory::RegExp => builtins::clone_regexp(source)?,
            ObjectCategory::Map => builtins::clone_map(self, source, depth)?,
            ObjectCategory::Set => builtins::clone_set(self, source, depth)?,
            ObjectCategory::ArrayBuffer => builtins::clone_array_buffer(source)?,
            ObjectCategory::TypedArray(_) => builtins::clone_typed_array(source)?,
        };

        if category.registers_identity() {
            self.report.composites_cloned += 1;
        } else {
            self.report.leaves_copied += 1;
        }
        Ok(Value::Object(copy))
    }

    /// Record `copy` as the clone of `source` before its children are walked.
    pub(crate) fn register(&mut self, source: &ObjectRef, copy: &ObjectRef) {
        self.tracker.register(source, copy);
    }

    /// Depth for elements of arrays and property values of objects.
    pub(crate) fn child_depth(&self, depth: usize) -> usize {
        depth + 1
    }

    /// Depth for keys and values held by maps and sets.
    pub(crate) fn collection_depth(&self, depth: usize) -> usize {
        match self.options.depth_accounting {
            DepthAccounting::Legacy => 0,
            DepthAccounting::Uniform => depth + 1,
        }
    }

    /// True if `key` must be left out of the copy. Counts the omission.
    pub(crate) fn skips(&mut self, key: &PropertyKey) -> bool {
        let skipped = self.options.is_skipped(key);
        if skipped {
            trace!(key = %key, "Skipping excluded key");
            self.report.keys_skipped += 1;
        }
        skipped
    }
}
