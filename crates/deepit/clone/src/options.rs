//! Per-call clone configuration.

use std::collections::BTreeSet;

use deepit_value::PropertyKey;
use serde::{Deserialize, Serialize};

/// How depth is counted for the elements of maps and sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthAccounting {
    /// Arrays and objects hand `depth + 1` to their children, but map keys,
    /// map values and set elements are walked at depth 0.
    #[default]
    Legacy,
    /// Every container hands `depth + 1` to its children.
    Uniform,
}

/// Options for one clone call.
///
/// Loaded from configuration with camelCase keys; every key is optional:
///
/// ```json
/// { "maxDepth": 8, "skipKeys": ["password", "token"], "depthAccounting": "uniform" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloneOptions {
    /// Deepest depth at which an object may still be copied. `None` is
    /// unbounded. The root sits at depth 0.
    pub max_depth: Option<usize>,
    /// Property names omitted from every object the structural cloner
    /// visits, at any nesting level. Symbol keys match on their
    /// `Symbol(description)` form.
    pub skip_keys: BTreeSet<String>,
    pub depth_accounting: DepthAccounting,
}

impl CloneOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn skip_key(mut self, key: impl Into<String>) -> Self {
        self.skip_keys.insert(key.into());
        self
    }

    pub fn with_skip_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn with_depth_accounting(mut self, accounting: DepthAccounting) -> Self {
        self.depth_accounting = accounting;
        self
    }

    pub fn is_skipped(&self, key: &PropertyKey) -> bool {
        if self.skip_keys.is_empty() {
            return false;
        }
        match key.as_str() {
            Some(name) => self.skip_keys.contains(name),
            None => self.skip_keys.contains(&key.to_string()),
        }
    }
}
