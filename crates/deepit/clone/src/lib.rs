#![deny(unsafe_code)]
//! # deepit-clone
//!
//! Structural deep copy of [`deepit_value`] graphs.
//!
//! A clone call walks the graph from one root and produces a new graph that
//! is structurally equal to it but shares no mutable object with it:
//!
//! ```text
//! walk(value, depth)
//!   ├─ primitive / function ─────────► returned as-is
//!   ├─ depth > max_depth ────────────► CloneError::DepthExceeded
//!   ├─ already visited ──────────────► the copy made on first visit
//!   └─ classify(tag)
//!        ├─ Array / Object / Fallback ► register, then copy own properties
//!        ├─ Map / Set ────────────────► register, then copy members
//!        ├─ Date / RegExp / buffers ──► fresh leaf copy
//!        └─ Error ────────────────────► name, message, stack only
//! ```
//!
//! Composite copies are registered before their children are walked, so a
//! cycle reached again resolves to the partially built copy and two paths to
//! one source object lead to one copy object.
//!
//! ## Key Types
//!
//! - [`DeepCloner`] - Engine holding one set of options
//! - [`CloneOptions`] - Depth bound, skipped keys, depth accounting
//! - [`Category`] / [`ObjectCategory`] - Handler a value is routed to
//! - [`CloneReport`] - Counters gathered during one call
//! - [`CloneError`] - The depth bound was hit, or the value model refused
//!
//! ## Example
//!
//! ```
//! use deepit_clone::{clone, CloneOptions};
//! use deepit_value::Value;
//!
//! let user = Value::object([
//!     ("name", Value::from("ada")),
//!     ("password", Value::from("hunter2")),
//! ]);
//! let options = CloneOptions::new().skip_key("password");
//! let copy = clone(&user, Some(&options)).unwrap();
//!
//! let copy = copy.as_object().unwrap();
//! assert_eq!(copy.get("name").as_str(), Some("ada"));
//! assert!(!copy.has_own("password"));
//! ```

mod builtins;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod options;
pub mod report;
mod structural;
pub mod tracker;

pub use dispatch::{classify, classify_tag, Category, ObjectCategory};
pub use engine::DeepCloner;
pub use error::{CloneError, CloneResult};
pub use options::{CloneOptions, DepthAccounting};
pub use report::CloneReport;
pub use tracker::{CycleTracker, DepthGuard};

use deepit_value::Value;

/// Deep-copy `value`. `None` means default options: unbounded depth and
/// nothing skipped.
pub fn clone(value: &Value, options: Option<&CloneOptions>) -> CloneResult<Value> {
    let cloner = DeepCloner::new(options.cloned().unwrap_or_default());
    cloner.clone_value(value)
}

/// Same contract as [`clone`]. Kept as a separate entry point for callers
/// that spell out which variant they rely on.
pub fn strict_clone(value: &Value, options: Option<&CloneOptions>) -> CloneResult<Value> {
    clone(value, options)
}
