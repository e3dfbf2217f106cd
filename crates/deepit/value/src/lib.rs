#![deny(unsafe_code)]
//! # deepit-value
//!
//! The live value graph that the deepit engine copies.
//!
//! Values follow an ECMAScript-style heap model:
//!
//! ```text
//! Value ─┬─ primitives (undefined, null, bool, number, string, symbol)
//!        ├─ Function   (shared native closure, compared by identity)
//!        └─ Object ──── ObjectRef = Rc<RefCell<ObjectData>>
//!                         ├─ prototype (shared, never copied)
//!                         ├─ own properties (ordered, with descriptors)
//!                         └─ internal slot (ObjectKind → structural Tag)
//! ```
//!
//! Objects are compared by identity: two [`ObjectRef`]s are the same node
//! exactly when they point at the same allocation. [`ObjectId`] exposes that
//! identity as a hashable key.
//!
//! ## Key Types
//!
//! - [`Value`] - A node in the graph
//! - [`ObjectRef`] - Shared handle to a heap object
//! - [`ObjectKind`] / [`Tag`] - Internal slot and its structural tag
//! - [`Property`] - Data or accessor property descriptor
//! - [`PropertyKey`] - String or symbol key
//! - [`Function`] / [`Symbol`] - Identity-compared leaf handles

pub mod collections;
pub mod equality;
pub mod error;
pub mod function;
pub mod key;
pub mod object;
pub mod property;
pub mod regexp;
pub mod symbol;
pub mod typed_array;
pub mod value;

pub use collections::{MapData, SetData};
pub use equality::deep_equal;
pub use error::{ValueError, ValueResult};
pub use function::Function;
pub use key::PropertyKey;
pub use object::{ObjectData, ObjectId, ObjectKind, ObjectRef, Tag};
pub use property::Property;
pub use regexp::RegExpData;
pub use symbol::Symbol;
pub use typed_array::{TypedArray, TypedArrayKind};
pub use value::{Value, ValueKey};
