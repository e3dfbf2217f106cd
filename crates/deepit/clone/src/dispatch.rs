//! Structural classification of values.

use std::rc::Rc;

use deepit_value::{Tag, TypedArrayKind, Value};

/// Cloning strategy a value is routed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Anything that is neither an object nor a function, `null` included.
    Primitive,
    Function,
    Object(ObjectCategory),
}

impl Category {
    /// Returned as-is: never copied, never registered.
    pub fn is_passthrough(&self) -> bool {
        !matches!(self, Category::Object(_))
    }
}

/// Strategy for an object, chosen by its structural tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectCategory {
    Array,
    PlainObject,
    Date,
    RegExp,
    Map,
    Set,
    ArrayBuffer,
    TypedArray(TypedArrayKind),
    Error,
    /// Any other object tag; copied property by property.
    Fallback(Rc<str>),
}

impl ObjectCategory {
    /// Copied by value from a built-in slot. Such values cannot hold
    /// references, so they never take part in a cycle.
    pub fn is_leaf(&self) -> bool {
        !self.registers_identity()
    }

    /// Registers its copy in the cycle tracker before populating it.
    pub fn registers_identity(&self) -> bool {
        matches!(
            self,
            ObjectCategory::Array
                | ObjectCategory::PlainObject
                | ObjectCategory::Map
                | ObjectCategory::Set
                | ObjectCategory::Fallback(_)
        )
    }
}

/// Classify one value. Never fails: unknown object tags fall through to
/// [`ObjectCategory::Fallback`].
pub fn classify(value: &Value) -> Category {
    match value {
        Value::Function(_) => Category::Function,
        Value::Object(obj) => Category::Object(classify_tag(&obj.tag())),
        _ => Category::Primitive,
    }
}

/// Classify an object by its structural tag.
pub fn classify_tag(tag: &Tag) -> ObjectCategory {
    match tag {
        Tag::Array => ObjectCategory::Array,
        Tag::Object => ObjectCategory::PlainObject,
        Tag::Date => ObjectCategory::Date,
        Tag::RegExp => ObjectCategory::RegExp,
        Tag::Map => ObjectCategory::Map,
        Tag::Set => ObjectCategory::Set,
        Tag::ArrayBuffer => ObjectCategory::ArrayBuffer,
        Tag::TypedArray(kind) => ObjectCategory::TypedArray(*kind),
        Tag::Error => ObjectCategory::Error,
        Tag::Other(name) => ObjectCategory::Fallback(name.clone()),
    }
}
