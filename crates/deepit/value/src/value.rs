use std::fmt;
use std::rc::Rc;

use crate::function::Function;
use crate::key::PropertyKey;
use crate::object::{ObjectId, ObjectRef};
use crate::symbol::Symbol;

/// A node in a value graph.
///
/// Everything except [`Value::Object`] is a leaf. Cloning a `Value` is
/// shallow: an `Object` clone is another handle to the same object.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Symbol(Symbol),
    Function(Function),
    Object(ObjectRef),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Plain object built from `(key, value)` pairs, each installed as a
    /// writable, enumerable, configurable data property.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Object(ObjectRef::from_entries(entries))
    }

    pub fn array(elements: impl IntoIterator<Item = Value>) -> Self {
        Value::Object(ObjectRef::array(elements.into_iter().collect()))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// True for everything that is neither an object nor a function.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Value::Object(_) | Value::Function(_))
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null | Value::Object(_) => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Function(_) => "function",
        }
    }

    /// Strict equality: primitives by value (`NaN` is never equal to itself),
    /// objects, functions and symbols by identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// SameValueZero: strict equality except that `NaN` equals `NaN`.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
            _ => self.strict_equals(other),
        }
    }

    /// Hashable key consistent with [`Value::same_value_zero`].
    pub fn zero_key(&self) -> ValueKey {
        match self {
            Value::Undefined => ValueKey::Undefined,
            Value::Null => ValueKey::Null,
            Value::Bool(b) => ValueKey::Bool(*b),
            Value::Number(n) => ValueKey::Number(normalized_bits(*n)),
            Value::String(s) => ValueKey::String(s.clone()),
            Value::Symbol(symbol) => ValueKey::Symbol(symbol.addr()),
            Value::Function(f) => ValueKey::Function(f.addr()),
            Value::Object(obj) => ValueKey::Object(obj.id()),
        }
    }
}

// All NaNs share one key and -0 collapses onto +0.
fn normalized_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0.0f64.to_bits()
    } else {
        n.to_bits()
    }
}

/// SameValueZero identity of a value, usable as a hash key.
///
/// Object, function and symbol variants hold addresses, so a key is only
/// meaningful while the value it was taken from is alive.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Undefined,
    Null,
    Bool(bool),
    Number(u64),
    String(Rc<str>),
    Symbol(usize),
    Function(usize),
    Object(ObjectId),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Symbol(symbol) => fmt::Debug::fmt(symbol, f),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::Object(obj) => fmt::Debug::fmt(obj, f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<ObjectRef> for Value {
    fn from(obj: ObjectRef) -> Self {
        Value::Object(obj)
    }
}

impl From<&ObjectRef> for Value {
    fn from(obj: &ObjectRef) -> Self {
        Value::Object(obj.clone())
    }
}
