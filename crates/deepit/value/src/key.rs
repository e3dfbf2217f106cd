use std::fmt;
use std::rc::Rc;

use crate::symbol::Symbol;

/// An own-property key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(Rc<str>),
    Symbol(Symbol),
}

impl PropertyKey {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyKey::String(s) => Some(s),
            PropertyKey::Symbol(_) => None,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, PropertyKey::Symbol(_))
    }

    /// The canonical array index this key denotes, if any.
    ///
    /// Only canonical decimal forms count: `"0"`, `"17"`, but not `"01"`,
    /// `"+1"` or `"4294967295"`.
    pub fn array_index(&self) -> Option<u32> {
        let s = self.as_str()?;
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if s.len() > 1 && s.starts_with('0') {
            return None;
        }
        match s.parse::<u32>() {
            Ok(index) if index != u32::MAX => Some(index),
            _ => None,
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::String(Rc::from(s))
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::String(Rc::from(s))
    }
}

impl From<&String> for PropertyKey {
    fn from(s: &String) -> Self {
        PropertyKey::String(Rc::from(s.as_str()))
    }
}

impl From<Symbol> for PropertyKey {
    fn from(symbol: Symbol) -> Self {
        PropertyKey::Symbol(symbol)
    }
}

impl From<&Symbol> for PropertyKey {
    fn from(symbol: &Symbol) -> Self {
        PropertyKey::Symbol(symbol.clone())
    }
}

impl From<&PropertyKey> for PropertyKey {
    fn from(key: &PropertyKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => f.write_str(s),
            PropertyKey::Symbol(symbol) => fmt::Display::fmt(symbol, f),
        }
    }
}

impl fmt::Debug for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::String(s) => write!(f, "{:?}", s),
            PropertyKey::Symbol(symbol) => fmt::Debug::fmt(symbol, f),
        }
    }
}
