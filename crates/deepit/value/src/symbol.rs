use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A unique symbol. Two symbols are equal only if they are the same symbol,
/// regardless of description.
#[derive(Clone)]
pub struct Symbol(Rc<SymbolData>);

struct SymbolData {
    description: Option<String>,
}

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Self(Rc::new(SymbolData {
            description: Some(description.into()),
        }))
    }

    pub fn anonymous() -> Self {
        Self(Rc::new(SymbolData { description: None }))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.description.as_deref()
    }

    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

/// Renders as `Symbol(description)`, the form key exclusion lists match against.
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
