use std::fmt;
use std::rc::Rc;

use crate::value::Value;

/// Signature of a native function body: `(this, args) -> result`.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Value;

/// An executable value.
///
/// Functions are opaque: the graph never looks inside their captured state,
/// and copies of a graph alias the same function rather than duplicating it.
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

struct FunctionData {
    name: String,
    body: Box<NativeFn>,
}

impl Function {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Value + 'static,
    {
        Self(Rc::new(FunctionData {
            name: name.into(),
            body: Box::new(body),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn call(&self, this: &Value, args: &[Value]) -> Value {
        (self.0.body)(this, args)
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Function {}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name().is_empty() {
            write!(f, "[Function (anonymous)]")
        } else {
            write!(f, "[Function: {}]", self.name())
        }
    }
}
