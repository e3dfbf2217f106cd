use crate::function::Function;
use crate::value::Value;

/// An own-property descriptor.
#[derive(Clone, Debug)]
pub enum Property {
    /// A plain value slot.
    Data {
        value: Value,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    /// A getter/setter pair. Either half may be absent.
    Accessor {
        get: Option<Function>,
        set: Option<Function>,
        enumerable: bool,
        configurable: bool,
    },
}

impl Property {
    /// Writable, enumerable, configurable data property.
    pub fn data(value: impl Into<Value>) -> Self {
        Property::Data {
            value: value.into(),
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Writable, configurable data property that is skipped by enumeration.
    pub fn hidden(value: impl Into<Value>) -> Self {
        Property::Data {
            value: value.into(),
            writable: true,
            enumerable: false,
            configurable: true,
        }
    }

    /// Enumerable, configurable accessor property.
    pub fn accessor(get: Option<Function>, set: Option<Function>) -> Self {
        Property::Accessor {
            get,
            set,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn read_only(mut self) -> Self {
        if let Property::Data { writable, .. } = &mut self {
            *writable = false;
        }
        self
    }

    pub fn non_enumerable(mut self) -> Self {
        match &mut self {
            Property::Data { enumerable, .. } | Property::Accessor { enumerable, .. } => {
                *enumerable = false
            }
        }
        self
    }

    pub fn non_configurable(mut self) -> Self {
        match &mut self {
            Property::Data { configurable, .. } | Property::Accessor { configurable, .. } => {
                *configurable = false
            }
        }
        self
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Property::Data { value, .. } => Some(value),
            Property::Accessor { .. } => None,
        }
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self, Property::Accessor { .. })
    }

    pub fn is_writable(&self) -> bool {
        matches!(self, Property::Data { writable: true, .. })
    }

    pub fn is_enumerable(&self) -> bool {
        match self {
            Property::Data { enumerable, .. } | Property::Accessor { enumerable, .. } => {
                *enumerable
            }
        }
    }

    pub fn is_configurable(&self) -> bool {
        match self {
            Property::Data { configurable, .. } | Property::Accessor { configurable, .. } => {
                *configurable
            }
        }
    }

    pub fn getter(&self) -> Option<&Function> {
        match self {
            Property::Accessor { get, .. } => get.as_ref(),
            Property::Data { .. } => None,
        }
    }

    pub fn setter(&self) -> Option<&Function> {
        match self {
            Property::Accessor { set, .. } => set.as_ref(),
            Property::Data { .. } => None,
        }
    }
}
