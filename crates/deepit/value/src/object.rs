use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use tracing::trace;

use crate::collections::{MapData, SetData};
use crate::error::{ValueError, ValueResult};
use crate::key::PropertyKey;
use crate::property::Property;
use crate::regexp::RegExpData;
use crate::typed_array::{TypedArray, TypedArrayKind};
use crate::value::Value;

/// Identity of a heap object: the address of its allocation.
///
/// Stable for as long as some handle to the object is alive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({:#x})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// Internal slot of a heap object. Determines the object's [`Tag`].
#[derive(Clone, Debug)]
pub enum ObjectKind {
    Ordinary,
    /// Dense element storage; holes read as `undefined`.
    Array(Vec<Value>),
    /// `None` is an invalid date.
    Date(Option<DateTime<Utc>>),
    RegExp(RegExpData),
    Map(MapData),
    Set(SetData),
    ArrayBuffer(Vec<u8>),
    TypedArray(TypedArray),
    Error,
    /// An exotic host object (promise, weak collection, proxy, ...) known
    /// only by its tag.
    Host(Rc<str>),
}

/// Structural tag of an object, derived from its internal slot only.
///
/// The prototype chain plays no part, so an object classifies the same way
/// whatever constructor produced it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Array,
    Object,
    Date,
    RegExp,
    Map,
    Set,
    ArrayBuffer,
    TypedArray(TypedArrayKind),
    Error,
    Other(Rc<str>),
}

impl Tag {
    pub fn name(&self) -> &str {
        match self {
            Tag::Array => "Array",
            Tag::Object => "Object",
            Tag::Date => "Date",
            Tag::RegExp => "RegExp",
            Tag::Map => "Map",
            Tag::Set => "Set",
            Tag::ArrayBuffer => "ArrayBuffer",
            Tag::TypedArray(kind) => kind.name(),
            Tag::Error => "Error",
            Tag::Other(name) => name,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[object {}]", self.name())
    }
}

impl ObjectKind {
    pub fn tag(&self) -> Tag {
        match self {
            ObjectKind::Ordinary => Tag::Object,
            ObjectKind::Array(_) => Tag::Array,
            ObjectKind::Date(_) => Tag::Date,
            ObjectKind::RegExp(_) => Tag::RegExp,
            ObjectKind::Map(_) => Tag::Map,
            ObjectKind::Set(_) => Tag::Set,
            ObjectKind::ArrayBuffer(_) => Tag::ArrayBuffer,
            ObjectKind::TypedArray(view) => Tag::TypedArray(view.kind()),
            ObjectKind::Error => Tag::Error,
            ObjectKind::Host(tag) => Tag::Other(tag.clone()),
        }
    }
}

/// State behind an [`ObjectRef`].
#[derive(Debug)]
pub struct ObjectData {
    prototype: Option<ObjectRef>,
    extensible: bool,
    properties: Vec<(PropertyKey, Property)>,
    kind: ObjectKind,
}

impl ObjectData {
    fn position(&self, key: &PropertyKey) -> Option<usize> {
        self.properties.iter().position(|(k, _)| k == key)
    }

    fn upsert(&mut self, key: PropertyKey, property: Property) {
        match self.position(&key) {
            Some(slot) => self.properties[slot].1 = property,
            None => self.properties.push((key, property)),
        }
    }
}

/// Shared handle to a heap object. Equality and hashing are by identity.
#[derive(Clone)]
pub struct ObjectRef(Rc<RefCell<ObjectData>>);

impl ObjectRef {
    pub fn new(prototype: Option<ObjectRef>, kind: ObjectKind) -> Self {
        Self(Rc::new(RefCell::new(ObjectData {
            prototype,
            extensible: true,
            properties: Vec::new(),
            kind,
        })))
    }

    /// Ordinary object with no prototype and no properties.
    pub fn plain() -> Self {
        Self::new(None, ObjectKind::Ordinary)
    }

    pub fn from_entries<K, I>(entries: I) -> Self
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let obj = Self::plain();
        {
            let mut data = obj.0.borrow_mut();
            for (key, value) in entries {
                data.upsert(key.into(), Property::data(value));
            }
        }
        obj
    }

    pub fn array(elements: Vec<Value>) -> Self {
        Self::new(None, ObjectKind::Array(elements))
    }

    pub fn date(time: DateTime<Utc>) -> Self {
        Self::new(None, ObjectKind::Date(Some(time)))
    }

    /// Date from epoch milliseconds. Non-finite or out-of-range input yields
    /// an invalid date.
    pub fn date_from_millis(millis: f64) -> Self {
        Self::new(None, ObjectKind::Date(datetime_from_millis(millis)))
    }

    pub fn regexp(source: &str, flags: &str) -> ValueResult<Self> {
        Ok(Self::new(
            None,
            ObjectKind::RegExp(RegExpData::new(source, flags)?),
        ))
    }

    pub fn map() -> Self {
        Self::new(None, ObjectKind::Map(MapData::new()))
    }

    pub fn new_set() -> Self {
        Self::new(None, ObjectKind::Set(SetData::new()))
    }

    pub fn array_buffer(bytes: Vec<u8>) -> Self {
        Self::new(None, ObjectKind::ArrayBuffer(bytes))
    }

    pub fn typed_array(view: TypedArray) -> Self {
        Self::new(None, ObjectKind::TypedArray(view))
    }

    /// Error object with own non-enumerable `message` and `stack`.
    ///
    /// `name` is expected to come from the prototype chain; the stack text
    /// uses it when present and falls back to `Error`.
    pub fn error(prototype: Option<ObjectRef>, message: &str) -> Self {
        let obj = Self::new(prototype, ObjectKind::Error);
        let name = match obj.get("name") {
            Value::String(name) => name.to_string(),
            _ => "Error".to_string(),
        };
        {
            let mut data = obj.0.borrow_mut();
            data.upsert("message".into(), Property::hidden(message));
            data.upsert(
                "stack".into(),
                Property::hidden(format!("{}: {}\n    at <anonymous>", name, message)),
            );
        }
        obj
    }

    pub fn host(prototype: Option<ObjectRef>, tag: &str) -> Self {
        Self::new(prototype, ObjectKind::Host(Rc::from(tag)))
    }

    pub fn id(&self) -> ObjectId {
        ObjectId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn tag(&self) -> Tag {
        self.0.borrow().kind.tag()
    }

    /// Snapshot of the internal slot.
    pub fn kind(&self) -> ObjectKind {
        self.0.borrow().kind.clone()
    }

    pub fn prototype(&self) -> Option<ObjectRef> {
        self.0.borrow().prototype.clone()
    }

    pub fn set_prototype(&self, prototype: Option<ObjectRef>) {
        self.0.borrow_mut().prototype = prototype;
    }

    pub fn is_extensible(&self) -> bool {
        self.0.borrow().extensible
    }

    pub fn prevent_extensions(&self) {
        self.0.borrow_mut().extensible = false;
    }

    // ── Properties ───────────────────────────────────────────────────

    /// Own keys in enumeration order: array indices ascending, then other
    /// strings in insertion order, then symbols in insertion order.
    /// Includes non-enumerable keys.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        let data = self.0.borrow();
        let mut indices: Vec<(u32, PropertyKey)> = Vec::new();
        let mut strings = Vec::new();
        let mut symbols = Vec::new();
        for (key, _) in &data.properties {
            if let Some(index) = key.array_index() {
                indices.push((index, key.clone()));
            } else if key.is_symbol() {
                symbols.push(key.clone());
            } else {
                strings.push(key.clone());
            }
        }
        indices.sort_by_key(|(index, _)| *index);
        indices
            .into_iter()
            .map(|(_, key)| key)
            .chain(strings)
            .chain(symbols)
            .collect()
    }

    pub fn get_own_property(&self, key: impl Into<PropertyKey>) -> Option<Property> {
        let key = key.into();
        let data = self.0.borrow();
        data.position(&key).map(|slot| data.properties[slot].1.clone())
    }

    pub fn has_own(&self, key: impl Into<PropertyKey>) -> bool {
        let key = key.into();
        self.0.borrow().position(&key).is_some()
    }

    /// Install `property` under `key`, replacing any configurable property
    /// already there (its position in the key order is kept).
    pub fn define_property(
        &self,
        key: impl Into<PropertyKey>,
        property: Property,
    ) -> ValueResult<()> {
        let key = key.into();
        let mut data = self.0.borrow_mut();
        match data.position(&key) {
            Some(slot) => {
                if !data.properties[slot].1.is_configurable() {
                    return Err(ValueError::NonConfigurable(key.to_string()));
                }
                data.properties[slot].1 = property;
            }
            None => {
                if !data.extensible {
                    return Err(ValueError::NotExtensible(key.to_string()));
                }
                data.properties.push((key, property));
            }
        }
        Ok(())
    }

    pub fn delete(&self, key: impl Into<PropertyKey>) -> ValueResult<bool> {
        let key = key.into();
        let mut data = self.0.borrow_mut();
        let Some(slot) = data.position(&key) else {
            return Ok(false);
        };
        if !data.properties[slot].1.is_configurable() {
            return Err(ValueError::NonConfigurable(key.to_string()));
        }
        data.properties.remove(slot);
        Ok(true)
    }

    /// Find `key` on this object or its prototype chain.
    fn lookup(&self, key: &PropertyKey) -> Option<Property> {
        let mut current = Some(self.clone());
        while let Some(obj) = current {
            let next = {
                let data = obj.0.borrow();
                if let Some(slot) = data.position(key) {
                    return Some(data.properties[slot].1.clone());
                }
                data.prototype.clone()
            };
            current = next;
        }
        None
    }

    /// Read `key` through the prototype chain, invoking a getter with this
    /// object as receiver. Missing keys read as `undefined`.
    pub fn get(&self, key: impl Into<PropertyKey>) -> Value {
        let key = key.into();
        match self.lookup(&key) {
            Some(Property::Data { value, .. }) => value,
            Some(Property::Accessor { get: Some(getter), .. }) => {
                trace!(key = %key, getter = getter.name(), "Invoking getter");
                getter.call(&Value::Object(self.clone()), &[])
            }
            Some(Property::Accessor { get: None, .. }) | None => Value::Undefined,
        }
    }

    /// Assign `key`.
    ///
    /// An own writable data property is overwritten in place. A setter found
    /// anywhere on the chain is invoked with this object as receiver.
    /// Otherwise a new own data property is created, unless an inherited
    /// read-only property shadows it.
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> ValueResult<()> {
        let key = key.into();
        let value = value.into();
        match self.lookup(&key) {
            Some(Property::Accessor { set: Some(setter), .. }) => {
                trace!(key = %key, setter = setter.name(), "Invoking setter");
                setter.call(&Value::Object(self.clone()), &[value]);
                Ok(())
            }
            Some(Property::Accessor { set: None, .. }) => Err(ValueError::ReadOnly(key.to_string())),
            Some(Property::Data { writable: false, .. }) => Err(ValueError::ReadOnly(key.to_string())),
            Some(Property::Data { .. }) if self.has_own(&key) => {
                let mut data = self.0.borrow_mut();
                if let Some(slot) = data.position(&key) {
                    if let Property::Data { value: current, .. } = &mut data.properties[slot].1 {
                        *current = value;
                    }
                }
                Ok(())
            }
            _ => self.define_property(key, Property::data(value)),
        }
    }

    // ── Array slot ───────────────────────────────────────────────────

    fn wrong_kind(&self, expected: &'static str) -> ValueError {
        ValueError::WrongKind {
            expected,
            actual: self.tag().name().to_string(),
        }
    }

    pub fn array_len(&self) -> ValueResult<usize> {
        match &self.0.borrow().kind {
            ObjectKind::Array(elements) => Ok(elements.len()),
            _ => Err(self.wrong_kind("Array")),
        }
    }

    /// Element at `index`, or `undefined` past the end.
    pub fn array_get(&self, index: usize) -> ValueResult<Value> {
        match &self.0.borrow().kind {
            ObjectKind::Array(elements) => Ok(elements.get(index).cloned().unwrap_or_default()),
            _ => Err(self.wrong_kind("Array")),
        }
    }

    /// Store at `index`, growing the array with `undefined` holes as needed.
    pub fn array_set(&self, index: usize, value: Value) -> ValueResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            ObjectKind::Array(elements) => {
                if index >= elements.len() {
                    elements.resize(index + 1, Value::Undefined);
                }
                elements[index] = value;
                Ok(())
            }
            _ => {
                drop(data);
                Err(self.wrong_kind("Array"))
            }
        }
    }

    pub fn array_push(&self, value: Value) -> ValueResult<()> {
        let len = self.array_len()?;
        self.array_set(len, value)
    }

    /// Snapshot of the elements.
    pub fn array_elements(&self) -> ValueResult<Vec<Value>> {
        match &self.0.borrow().kind {
            ObjectKind::Array(elements) => Ok(elements.clone()),
            _ => Err(self.wrong_kind("Array")),
        }
    }

    // ── Date slot ────────────────────────────────────────────────────

    /// `None` for an invalid date.
    pub fn date_value(&self) -> ValueResult<Option<DateTime<Utc>>> {
        match &self.0.borrow().kind {
            ObjectKind::Date(time) => Ok(*time),
            _ => Err(self.wrong_kind("Date")),
        }
    }

    /// Epoch milliseconds; `NaN` for an invalid date.
    pub fn get_time(&self) -> ValueResult<f64> {
        Ok(self
            .date_value()?
            .map(|time| time.timestamp_millis() as f64)
            .unwrap_or(f64::NAN))
    }

    // ── RegExp slot ──────────────────────────────────────────────────

    pub fn regexp_data(&self) -> ValueResult<RegExpData> {
        match &self.0.borrow().kind {
            ObjectKind::RegExp(data) => Ok(data.clone()),
            _ => Err(self.wrong_kind("RegExp")),
        }
    }

    // ── Map slot ─────────────────────────────────────────────────────

    pub fn map_len(&self) -> ValueResult<usize> {
        match &self.0.borrow().kind {
            ObjectKind::Map(map) => Ok(map.len()),
            _ => Err(self.wrong_kind("Map")),
        }
    }

    pub fn map_get(&self, key: &Value) -> ValueResult<Option<Value>> {
        match &self.0.borrow().kind {
            ObjectKind::Map(map) => Ok(map.get(key).cloned()),
            _ => Err(self.wrong_kind("Map")),
        }
    }

    pub fn map_has(&self, key: &Value) -> ValueResult<bool> {
        match &self.0.borrow().kind {
            ObjectKind::Map(map) => Ok(map.has(key)),
            _ => Err(self.wrong_kind("Map")),
        }
    }

    pub fn map_set(&self, key: Value, value: Value) -> ValueResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            ObjectKind::Map(map) => {
                map.set(key, value);
                Ok(())
            }
            _ => {
                drop(data);
                Err(self.wrong_kind("Map"))
            }
        }
    }

    /// Snapshot of the entries in insertion order.
    pub fn map_entries(&self) -> ValueResult<Vec<(Value, Value)>> {
        match &self.0.borrow().kind {
            ObjectKind::Map(map) => Ok(map.entries().cloned().collect()),
            _ => Err(self.wrong_kind("Map")),
        }
    }

    // ── Set slot ─────────────────────────────────────────────────────

    pub fn set_len(&self) -> ValueResult<usize> {
        match &self.0.borrow().kind {
            ObjectKind::Set(set) => Ok(set.len()),
            _ => Err(self.wrong_kind("Set")),
        }
    }

    pub fn set_has(&self, value: &Value) -> ValueResult<bool> {
        match &self.0.borrow().kind {
            ObjectKind::Set(set) => Ok(set.has(value)),
            _ => Err(self.wrong_kind("Set")),
        }
    }

    pub fn set_add(&self, value: Value) -> ValueResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            ObjectKind::Set(set) => {
                set.add(value);
                Ok(())
            }
            _ => {
                drop(data);
                Err(self.wrong_kind("Set"))
            }
        }
    }

    /// Snapshot of the elements in insertion order.
    pub fn set_values(&self) -> ValueResult<Vec<Value>> {
        match &self.0.borrow().kind {
            ObjectKind::Set(set) => Ok(set.values().cloned().collect()),
            _ => Err(self.wrong_kind("Set")),
        }
    }

    // ── Binary slots ─────────────────────────────────────────────────

    /// Copy of the buffer's bytes.
    pub fn buffer_bytes(&self) -> ValueResult<Vec<u8>> {
        match &self.0.borrow().kind {
            ObjectKind::ArrayBuffer(bytes) => Ok(bytes.clone()),
            _ => Err(self.wrong_kind("ArrayBuffer")),
        }
    }

    pub fn buffer_write(&self, offset: usize, bytes: &[u8]) -> ValueResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            ObjectKind::ArrayBuffer(buffer) => {
                let end = offset + bytes.len();
                if end > buffer.len() {
                    return Err(ValueError::OutOfRange {
                        index: end,
                        len: buffer.len(),
                    });
                }
                buffer[offset..end].copy_from_slice(bytes);
                Ok(())
            }
            _ => {
                drop(data);
                Err(self.wrong_kind("ArrayBuffer"))
            }
        }
    }

    /// Copy of the view's elements.
    pub fn typed_array_view(&self) -> ValueResult<TypedArray> {
        match &self.0.borrow().kind {
            ObjectKind::TypedArray(view) => Ok(view.clone()),
            _ => Err(self.wrong_kind("typed array")),
        }
    }

    pub fn typed_array_set(&self, index: usize, value: f64) -> ValueResult<()> {
        let mut data = self.0.borrow_mut();
        match &mut data.kind {
            ObjectKind::TypedArray(view) => view.set(index, value),
            _ => {
                drop(data);
                Err(self.wrong_kind("typed array"))
            }
        }
    }
}

fn datetime_from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis.trunc() as i64).single()
}

impl PartialEq for ObjectRef {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for ObjectRef {}

impl Hash for ObjectRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

/// Shallow: prints the tag and identity, never the contents, so cyclic
/// graphs format without recursion.
impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(data) => write!(f, "{} {}", data.kind.tag(), self.id()),
            Err(_) => write!(f, "[object <borrowed>] {}", self.id()),
        }
    }
}
