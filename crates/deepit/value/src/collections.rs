//! Insertion-ordered associative map and set keyed by SameValueZero.

use std::collections::HashMap;

use crate::value::{Value, ValueKey};

/// Backing store of a map object.
#[derive(Clone, Debug, Default)]
pub struct MapData {
    entries: Vec<(Value, Value)>,
    index: HashMap<ValueKey, usize>,
}

impl MapData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.index
            .get(&key.zero_key())
            .map(|&slot| &self.entries[slot].1)
    }

    pub fn has(&self, key: &Value) -> bool {
        self.index.contains_key(&key.zero_key())
    }

    /// Insert or overwrite. Overwriting keeps the entry's original position.
    pub fn set(&mut self, key: Value, value: Value) {
        match self.index.get(&key.zero_key()) {
            Some(&slot) => self.entries[slot].1 = value,
            None => {
                self.index.insert(key.zero_key(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn delete(&mut self, key: &Value) -> bool {
        let Some(slot) = self.index.remove(&key.zero_key()) else {
            return false;
        };
        self.entries.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        true
    }

    pub fn entries(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }
}

/// Backing store of a set object.
#[derive(Clone, Debug, Default)]
pub struct SetData {
    values: Vec<Value>,
    index: HashMap<ValueKey, usize>,
}

impl SetData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn has(&self, value: &Value) -> bool {
        self.index.contains_key(&value.zero_key())
    }

    /// Returns false if an equal element was already present.
    pub fn add(&mut self, value: Value) -> bool {
        let key = value.zero_key();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.values.len());
        self.values.push(value);
        true
    }

    pub fn delete(&mut self, value: &Value) -> bool {
        let Some(slot) = self.index.remove(&value.zero_key()) else {
            return false;
        };
        self.values.remove(slot);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }
        true
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }
}
