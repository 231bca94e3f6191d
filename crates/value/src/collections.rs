//! Mapping and set containers with upstream insertion semantics.
//!
//! Both keep insertion order and deduplicate under same-value-zero equality,
//! the relation the upstream host applies to `Map` keys and `Set` elements
//! (strict equality, except NaN collides with itself).

use crate::value::Value;

// ── MapValue ─────────────────────────────────────────────────────────────

/// Ordered key-to-value association.
#[derive(Debug, Clone, Default)]
pub struct MapValue {
    entries: Vec<(Value, Value)>,
}

impl MapValue {
    pub fn new() -> Self {
        MapValue::default()
    }

    /// Inserts an entry. An existing key (same-value-zero) has its value
    /// replaced in place, keeping the entry's position.
    pub fn set(&mut self, key: impl Into<Value>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        for (existing, slot) in self.entries.iter_mut() {
            if existing.same_value_zero(&key) {
                *slot = value;
                return;
            }
        }
        self.entries.push((key, value));
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.same_value_zero(key))
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MapValue::new();
        for (key, value) in iter {
            map.set(key, value);
        }
        map
    }
}

// ── SetValue ─────────────────────────────────────────────────────────────

/// Ordered collection of unique elements.
#[derive(Debug, Clone, Default)]
pub struct SetValue {
    items: Vec<Value>,
}

impl SetValue {
    pub fn new() -> Self {
        SetValue::default()
    }

    /// Adds an element unless an equal one (same-value-zero) is present.
    pub fn add(&mut self, value: impl Into<Value>) {
        let value = value.into();
        if !self.items.iter().any(|item| item.same_value_zero(&value)) {
            self.items.push(value);
        }
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.iter().any(|item| item.same_value_zero(value))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }
}

impl<T: Into<Value>> FromIterator<T> for SetValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = SetValue::new();
        for item in iter {
            set.add(item);
        }
        set
    }
}
