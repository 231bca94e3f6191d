//! Keyed-record storage: insertion-ordered property bags with string and
//! symbol keys, each entry carrying a value and its attribute descriptor.
//!
//! Mirrors the own-property model upstream `everyequal` 2.2.1 enumerates
//! (`getOwnPropertyNames` plus `getOwnPropertySymbols`, descriptors via
//! `getOwnPropertyDescriptor`).

use std::sync::atomic::{AtomicU64, Ordering};

use indexmap::IndexMap;

use crate::value::Value;

// ── Symbol ───────────────────────────────────────────────────────────────

static NEXT_SYMBOL_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity token usable as a record key.
///
/// Every mint is distinct; clones of one mint are equal to each other and to
/// nothing else. The description does not participate in identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    id: u64,
    description: Option<String>,
}

impl Symbol {
    /// Mints a fresh described symbol.
    pub fn new(description: impl Into<String>) -> Self {
        Symbol {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: Some(description.into()),
        }
    }

    /// Mints a fresh symbol with no description.
    pub fn anonymous() -> Self {
        Symbol {
            id: NEXT_SYMBOL_ID.fetch_add(1, Ordering::Relaxed),
            description: None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

// ── Key ──────────────────────────────────────────────────────────────────

/// Record key: a plain string or a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Str(String),
    Sym(Symbol),
}

impl Key {
    pub fn is_symbol(&self) -> bool {
        matches!(self, Key::Sym(_))
    }

    /// Readable form of the key; symbol keys render their description.
    pub fn as_text(&self) -> &str {
        match self {
            Key::Str(name) => name,
            Key::Sym(sym) => sym.description().unwrap_or(""),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Str(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Str(name)
    }
}

impl From<Symbol> for Key {
    fn from(sym: Symbol) -> Self {
        Key::Sym(sym)
    }
}

// ── Descriptor ───────────────────────────────────────────────────────────

/// Property attributes carried by each record entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub configurable: bool,
    pub enumerable: bool,
    pub writable: bool,
}

impl Default for Descriptor {
    /// Ordinary assignment: every attribute set.
    fn default() -> Self {
        Descriptor {
            configurable: true,
            enumerable: true,
            writable: true,
        }
    }
}

impl Descriptor {
    /// Every attribute cleared.
    pub fn locked() -> Self {
        Descriptor {
            configurable: false,
            enumerable: false,
            writable: false,
        }
    }
}

/// A record entry: the stored value plus its attributes.
#[derive(Debug, Clone)]
pub struct Property {
    pub value: Value,
    pub descriptor: Descriptor,
}

// ── Record ───────────────────────────────────────────────────────────────

/// Insertion-ordered property bag.
///
/// Re-inserting an existing key replaces the value in place and keeps the
/// key's original position.
#[derive(Debug, Clone, Default)]
pub struct Record {
    entries: IndexMap<Key, Property>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    /// Inserts (or overwrites) a property with default attributes.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        self.define(key, value, Descriptor::default());
    }

    /// Inserts (or overwrites) a property with explicit attributes.
    pub fn define(&mut self, key: impl Into<Key>, value: impl Into<Value>, descriptor: Descriptor) {
        self.entries.insert(
            key.into(),
            Property {
                value: value.into(),
                descriptor,
            },
        );
    }

    pub fn get(&self, key: &Key) -> Option<&Property> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Property)> {
        self.entries.iter()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}
