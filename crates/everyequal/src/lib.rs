//! everyequal - Configurable deep-equality comparison for runtime values.
//!
//! Rust port of the upstream `everyequal` 2.2.1 JavaScript library: a
//! type-aware structural comparator with per-kind configuration, declared
//! cross-type coercions, caller extension points, and cycle-safe recursion.
//!
//! ```
//! use everyequal::{every_equal, val};
//!
//! let a = val!({ "id": 1, "tags": ["x", "y"] });
//! let b = val!({ "id": 1, "tags": ["x", "y"] });
//! assert!(every_equal(&a, &b));
//! ```
//!
//! Equality is decided per kind: sequences pairwise, keyed records over the
//! union of own keys, mappings positionally, sets by greedy existential
//! matching, and the leaf kinds (dates, patterns, numeric arrays, buffers,
//! errors) by value. [`Config`] adjusts the walk per [`TypeTag`]: recursion
//! toggle and ceiling, skip predicates, coercions, and opaque-value
//! handlers:
//!
//! ```
//! use everyequal::{every_equal_with, val, Config, EntryKey, Key};
//!
//! let a = val!({ "id": 1, "timestamp": 100 });
//! let b = val!({ "id": 1, "timestamp": 999 });
//! let config = Config::new().with_ignore(|key, _, _, _| {
//!     matches!(key, EntryKey::Prop(Key::Str(name)) if name == "timestamp")
//! });
//! assert!(every_equal_with(&a, &b, &config));
//! ```

mod compare;
mod config;
mod containers;
mod leaf;
mod signature;
mod visited;

pub use config::{CoerceFn, Coercion, Config, EntryKey, HandlerFn, IgnoreFn, MaxDepth, TagOptions};
pub use everyequal_value::{
    format_number, join_text, parse_date_ms, to_bool, to_date_ms, to_number, val, Descriptor,
    ErrorValue, Key, MapValue, NumericArray, ObjId, OpaqueValue, Pattern, PatternError, Property,
    Record, SetValue, Symbol, TypeTag, Value,
};

use crate::visited::VisitedPairs;

/// Compares two values under the default configuration.
pub fn every_equal(target: &Value, source: &Value) -> bool {
    every_equal_with(target, source, &Config::default())
}

/// Compares two values under `config`.
///
/// The configuration is resolved once up front and the call owns a fresh
/// visited-pair table, so no state crosses calls.
pub fn every_equal_with(target: &Value, source: &Value, config: &Config) -> bool {
    let resolved = config.resolve();
    let mut visited = VisitedPairs::new();
    compare::compare(target, source, &resolved, &mut visited, 0)
}
