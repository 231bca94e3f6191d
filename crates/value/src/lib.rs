//! everyequal-value - Runtime value model for everyequal-rs.
//!
//! The value universe upstream `everyequal` 2.2.1 compares: the primitives,
//! the four shared containers (sequences, keyed records, mappings, sets),
//! and the leaf object kinds (dates, patterns, fixed-width numeric arrays,
//! byte buffers, error-like values, opaque foreign values).
//!
//! Shared containers are reference-counted with interior mutability so
//! values can alias and form cycles. [`Value::strict_eq`] and
//! [`Value::same_value_zero`] carry the host equality relations the
//! comparator builds on, and the [`val!`] macro builds literals:
//!
//! ```
//! use everyequal_value::val;
//!
//! let v = val!({ "id": 7, "tags": ["a", "b"], "parent": null });
//! assert_eq!(v.to_string(), "[object Object]");
//! ```

mod collections;
mod leaf;
mod macros;
mod record;
mod text;
mod value;

pub use collections::{MapValue, SetValue};
pub use leaf::{ErrorValue, NumericArray, OpaqueValue, Pattern, PatternError};
pub use record::{Descriptor, Key, Property, Record, Symbol};
pub use text::{format_number, join_text, parse_date_ms, to_bool, to_date_ms, to_number};
pub use value::{ObjId, TypeTag, Value};
