//! Fast-reject signatures.
//!
//! Cheap derived strings that can only veto: matching signatures prove
//! nothing, mismatching signatures reject without walking pairs. Mirrors the
//! upstream one-level `flat()` joins, including the comma the mapping
//! variant uses. Callers suspend signatures whenever an ignore predicate is
//! resolved for the tag, since ignored entries may legitimately differ.

use everyequal_value::{join_text, Key, MapValue, Record, SetValue, Value};

/// One-level flatten, then join with the empty separator.
pub(crate) fn seq_signature(items: &[Value]) -> String {
    let mut out = String::new();
    for item in items {
        match item {
            Value::Arr(cell) => {
                for sub in cell.borrow().iter() {
                    out.push_str(&join_text(sub));
                }
            }
            _ => out.push_str(&join_text(item)),
        }
    }
    out
}

/// Enumerable string-keyed entries only, key text then value text, in
/// insertion order. Symbol keys never contribute.
pub(crate) fn record_signature(record: &Record) -> String {
    let mut out = String::new();
    for (key, prop) in record.iter() {
        if let Key::Str(name) = key {
            if prop.descriptor.enumerable {
                out.push_str(name);
                out.push_str(&join_text(&prop.value));
            }
        }
    }
    out
}

/// Entry pairs flattened and comma-joined.
pub(crate) fn map_signature(map: &MapValue) -> String {
    let mut parts = Vec::with_capacity(map.len() * 2);
    for (key, value) in map.iter() {
        parts.push(join_text(key));
        parts.push(join_text(value));
    }
    parts.join(",")
}

/// Elements joined with the empty separator.
pub(crate) fn set_signature(set: &SetValue) -> String {
    let mut out = String::new();
    for item in set.iter() {
        out.push_str(&join_text(item));
    }
    out
}
