//! Leaf-kind equality: dates, patterns, numeric arrays, buffers, errors.
//!
//! These kinds resolve by value in one step; they never recurse and never
//! touch the visited table.

use everyequal_value::Value;

/// Millisecond timestamps decide; invalid dates cannot occur in the model.
pub(crate) fn date_equal(target: &Value, source: &Value) -> bool {
    let (Value::Date(a), Value::Date(b)) = (target, source) else {
        return false;
    };
    a == b
}

/// Source expression and flags, both verbatim.
pub(crate) fn pattern_equal(target: &Value, source: &Value) -> bool {
    let (Value::Pattern(a), Value::Pattern(b)) = (target, source) else {
        return false;
    };
    a == b
}

/// Same element kind, same length, element-wise equality. Float arrays
/// holding NaN are unequal to everything, themselves included.
pub(crate) fn numeric_array_equal(target: &Value, source: &Value) -> bool {
    let (Value::NumArr(a), Value::NumArr(b)) = (target, source) else {
        return false;
    };
    a == b
}

/// Byte-wise.
pub(crate) fn bytes_equal(target: &Value, source: &Value) -> bool {
    let (Value::Bytes(a), Value::Bytes(b)) = (target, source) else {
        return false;
    };
    a == b
}

/// Constructor, name, message, and captured trace must all agree.
pub(crate) fn error_equal(target: &Value, source: &Value) -> bool {
    let (Value::Error(a), Value::Error(b)) = (target, source) else {
        return false;
    };
    a == b
}
