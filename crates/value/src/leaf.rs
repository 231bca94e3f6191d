//! Leaf object payloads: patterns, fixed-width numeric arrays, error-like
//! values, and opaque foreign values.
//!
//! These are the object kinds the comparator resolves by value rather than
//! by walking entries; they never participate in cycles.

use regex::Regex;
use thiserror::Error;

use crate::record::Record;

// ── Pattern ──────────────────────────────────────────────────────────────

/// Pattern construction failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("unknown pattern flag `{0}`")]
    UnknownFlag(char),
    #[error("duplicate pattern flag `{0}`")]
    DuplicateFlag(char),
    #[error("pattern failed to compile: {0}")]
    BadSource(String),
}

const PATTERN_FLAGS: &str = "dgimsuvy";

/// Textual match pattern: source expression plus flags, kept verbatim.
///
/// Equality is structural over both fields, the relation the comparator
/// applies to the pattern kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    flags: String,
}

impl Pattern {
    /// Builds a pattern, validating the flags and compiling the source.
    ///
    /// Flags must be drawn from `dgimsuvy` without repetition. The source is
    /// compile-checked and then stored as text.
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Result<Self, PatternError> {
        let source = source.into();
        let flags = flags.into();
        let mut used = [false; PATTERN_FLAGS.len()];
        for flag in flags.chars() {
            match PATTERN_FLAGS.find(flag) {
                Some(i) if used[i] => return Err(PatternError::DuplicateFlag(flag)),
                Some(i) => used[i] = true,
                None => return Err(PatternError::UnknownFlag(flag)),
            }
        }
        if let Err(err) = Regex::new(&source) {
            return Err(PatternError::BadSource(err.to_string()));
        }
        Ok(Pattern { source, flags })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }
}

// ── NumericArray ─────────────────────────────────────────────────────────

/// Fixed-width numeric array, one variant per element kind.
///
/// Arrays of different element kinds are different kinds of value and never
/// compare equal, whatever their numeric content. The derived equality is
/// element-wise, so float arrays holding NaN are unequal to themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericArray {
    I8(Vec<i8>),
    U8(Vec<u8>),
    I16(Vec<i16>),
    U16(Vec<u16>),
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl NumericArray {
    pub fn len(&self) -> usize {
        match self {
            NumericArray::I8(items) => items.len(),
            NumericArray::U8(items) => items.len(),
            NumericArray::I16(items) => items.len(),
            NumericArray::U16(items) => items.len(),
            NumericArray::I32(items) => items.len(),
            NumericArray::U32(items) => items.len(),
            NumericArray::I64(items) => items.len(),
            NumericArray::U64(items) => items.len(),
            NumericArray::F32(items) => items.len(),
            NumericArray::F64(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element kind name, spelled the way upstream type tags spell it.
    pub fn kind(&self) -> &'static str {
        match self {
            NumericArray::I8(_) => "Int8Array",
            NumericArray::U8(_) => "Uint8Array",
            NumericArray::I16(_) => "Int16Array",
            NumericArray::U16(_) => "Uint16Array",
            NumericArray::I32(_) => "Int32Array",
            NumericArray::U32(_) => "Uint32Array",
            NumericArray::I64(_) => "BigInt64Array",
            NumericArray::U64(_) => "BigUint64Array",
            NumericArray::F32(_) => "Float32Array",
            NumericArray::F64(_) => "Float64Array",
        }
    }
}

// ── ErrorValue ───────────────────────────────────────────────────────────

/// Error-like value: class identity plus name, message, and captured trace.
///
/// Equality spans all four fields; a missing trace on one side only is a
/// mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    pub constructor: String,
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
}

impl ErrorValue {
    /// Error whose `name` matches the constructor, with no trace.
    pub fn new(constructor: impl Into<String>, message: impl Into<String>) -> Self {
        let constructor = constructor.into();
        ErrorValue {
            name: constructor.clone(),
            constructor,
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

// ── OpaqueValue ──────────────────────────────────────────────────────────

/// Foreign value the comparator has no structural procedure for.
///
/// `class` names the constructor (`None` models a plain bag with no class or
/// behavior at all). `repr` is the textual form the value exposes, if any.
/// `fields` holds own properties; they are only walked structurally when
/// both sides are plain bags.
#[derive(Debug, Clone, Default)]
pub struct OpaqueValue {
    pub class: Option<String>,
    pub repr: Option<String>,
    pub fields: Record,
}

impl OpaqueValue {
    /// Opaque instance of a named class.
    pub fn of_class(class: impl Into<String>) -> Self {
        OpaqueValue {
            class: Some(class.into()),
            repr: None,
            fields: Record::new(),
        }
    }

    /// Plain bag with no class identity.
    pub fn plain() -> Self {
        OpaqueValue::default()
    }

    pub fn with_repr(mut self, repr: impl Into<String>) -> Self {
        self.repr = Some(repr.into());
        self
    }

    pub fn with_fields(mut self, fields: Record) -> Self {
        self.fields = fields;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_accepts_known_flags_once() {
        let pattern = Pattern::new("a+b", "gi").unwrap();
        assert_eq!(pattern.source(), "a+b");
        assert_eq!(pattern.flags(), "gi");
        assert_eq!(Pattern::new("x", "q"), Err(PatternError::UnknownFlag('q')));
        assert_eq!(Pattern::new("x", "gg"), Err(PatternError::DuplicateFlag('g')));
    }

    #[test]
    fn pattern_rejects_bad_source() {
        assert!(matches!(
            Pattern::new("a(", ""),
            Err(PatternError::BadSource(_))
        ));
    }

    #[test]
    fn pattern_equality_covers_source_and_flags() {
        let a = Pattern::new("x+", "g").unwrap();
        let b = Pattern::new("x+", "g").unwrap();
        let c = Pattern::new("x+", "i").unwrap();
        let d = Pattern::new("x*", "g").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn numeric_array_kind_gates_equality() {
        let a = NumericArray::I32(vec![1, 2, 3]);
        let b = NumericArray::I32(vec![1, 2, 3]);
        let c = NumericArray::U32(vec![1, 2, 3]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.kind(), "Int32Array");
        assert_eq!(c.kind(), "Uint32Array");
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn numeric_array_nan_is_unequal_to_itself() {
        let a = NumericArray::F64(vec![f64::NAN]);
        assert_ne!(a.clone(), a);
        let b = NumericArray::F32(vec![f32::NAN]);
        assert_ne!(b.clone(), b);
    }

    #[test]
    fn error_value_equality_includes_stack() {
        let plain = ErrorValue::new("TypeError", "bad input");
        assert_eq!(plain.name, "TypeError");
        assert_eq!(plain, ErrorValue::new("TypeError", "bad input"));
        assert_ne!(plain, plain.clone().with_stack("at main"));
        assert_ne!(plain, ErrorValue::new("RangeError", "bad input"));
        assert_ne!(
            plain,
            ErrorValue::new("TypeError", "bad input").with_name("CustomError")
        );
    }

    #[test]
    fn opaque_builders() {
        let plain = OpaqueValue::plain();
        assert!(plain.class.is_none());
        let tagged = OpaqueValue::of_class("URL").with_repr("https://example.com/");
        assert_eq!(tagged.class.as_deref(), Some("URL"));
        assert_eq!(tagged.repr.as_deref(), Some("https://example.com/"));
    }
}
