//! The comparable value universe and its classification.
//!
//! Mirrors the runtime kinds upstream `everyequal` 2.2.1 distinguishes by
//! `Object.prototype.toString` tag: the primitives, the four shared
//! containers (sequences, keyed records, mappings, sets), and the leaf
//! object kinds. Shared containers sit behind `Rc<RefCell<..>>` so values
//! can alias and form cycles, which the comparator must survive.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::collections::{MapValue, SetValue};
use crate::leaf::{ErrorValue, NumericArray, OpaqueValue, Pattern};
use crate::record::Record;

// ── TypeTag ──────────────────────────────────────────────────────────────

/// Closed classification of a value's structural kind.
///
/// Every value maps to exactly one tag. The comparator dispatches on the
/// target's tag, and (coercion aside) rejects pairs whose tags differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Primitive,
    Sequence,
    Record,
    Mapping,
    Set,
    Date,
    Pattern,
    NumericArray,
    Buffer,
    ErrorLike,
    Opaque,
}

impl TypeTag {
    /// Every tag, in dispatch order.
    pub const ALL: [TypeTag; 11] = [
        TypeTag::Primitive,
        TypeTag::Sequence,
        TypeTag::Record,
        TypeTag::Mapping,
        TypeTag::Set,
        TypeTag::Date,
        TypeTag::Pattern,
        TypeTag::NumericArray,
        TypeTag::Buffer,
        TypeTag::ErrorLike,
        TypeTag::Opaque,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Primitive => "primitive",
            TypeTag::Sequence => "sequence",
            TypeTag::Record => "record",
            TypeTag::Mapping => "mapping",
            TypeTag::Set => "set",
            TypeTag::Date => "date",
            TypeTag::Pattern => "pattern",
            TypeTag::NumericArray => "numeric-array",
            TypeTag::Buffer => "buffer",
            TypeTag::ErrorLike => "error",
            TypeTag::Opaque => "opaque",
        }
    }
}

// ── ObjId ────────────────────────────────────────────────────────────────

/// Identity token of a shared container allocation.
///
/// Derived from the `Rc` allocation address: unique among containers that
/// are alive at the same time, which covers any one comparison over
/// borrowed inputs. Leaf values carry no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjId(usize);

// ── Value ────────────────────────────────────────────────────────────────

/// Any comparable runtime value.
///
/// Cloning a container variant clones the handle, not the contents; use
/// [`Value::deep_clone`] for a structural copy.
#[derive(Debug, Clone)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Arr(Rc<RefCell<Vec<Value>>>),
    Obj(Rc<RefCell<Record>>),
    Map(Rc<RefCell<MapValue>>),
    Set(Rc<RefCell<SetValue>>),
    Date(i64),
    Pattern(Pattern),
    NumArr(NumericArray),
    Bytes(Vec<u8>),
    Error(Rc<ErrorValue>),
    Opaque(Rc<RefCell<OpaqueValue>>),
}

impl Value {
    /// Fresh sequence.
    pub fn arr(items: Vec<Value>) -> Value {
        Value::Arr(Rc::new(RefCell::new(items)))
    }

    /// Fresh keyed record.
    pub fn obj(record: Record) -> Value {
        Value::Obj(Rc::new(RefCell::new(record)))
    }

    /// Fresh mapping.
    pub fn map(map: MapValue) -> Value {
        Value::Map(Rc::new(RefCell::new(map)))
    }

    /// Fresh set.
    pub fn set(set: SetValue) -> Value {
        Value::Set(Rc::new(RefCell::new(set)))
    }

    /// Date from a millisecond timestamp.
    pub fn date(ms: i64) -> Value {
        Value::Date(ms)
    }

    /// Byte buffer.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Value {
        Value::Bytes(data.into())
    }

    /// Error-like value.
    pub fn error(err: ErrorValue) -> Value {
        Value::Error(Rc::new(err))
    }

    /// Opaque foreign value.
    pub fn opaque(value: OpaqueValue) -> Value {
        Value::Opaque(Rc::new(RefCell::new(value)))
    }

    pub fn tag(&self) -> TypeTag {
        match self {
            Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_) => {
                TypeTag::Primitive
            }
            Value::Arr(_) => TypeTag::Sequence,
            Value::Obj(_) => TypeTag::Record,
            Value::Map(_) => TypeTag::Mapping,
            Value::Set(_) => TypeTag::Set,
            Value::Date(_) => TypeTag::Date,
            Value::Pattern(_) => TypeTag::Pattern,
            Value::NumArr(_) => TypeTag::NumericArray,
            Value::Bytes(_) => TypeTag::Buffer,
            Value::Error(_) => TypeTag::ErrorLike,
            Value::Opaque(_) => TypeTag::Opaque,
        }
    }

    /// True for the five primitive variants.
    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_)
        )
    }

    /// Identity token for shared containers; leaf values have none.
    pub fn obj_id(&self) -> Option<ObjId> {
        match self {
            Value::Arr(cell) => Some(ObjId(Rc::as_ptr(cell) as usize)),
            Value::Obj(cell) => Some(ObjId(Rc::as_ptr(cell) as usize)),
            Value::Map(cell) => Some(ObjId(Rc::as_ptr(cell) as usize)),
            Value::Set(cell) => Some(ObjId(Rc::as_ptr(cell) as usize)),
            Value::Opaque(cell) => Some(ObjId(Rc::as_ptr(cell) as usize)),
            _ => None,
        }
    }

    /// Same shared allocation on both sides.
    pub fn ref_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Arr(a), Value::Arr(b)) => Rc::ptr_eq(a, b),
            (Value::Obj(a), Value::Obj(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Set(a), Value::Set(b)) => Rc::ptr_eq(a, b),
            (Value::Error(a), Value::Error(b)) => Rc::ptr_eq(a, b),
            (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Host strict (`===`) equality: primitives by value, shared objects by
    /// identity. NaN is unequal to itself; positive and negative zero are
    /// equal. Leaf values built separately are never strictly equal, like
    /// separately constructed host objects.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => self.ref_eq(other),
        }
    }

    /// Strict equality with NaN equal to itself: the uniqueness relation of
    /// mapping keys and set elements.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self.strict_eq(other),
        }
    }

    /// Structural copy with fresh container allocations.
    ///
    /// Aliasing is preserved: a container reached through two paths is
    /// cloned once, so cyclic values clone into isomorphic cyclic values.
    pub fn deep_clone(&self) -> Value {
        let mut clones: HashMap<ObjId, Value> = HashMap::new();
        clone_value(self, &mut clones)
    }
}

fn clone_value(value: &Value, clones: &mut HashMap<ObjId, Value>) -> Value {
    let id = match value.obj_id() {
        Some(id) => id,
        None => return value.clone(),
    };
    if let Some(done) = clones.get(&id) {
        return done.clone();
    }
    match value {
        Value::Arr(cell) => {
            let fresh = Rc::new(RefCell::new(Vec::new()));
            clones.insert(id, Value::Arr(Rc::clone(&fresh)));
            let mut items = Vec::with_capacity(cell.borrow().len());
            for item in cell.borrow().iter() {
                items.push(clone_value(item, clones));
            }
            *fresh.borrow_mut() = items;
            Value::Arr(fresh)
        }
        Value::Obj(cell) => {
            let fresh = Rc::new(RefCell::new(Record::new()));
            clones.insert(id, Value::Obj(Rc::clone(&fresh)));
            let mut record = Record::new();
            for (key, prop) in cell.borrow().iter() {
                record.define(key.clone(), clone_value(&prop.value, clones), prop.descriptor);
            }
            *fresh.borrow_mut() = record;
            Value::Obj(fresh)
        }
        Value::Map(cell) => {
            let fresh = Rc::new(RefCell::new(MapValue::new()));
            clones.insert(id, Value::Map(Rc::clone(&fresh)));
            let mut map = MapValue::new();
            for (key, val) in cell.borrow().iter() {
                let key = clone_value(key, clones);
                let val = clone_value(val, clones);
                map.set(key, val);
            }
            *fresh.borrow_mut() = map;
            Value::Map(fresh)
        }
        Value::Set(cell) => {
            let fresh = Rc::new(RefCell::new(SetValue::new()));
            clones.insert(id, Value::Set(Rc::clone(&fresh)));
            let mut set = SetValue::new();
            for item in cell.borrow().iter() {
                set.add(clone_value(item, clones));
            }
            *fresh.borrow_mut() = set;
            Value::Set(fresh)
        }
        Value::Opaque(cell) => {
            let fresh = Rc::new(RefCell::new(OpaqueValue::default()));
            clones.insert(id, Value::Opaque(Rc::clone(&fresh)));
            let source = cell.borrow();
            let mut fields = Record::new();
            for (key, prop) in source.fields.iter() {
                fields.define(key.clone(), clone_value(&prop.value, clones), prop.descriptor);
            }
            *fresh.borrow_mut() = OpaqueValue {
                class: source.class.clone(),
                repr: source.repr.clone(),
                fields,
            };
            Value::Opaque(fresh)
        }
        _ => value.clone(),
    }
}

// ── Conversions ──────────────────────────────────────────────────────────

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value as f64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::arr(items.into_iter().map(Into::into).collect())
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::obj(record)
    }
}

impl From<MapValue> for Value {
    fn from(map: MapValue) -> Self {
        Value::map(map)
    }
}

impl From<SetValue> for Value {
    fn from(set: SetValue) -> Self {
        Value::set(set)
    }
}

impl From<Pattern> for Value {
    fn from(pattern: Pattern) -> Self {
        Value::Pattern(pattern)
    }
}

impl From<NumericArray> for Value {
    fn from(array: NumericArray) -> Self {
        Value::NumArr(array)
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::error(err)
    }
}

impl From<OpaqueValue> for Value {
    fn from(value: OpaqueValue) -> Self {
        Value::opaque(value)
    }
}
