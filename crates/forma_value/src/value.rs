//! Subject values.
//!
//! # Heap Enforcement
//!
//! Heap payloads are wrapped in [`Heap<T>`], whose constructor is private to
//! this crate. Build values through the factory methods:
//!
//! ```text
//! let s = Value::string("hello");                         // OK
//! let set = Value::set(vec![Value::int(1)]);              // OK, deduplicated
//! let map = Value::map(vec![(Value::string("k"), v)]);    // OK, keys distinct
//! ```
//!
//! # Equality
//!
//! `PartialEq` is *value* equality: `Bool`, `Int` and `Float` compare by
//! numeric value, `Bytes` equals `ByteArray` with the same contents, and sets
//! and maps compare without regard to order. [`Value::strict_eq`] compares
//! tag and payload exactly.

use std::fmt;
use std::sync::Arc;

use crate::heap::Heap;
use crate::types::{Class, Type};

/// Instance of a user [`Class`] with named fields.
#[derive(Debug, PartialEq)]
pub struct ObjectValue {
    pub class: Arc<Class>,
    pub fields: Vec<(String, Value)>,
}

impl ObjectValue {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

/// A structured subject value.
#[derive(Clone)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// The absent value.
    None,
    Bool(bool),
    Int(i64),
    Float(f64),

    // Heap types
    Str(Heap<String>),
    Bytes(Heap<Vec<u8>>),
    ByteArray(Heap<Vec<u8>>),
    List(Heap<Vec<Value>>),
    Tuple(Heap<Vec<Value>>),
    /// Distinct elements in insertion order.
    Set(Heap<Vec<Value>>),
    /// Distinct keys in insertion order.
    Map(Heap<Vec<(Value, Value)>>),
    Object(Heap<ObjectValue>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(Heap::new(b.into()))
    }

    #[inline]
    pub fn byte_array(b: impl Into<Vec<u8>>) -> Self {
        Value::ByteArray(Heap::new(b.into()))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    #[inline]
    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(items))
    }

    /// Create a set value.
    ///
    /// Elements equal to an earlier element are dropped, so `{1, 1.0, true}`
    /// collapses to `{1}`.
    pub fn set(items: Vec<Value>) -> Self {
        let mut distinct: Vec<Value> = Vec::with_capacity(items.len());
        for item in items {
            if !distinct.contains(&item) {
                distinct.push(item);
            }
        }
        Value::Set(Heap::new(distinct))
    }

    /// Create a map value.
    ///
    /// A key equal to an earlier key replaces that entry's value in place.
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        let mut distinct: Vec<(Value, Value)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match distinct.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => distinct.push((key, value)),
            }
        }
        Value::Map(Heap::new(distinct))
    }

    /// Create an instance of `class`.
    pub fn object(class: &Arc<Class>, fields: Vec<(String, Value)>) -> Self {
        Value::Object(Heap::new(ObjectValue {
            class: Arc::clone(class),
            fields,
        }))
    }
}

// Value Methods

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer payload; `Bool` is an integer subtype and converts too.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Contents of `Bytes` or `ByteArray`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) | Value::ByteArray(b) => Some(b),
            _ => None,
        }
    }

    /// Elements of an ordered, indexable subject (`List` or `Tuple`).
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&[Value]> {
        match self {
            Value::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Exact runtime type.
    pub fn type_of(&self) -> Type {
        match self {
            Value::None => Type::None,
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Float(_) => Type::Float,
            Value::Str(_) => Type::Str,
            Value::Bytes(_) => Type::Bytes,
            Value::ByteArray(_) => Type::ByteArray,
            Value::List(_) => Type::List,
            Value::Tuple(_) => Type::Tuple,
            Value::Set(_) => Type::Set,
            Value::Map(_) => Type::Map,
            Value::Object(obj) => Type::Class(Arc::clone(&obj.class)),
        }
    }

    /// Whether this value is an instance of `ty` or one of its subtypes.
    pub fn is_instance(&self, ty: &Type) -> bool {
        self.type_of().is_subtype_of(ty)
    }

    /// Exact equality: same tag and payload, no numeric or bytes coercion.
    ///
    /// Container elements are compared strictly too. Sets and maps remain
    /// order-independent.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) | (Value::ByteArray(a), Value::ByteArray(b)) => {
                a == b
            }
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.strict_eq(y))
            }
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| x.strict_eq(y)))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(ka, va)| {
                        b.iter()
                            .any(|(kb, vb)| ka.strict_eq(kb) && va.strict_eq(vb))
                    })
            }
            (Value::Object(a), Value::Object(b)) => {
                a.class == b.class
                    && a.fields.len() == b.fields.len()
                    && a.fields
                        .iter()
                        .zip(b.fields.iter())
                        .all(|((na, va), (nb, vb))| na == nb && va.strict_eq(vb))
            }
            _ => false,
        }
    }
}

/// Numeric value equality across `Int` and `Float`.
///
/// Exact: `i64::MAX` is not equal to the float it rounds to.
fn int_eq_float(i: i64, f: f64) -> bool {
    // 2^63 as f64; every finite float strictly inside (-2^63, 2^63) with no
    // fractional part converts to i64 without loss.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "range and fraction are checked before the cast"
    )]
    let converted = f as i64;
    f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) && converted == i
}

// Trait Implementations

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(b), Value::Int(i)) | (Value::Int(i), Value::Bool(b)) => {
                i64::from(*b) == *i
            }
            (Value::Int(i), Value::Float(f)) | (Value::Float(f), Value::Int(i)) => {
                int_eq_float(*i, *f)
            }
            (Value::Bool(b), Value::Float(f)) | (Value::Float(f), Value::Bool(b)) => {
                int_eq_float(i64::from(*b), *f)
            }
            (Value::Str(a), Value::Str(b)) => a == b,
            (
                Value::Bytes(a) | Value::ByteArray(a),
                Value::Bytes(b) | Value::ByteArray(b),
            ) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => {
                a.len() == b.len() && a.iter().all(|x| b.contains(x))
            }
            (Value::Map(a), Value::Map(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(ka, va)| {
                        b.iter().any(|(kb, vb)| ka == kb && va == vb)
                    })
            }
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(n) => write!(f, "Float({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Bytes(b) => write!(f, "Bytes({})", EscapedBytes(b)),
            Value::ByteArray(b) => write!(f, "ByteArray({})", EscapedBytes(b)),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Tuple(items) => write!(f, "Tuple({:?})", &**items),
            Value::Set(items) => write!(f, "Set({:?})", &**items),
            Value::Map(entries) => write!(f, "Map({:?})", &**entries),
            Value::Object(obj) => {
                write!(f, "Object({}, {:?})", obj.class.name(), obj.fields)
            }
        }
    }
}

/// Writes `b"..."` with non-printable bytes escaped.
struct EscapedBytes<'a>(&'a [u8]);

impl fmt::Display for EscapedBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b\"")?;
        for &byte in self.0 {
            write!(f, "{}", std::ascii::escape_default(byte))?;
        }
        write!(f, "\"")
    }
}

/// Write `items` separated by `, `.
fn write_joined<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Str(s) => write!(f, "{:?}", &**s),
            Value::Bytes(b) => write!(f, "{}", EscapedBytes(b)),
            Value::ByteArray(b) => write!(f, "bytearray({})", EscapedBytes(b)),
            Value::List(items) => {
                write!(f, "[")?;
                write_joined(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_joined(f, items)?;
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Value::Set(items) => {
                if items.is_empty() {
                    return write!(f, "set()");
                }
                write!(f, "{{")?;
                write_joined(f, items)?;
                write!(f, "}}")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Object(obj) => {
                write!(f, "{}(", obj.class.name())?;
                for (i, (name, value)) in obj.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}={value}")?;
                }
                write!(f, ")")
            }
        }
    }
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::bytes(b)
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(b: &[u8; N]) -> Self {
        Value::bytes(b.as_slice())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

#[cfg(test)]
mod tests;
