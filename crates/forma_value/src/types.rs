//! Runtime type tags and the subtype relation.
//!
//! Every [`Value`](crate::Value) reports an exact runtime [`Type`] through
//! `Value::type_of`. Type constraints in patterns are checked by walking the
//! single-parent chain of that exact type, so the relation is a tree rooted
//! at [`Type::Any`]:
//!
//! ```text
//! Any
//! ├── None
//! ├── Number ── Int ── Bool
//! │          └─ Float
//! ├── Str
//! ├── BytesLike ── Bytes
//! │             └─ ByteArray
//! ├── Sequence ── List
//! │            └─ Tuple
//! ├── Set
//! ├── Map
//! └── <user classes, following their own parent chain>
//! ```

use std::fmt;
use std::sync::Arc;

/// A user-defined class for `Value::Object` subjects.
///
/// Classes form a single-inheritance tree. Two classes are the same class
/// when their names and parent chains agree.
#[derive(Debug, PartialEq, Eq)]
pub struct Class {
    name: String,
    parent: Option<Arc<Class>>,
}

impl Class {
    /// Create a root class (its only supertype is `Any`).
    pub fn new(name: impl Into<String>) -> Arc<Class> {
        Arc::new(Class {
            name: name.into(),
            parent: None,
        })
    }

    /// Create a class deriving from `parent`.
    pub fn subclass(parent: &Arc<Class>, name: impl Into<String>) -> Arc<Class> {
        Arc::new(Class {
            name: name.into(),
            parent: Some(Arc::clone(parent)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<Class>> {
        self.parent.as_ref()
    }

    /// Whether `self` is `ancestor` or derives from it.
    pub fn is_subclass_of(&self, ancestor: &Class) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if class == ancestor {
                return true;
            }
            current = class.parent.as_deref();
        }
        false
    }
}

/// Runtime type tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// Supertype of every value.
    Any,
    /// Type of the absent value.
    None,
    Bool,
    Int,
    Float,
    /// `Int`, `Float` and `Bool`.
    Number,
    Str,
    /// Immutable byte string.
    Bytes,
    /// Mutable-style byte buffer; equal to `Bytes` with the same contents.
    ByteArray,
    /// `Bytes` and `ByteArray`.
    BytesLike,
    List,
    Tuple,
    /// `List` and `Tuple`.
    Sequence,
    Set,
    Map,
    /// A user class; instances of subclasses also conform.
    Class(Arc<Class>),
}

impl Type {
    /// Immediate supertype, `None` only for `Any`.
    pub fn parent(&self) -> Option<Type> {
        let parent = match self {
            Type::Any => return None,
            Type::Bool => Type::Int,
            Type::Int | Type::Float => Type::Number,
            Type::Bytes | Type::ByteArray => Type::BytesLike,
            Type::List | Type::Tuple => Type::Sequence,
            Type::Class(class) => match class.parent() {
                Some(parent) => Type::Class(Arc::clone(parent)),
                None => Type::Any,
            },
            Type::None
            | Type::Number
            | Type::Str
            | Type::BytesLike
            | Type::Sequence
            | Type::Set
            | Type::Map => Type::Any,
        };
        Some(parent)
    }

    /// Whether `self` is `other` or one of its subtypes.
    pub fn is_subtype_of(&self, other: &Type) -> bool {
        if let (Type::Class(a), Type::Class(b)) = (self, other) {
            return a.is_subclass_of(b);
        }
        let mut current = Some(self.clone());
        while let Some(ty) = current {
            if &ty == other {
                return true;
            }
            current = ty.parent();
        }
        false
    }

    /// Human-readable name, as used in diagnostics and pattern display.
    pub fn name(&self) -> &str {
        match self {
            Type::Any => "any",
            Type::None => "none",
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Float => "float",
            Type::Number => "number",
            Type::Str => "str",
            Type::Bytes => "bytes",
            Type::ByteArray => "bytearray",
            Type::BytesLike => "byteslike",
            Type::List => "list",
            Type::Tuple => "tuple",
            Type::Sequence => "sequence",
            Type::Set => "set",
            Type::Map => "map",
            Type::Class(class) => class.name(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
