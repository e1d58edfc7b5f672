//! Pattern construction API.
//!
//! Patterns are written with these functions rather than literal container
//! syntax:
//!
//! ```text
//! // (int, body[byteslike])
//! seq([ty(Type::Int), var_with(body, ty(Type::BytesLike))])
//!
//! // {ct[str]: body[byteslike]}
//! map([(var_with(ct, ty(Type::Str)), var_with(body, ty(Type::BytesLike)))])
//! ```

use forma_value::{Type, Value};

use crate::{Pattern, VarId};

/// Match a subject equal to `value`.
pub fn lit(value: impl Into<Value>) -> Pattern {
    Pattern::Literal(value.into())
}

/// Match only the absent value.
pub fn none() -> Pattern {
    Pattern::Literal(Value::None)
}

/// Match any instance of `ty` or its subtypes.
pub fn ty(ty: Type) -> Pattern {
    Pattern::TypeConstraint(ty)
}

/// Match a list or tuple element-wise, with exactly this length.
pub fn seq(items: impl IntoIterator<Item = Pattern>) -> Pattern {
    Pattern::Sequence(items.into_iter().collect())
}

/// Match a set containing a distinct element for every entry.
pub fn set(items: impl IntoIterator<Item = Pattern>) -> Pattern {
    Pattern::Collection(items.into_iter().collect())
}

/// Match a map containing a distinct pair for every `(key, value)` entry.
pub fn map(entries: impl IntoIterator<Item = (Pattern, Pattern)>) -> Pattern {
    Pattern::Mapping(entries.into_iter().collect())
}

/// Capture anything into `var`, or back-reference it.
pub fn var(var: VarId) -> Pattern {
    Pattern::VarRef { var, sub: None }
}

/// Capture into `var` a subject matching `sub`.
pub fn var_with(var: VarId, sub: Pattern) -> Pattern {
    Pattern::VarRef {
        var,
        sub: Some(Box::new(sub)),
    }
}

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Pattern::Literal(value)
    }
}

impl From<Type> for Pattern {
    fn from(ty: Type) -> Self {
        Pattern::TypeConstraint(ty)
    }
}
