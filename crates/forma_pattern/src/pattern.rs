//! The pattern tree.

use std::fmt;

use forma_value::{Type, Value};
use smallvec::SmallVec;

use crate::VarId;

/// A node of an immutable pattern tree.
///
/// Patterns own no matching state. One pattern can be matched any number of
/// times, by any number of matchers, from any number of threads.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Matches a subject equal to the value (`Value::None` matches only the
    /// absent value).
    Literal(Value),
    /// Matches a subject whose runtime type is the type or a subtype of it.
    TypeConstraint(Type),
    /// Matches a `List` or `Tuple` of exactly this length, element-wise.
    Sequence(Vec<Pattern>),
    /// Matches a `Set` in which every entry claims a distinct element.
    /// Extra elements are permitted.
    Collection(Vec<Pattern>),
    /// Matches a `Map` in which every `(key, value)` entry claims a distinct
    /// pair. Extra pairs are permitted.
    Mapping(Vec<(Pattern, Pattern)>),
    /// Binds or back-references a variable. `sub: None` matches anything.
    VarRef { var: VarId, sub: Option<Box<Pattern>> },
}

impl Pattern {
    /// Structural identity.
    ///
    /// Literals compare with [`Value::strict_eq`], so `1` and `1.0` are
    /// different patterns even though they match the same subjects.
    /// Entry order inside `Collection` and `Mapping` is irrelevant.
    pub fn is_identical(&self, other: &Pattern) -> bool {
        match (self, other) {
            (Pattern::Literal(a), Pattern::Literal(b)) => a.strict_eq(b),
            (Pattern::TypeConstraint(a), Pattern::TypeConstraint(b)) => a == b,
            (Pattern::Sequence(a), Pattern::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_identical(y))
            }
            (Pattern::Collection(a), Pattern::Collection(b)) => {
                same_entries(a, b, Pattern::is_identical)
            }
            (Pattern::Mapping(a), Pattern::Mapping(b)) => {
                same_entries(a, b, |(ka, va): &(Pattern, Pattern), (kb, vb)| {
                    ka.is_identical(kb) && va.is_identical(vb)
                })
            }
            (
                Pattern::VarRef { var: va, sub: sa },
                Pattern::VarRef { var: vb, sub: sb },
            ) => va == vb && same_constraint(sa.as_deref(), sb.as_deref()),
            _ => false,
        }
    }

    /// Distinct variables referenced anywhere in the tree, in first
    /// occurrence order (depth-first, left to right).
    pub fn variables(&self) -> Vec<VarId> {
        let mut vars = Vec::new();
        self.for_each_var_ref(&mut |var, _| {
            if !vars.contains(&var) {
                vars.push(var);
            }
        });
        vars
    }

    /// Visit every `VarRef` in the tree, including those nested inside
    /// another variable's sub-pattern.
    pub fn for_each_var_ref<'p, F>(&'p self, f: &mut F)
    where
        F: FnMut(VarId, Option<&'p Pattern>),
    {
        match self {
            Pattern::Literal(_) | Pattern::TypeConstraint(_) => {}
            Pattern::Sequence(items) | Pattern::Collection(items) => {
                for item in items {
                    item.for_each_var_ref(f);
                }
            }
            Pattern::Mapping(entries) => {
                for (key, value) in entries {
                    key.for_each_var_ref(f);
                    value.for_each_var_ref(f);
                }
            }
            Pattern::VarRef { var, sub } => {
                f(*var, sub.as_deref());
                if let Some(sub) = sub {
                    sub.for_each_var_ref(f);
                }
            }
        }
    }
}

/// Whether two optional sub-patterns are the same constraint.
pub fn same_constraint(a: Option<&Pattern>, b: Option<&Pattern>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.is_identical(b),
        _ => false,
    }
}

/// Multiset equality of two entry lists under `same`.
fn same_entries<T>(a: &[T], b: &[T], same: impl Fn(&T, &T) -> bool) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut used: SmallVec<[bool; 8]> = SmallVec::from_elem(false, b.len());
    a.iter().all(|x| {
        let found = b
            .iter()
            .enumerate()
            .find(|&(i, y)| !used[i] && same(x, y))
            .map(|(i, _)| i);
        match found {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

/// Write `items` separated by `, `.
fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Pattern]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(value) => write!(f, "{value}"),
            Pattern::TypeConstraint(ty) => write!(f, "{ty}"),
            Pattern::Sequence(items) => {
                write!(f, "[")?;
                write_joined(f, items)?;
                write!(f, "]")
            }
            Pattern::Collection(items) => {
                write!(f, "{{")?;
                write_joined(f, items)?;
                write!(f, "}}")
            }
            Pattern::Mapping(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Pattern::VarRef { var, sub: None } => write!(f, "{var}"),
            Pattern::VarRef { var, sub: Some(sub) } => write!(f, "{var}[{sub}]"),
        }
    }
}
