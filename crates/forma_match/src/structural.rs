//! The structural matcher.
//!
//! One [`Attempt`] covers one invocation: it holds the constraints recorded
//! for the pattern and recursively decides whether a subject conforms,
//! writing captures into the binding table it is handed.
//!
//! # Rules
//!
//! | Pattern            | Succeeds when                                          |
//! |--------------------|--------------------------------------------------------|
//! | `Literal(v)`       | `subject == v`                                         |
//! | `TypeConstraint(T)`| the subject's type is `T` or a subtype                 |
//! | `Sequence(ps)`     | subject is a list/tuple of `len(ps)`, element-wise     |
//! | `Collection(ps)`   | assignment search over the set's elements              |
//! | `Mapping(es)`      | assignment search over the map's pairs                 |
//! | `VarRef(x, _)`     | unbound: x's constraint matches, then bind x           |
//! |                    | bound: `subject == value of x` (backreference)         |
//!
//! A failed attempt may leave captures in the table it was given. Callers
//! hand in a scratch copy and keep it only on success.

use forma_pattern::{Pattern, VarId};
use forma_value::Value;

use crate::assignment::AssignmentSearch;
use crate::bindings::{BindingTable, Constraints};
use crate::stack::ensure_sufficient_stack;
use crate::PatternError;

pub(crate) struct Attempt<'p> {
    constraints: Constraints<'p>,
}

impl<'p> Attempt<'p> {
    /// Prepare an attempt at `pattern` for a matcher with `arity` variables.
    pub(crate) fn new(pattern: &'p Pattern, arity: u32) -> Result<Self, PatternError> {
        Ok(Attempt {
            constraints: Constraints::collect(pattern, arity)?,
        })
    }

    /// Whether `subject` conforms to `pattern`, capturing into `bindings`.
    pub(crate) fn attempt_match(
        &self,
        pattern: &Pattern,
        subject: &Value,
        bindings: &mut BindingTable,
    ) -> bool {
        ensure_sufficient_stack(|| self.attempt_match_inner(pattern, subject, bindings))
    }

    fn attempt_match_inner(
        &self,
        pattern: &Pattern,
        subject: &Value,
        bindings: &mut BindingTable,
    ) -> bool {
        match pattern {
            Pattern::Literal(expected) => subject == expected,

            Pattern::TypeConstraint(ty) => subject.is_instance(ty),

            Pattern::Sequence(items) => match subject.as_sequence() {
                Some(elements) if elements.len() == items.len() => items
                    .iter()
                    .zip(elements)
                    .all(|(item, element)| self.attempt_match(item, element, bindings)),
                _ => false,
            },

            Pattern::Collection(entries) => match subject.as_set() {
                Some(elements) => AssignmentSearch::new(
                    entries.as_slice(),
                    elements,
                    |entry: &Pattern, element: &Value, table: &mut BindingTable| {
                        self.attempt_match(entry, element, table)
                    },
                )
                .run(bindings),
                None => false,
            },

            Pattern::Mapping(entries) => match subject.as_map() {
                Some(pairs) => AssignmentSearch::new(
                    entries.as_slice(),
                    pairs,
                    |(key_pat, value_pat): &(Pattern, Pattern),
                     (key, value): &(Value, Value),
                     table: &mut BindingTable| {
                        self.attempt_match(key_pat, key, table)
                            && self.attempt_match(value_pat, value, table)
                    },
                )
                .run(bindings),
                None => false,
            },

            Pattern::VarRef { var, .. } => self.match_var(*var, subject, bindings),
        }
    }

    /// Bind `var` on first use, compare on every later use.
    ///
    /// The constraint checked on first use is the one recorded for the whole
    /// pattern, so it does not matter which occurrence is reached first.
    fn match_var(&self, var: VarId, subject: &Value, bindings: &mut BindingTable) -> bool {
        if let Some(bound) = bindings.get(var) {
            return bound == subject;
        }
        if let Some(constraint) = self.constraints.get(var) {
            if !self.attempt_match(constraint, subject, bindings) {
                return false;
            }
            // The constraint may itself mention `var`.
            if let Some(bound) = bindings.get(var) {
                return bound == subject;
            }
        }
        tracing::trace!(%var, %subject, "bind");
        bindings.bind(var, subject.clone());
        true
    }
}

#[cfg(test)]
mod tests;
