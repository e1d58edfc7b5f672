//! The matcher façade.
//!
//! A [`Matcher`] is created with a fixed number of variable slots and hands
//! out one [`Variable`] per slot. Each [`Matcher::invoke`] resets every slot,
//! matches, and on success leaves the captures in place:
//!
//! ```text
//! let (mut m, vars) = Matcher::with_variables(2);
//! let (status, body) = (vars[0], vars[1]);
//! let pattern = seq([status.with(ty(Type::Int)), body.with(ty(Type::BytesLike))]);
//!
//! if m.invoke(&pattern, &subject)? {
//!     println!("{:?} {:?}", status.value(&m), body.value(&m));
//! }
//! ```
//!
//! Two outcomes are kept apart: `Ok(false)` means the subject does not fit
//! and the caller may try another pattern; `Err(PatternError)` means the
//! pattern itself is malformed.

use forma_pattern::{Pattern, VarId};
use forma_value::Value;

use crate::bindings::BindingTable;
use crate::structural::Attempt;
use crate::PatternError;

/// Owns the binding table and the last-result flag.
///
/// Not shareable across concurrent invocations: each one rewrites the whole
/// table, hence `invoke` takes `&mut self`.
#[derive(Clone, Debug)]
pub struct Matcher {
    bindings: BindingTable,
    matched: bool,
}

impl Matcher {
    /// Create a matcher with `arity` variable slots.
    pub fn new(arity: u32) -> Self {
        Matcher {
            bindings: BindingTable::new(arity),
            matched: false,
        }
    }

    /// Create a matcher together with its variables, in declaration order.
    pub fn with_variables(arity: u32) -> (Self, Vec<Variable>) {
        let matcher = Matcher::new(arity);
        let vars = matcher.variables();
        (matcher, vars)
    }

    pub fn arity(&self) -> u32 {
        self.bindings.arity()
    }

    /// One handle per slot, in declaration order.
    pub fn variables(&self) -> Vec<Variable> {
        (0..self.arity())
            .map(|index| Variable {
                id: VarId::new(index),
            })
            .collect()
    }

    /// Match `subject` against `pattern`.
    ///
    /// Every slot is unbound first. On `Ok(true)` the captures of the
    /// successful attempt are committed; on `Ok(false)` or `Err` every slot
    /// stays unbound and [`is_match`](Self::is_match) reports `false`.
    pub fn invoke(&mut self, pattern: &Pattern, subject: &Value) -> Result<bool, PatternError> {
        self.bindings.reset();
        self.matched = false;

        let attempt = Attempt::new(pattern, self.arity())?;
        let mut trial = self.bindings.clone();
        let matched = attempt.attempt_match(pattern, subject, &mut trial);
        if matched {
            self.bindings = trial;
        }
        self.matched = matched;

        tracing::debug!(
            %pattern,
            matched,
            bound = self.bindings.bound_count(),
            "invoke"
        );
        Ok(matched)
    }

    /// Outcome of the most recent invocation; `false` before the first.
    pub fn is_match(&self) -> bool {
        self.matched
    }

    /// Every slot in declaration order, `None` marking an unbound slot.
    pub fn values(&self) -> Vec<Option<Value>> {
        self.bindings.values()
    }

    /// Value captured by `var` in the last successful invocation.
    pub fn get(&self, var: VarId) -> Option<&Value> {
        self.bindings.get(var)
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }
}

/// Handle to one of a matcher's variable slots.
///
/// Use it inside patterns with [`pat`](Self::pat) (captures anything) or
/// [`with`](Self::with) (captures a subject matching a sub-pattern).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    id: VarId,
}

impl Variable {
    pub fn id(self) -> VarId {
        self.id
    }

    /// Unconstrained reference to this variable.
    pub fn pat(self) -> Pattern {
        forma_pattern::var(self.id)
    }

    /// Reference to this variable constrained by `sub`.
    pub fn with(self, sub: Pattern) -> Pattern {
        forma_pattern::var_with(self.id, sub)
    }

    /// Value this variable captured in `matcher`'s last successful invocation.
    pub fn value(self, matcher: &Matcher) -> Option<&Value> {
        matcher.get(self.id)
    }
}

impl From<Variable> for Pattern {
    fn from(var: Variable) -> Self {
        var.pat()
    }
}
