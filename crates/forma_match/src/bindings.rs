//! Per-matcher binding state.
//!
//! The [`BindingTable`] holds one `Unbound | Bound(value)` slot per declared
//! variable, indexed by [`VarId`]. [`Constraints`] holds the sub-pattern
//! recorded for each variable during a single attempt; it borrows from the
//! pattern being matched and is dropped when the attempt ends.

use forma_pattern::{Pattern, VarId};
use forma_value::Value;

use crate::PatternError;

/// Fixed-size table of variable slots.
///
/// Cloning is cheap (values share their heap payloads), which is what the
/// assignment search relies on for its per-branch scratch copies.
#[derive(Clone, Debug, PartialEq)]
pub struct BindingTable {
    slots: Vec<Option<Value>>,
}

impl BindingTable {
    /// A table of `arity` unbound slots.
    pub fn new(arity: u32) -> Self {
        BindingTable {
            slots: vec![None; arity as usize],
        }
    }

    pub fn arity(&self) -> u32 {
        // `new` is the only constructor, so the length always fits.
        u32::try_from(self.slots.len()).unwrap_or(u32::MAX)
    }

    /// Bound value of `var`, `None` while unbound.
    pub fn get(&self, var: VarId) -> Option<&Value> {
        self.slots.get(var.index()).and_then(Option::as_ref)
    }

    pub fn is_bound(&self, var: VarId) -> bool {
        self.get(var).is_some()
    }

    /// Number of bound slots.
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Snapshot of every slot in declaration order.
    pub fn values(&self) -> Vec<Option<Value>> {
        self.slots.clone()
    }

    /// Unbind every slot.
    pub fn reset(&mut self) {
        self.slots.fill(None);
    }

    /// Bind `var`. Ids are validated against the arity before any attempt
    /// starts, so an out-of-range id here is ignored.
    pub(crate) fn bind(&mut self, var: VarId, value: Value) {
        if let Some(slot) = self.slots.get_mut(var.index()) {
            *slot = Some(value);
        }
    }
}

/// Sub-pattern recorded for each variable during one attempt.
///
/// Built by a pass over the whole pattern before any subject element is
/// looked at, so malformed patterns are rejected whatever the subject.
#[derive(Debug)]
pub(crate) struct Constraints<'p> {
    slots: Vec<Option<&'p Pattern>>,
}

impl<'p> Constraints<'p> {
    /// Record the constraint of every variable in `pattern`.
    ///
    /// Fails on a variable outside `0..arity`, on a variable annotated
    /// with two non-identical sub-patterns, or on a constraint that refers
    /// back to its own variable through variable references alone. Unannotated occurrences never
    /// conflict; they defer to the annotated one.
    pub(crate) fn collect(pattern: &'p Pattern, arity: u32) -> Result<Self, PatternError> {
        let mut slots: Vec<Option<&'p Pattern>> = vec![None; arity as usize];
        let mut error = None;

        pattern.for_each_var_ref(&mut |var, sub| {
            if error.is_some() {
                return;
            }
            let Some(slot) = slots.get_mut(var.index()) else {
                error = Some(PatternError::UnknownVariable { var, arity });
                return;
            };
            let Some(sub) = sub else {
                return;
            };
            match *slot {
                None => *slot = Some(sub),
                Some(first) if !first.is_identical(sub) => {
                    tracing::debug!(%var, %first, second = %sub, "conflicting constraints");
                    error = Some(PatternError::ConflictingConstraint {
                        var,
                        first: first.clone(),
                        second: sub.clone(),
                    });
                }
                Some(_) => {}
            }
        });

        if let Some(err) = error {
            return Err(err);
        }
        let constraints = Constraints { slots };
        constraints.reject_cycles(arity)?;
        Ok(constraints)
    }

    /// Reject a variable whose constraint is a chain of bare variable
    /// references leading back to it. Matching such a constraint never
    /// descends into the subject, so it would recurse forever.
    fn reject_cycles(&self, arity: u32) -> Result<(), PatternError> {
        for start in (0..arity).map(VarId::new) {
            let mut current = start;
            // A cycle through `start` has at most `arity` links.
            for _ in 0..arity {
                let Some(Pattern::VarRef { var: next, .. }) = self.get(current) else {
                    break;
                };
                if *next == start {
                    tracing::debug!(var = %start, "self-referential constraint");
                    return Err(PatternError::SelfReferentialConstraint { var: start });
                }
                current = *next;
            }
        }
        Ok(())
    }

    /// Recorded sub-pattern of `var`, `None` for "matches anything".
    pub(crate) fn get(&self, var: VarId) -> Option<&'p Pattern> {
        self.slots.get(var.index()).copied().flatten()
    }
}
