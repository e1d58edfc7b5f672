//! Pattern-definition errors.
//!
//! These describe a malformed pattern, never a non-conforming subject. A
//! subject that does not fit is reported as `Ok(false)` by
//! [`Matcher::invoke`](crate::Matcher::invoke); a `PatternError` aborts the
//! invocation whatever the subject is.

use forma_pattern::{Pattern, VarId};

#[derive(Clone, Debug, thiserror::Error)]
pub enum PatternError {
    /// The same variable carries two different sub-patterns in one pattern.
    #[error("conflicting constraints for variable {var}: `{first}` vs `{second}`")]
    ConflictingConstraint {
        var: VarId,
        first: Pattern,
        second: Pattern,
    },

    /// A variable reference outside the matcher's declared slots.
    #[error("variable {var} is not declared by this matcher (it has {arity} variables)")]
    UnknownVariable { var: VarId, arity: u32 },

    /// A variable's constraint leads back to the variable through variable
    /// references alone, e.g. `x[x]` or `x[y]` with `y[x]`.
    #[error("constraint of variable {var} refers back to {var} without consuming any structure")]
    SelfReferentialConstraint { var: VarId },
}
