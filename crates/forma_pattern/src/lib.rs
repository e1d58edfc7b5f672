//! Forma Pattern - immutable pattern trees.
//!
//! A pattern is a tree of literals, type constraints, ordered sequences,
//! unordered collections and mappings, and variable references. Patterns
//! carry structure only; matching lives in `forma_match`.
//!
//! Variables are plain [`VarId`] indices into a matcher's binding table.
//! Build trees with the functions in [`builder`] (re-exported at the root).

pub mod builder;
mod pattern;
mod var_id;

pub use builder::{lit, map, none, seq, set, ty, var, var_with};
pub use pattern::{same_constraint, Pattern};
pub use var_id::VarId;
