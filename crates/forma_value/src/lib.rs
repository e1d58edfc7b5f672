//! Forma Value - subjects for the Forma structural matcher.
//!
//! This crate provides:
//! - `Value`, the tagged subject type (scalars, byte strings, sequences,
//!   sets, maps, and user-class objects)
//! - `Type`, the runtime type tag with its subtype relation
//! - `Class`, single-inheritance user classes for `Value::Object`
//! - `Heap<T>`, the shared payload wrapper behind every heap variant
//!
//! Type constraints are checked by tag comparison along the subtype chain,
//! never by reflection.

mod heap;
mod types;
mod value;

pub use heap::Heap;
pub use types::{Class, Type};
pub use value::{ObjectValue, Value};
