//! Forma Match - structural pattern matching over `forma_value` subjects.
//!
//! This crate provides:
//! - `Matcher`, which owns a fixed set of variable slots and runs matches
//! - `Variable`, a handle used to place captures in patterns and read them back
//! - `BindingTable`, the per-matcher `Unbound | Bound(value)` slots
//! - `PatternError`, raised for malformed patterns (never for a subject
//!   that merely fails to conform)
//!
//! # Architecture
//!
//! ```text
//! Matcher::invoke
//!   └─ Attempt::new          record each variable's constraint, reject
//!   │                        conflicts and undeclared variables
//!   └─ Attempt::attempt_match
//!        ├─ literal / type / sequence / variable rules
//!        └─ AssignmentSearch  set and map entries, backtracking over
//!                             scratch copies of the binding table
//! ```
//!
//! Matching is synchronous and allocation-light. Patterns are immutable and
//! may be shared between threads; a matcher may not.

mod assignment;
mod bindings;
mod error;
mod matcher;
mod stack;
mod structural;

use std::sync::Once;

pub use bindings::BindingTable;
pub use error::PatternError;
pub use matcher::{Matcher, Variable};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=forma_match=debug` for one event per invocation and per
/// assignment search, or `=trace` for every capture and backtrack.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            // The host may already have installed a subscriber.
            if let Err(err) = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init()
            {
                tracing::debug!(%err, "tracing subscriber already installed");
            }
        }
    });
}
