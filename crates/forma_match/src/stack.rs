//! Stack growth for deeply nested patterns and subjects.
//!
//! Matching recurses once per level of pattern nesting, once per variable
//! constraint, and once per claimed set or map entry. Subjects arrive from
//! callers (decoded documents, request payloads) with no depth limit, so
//! every recursive step goes through [`ensure_sufficient_stack`] and depth
//! is bounded by memory rather than by the calling thread's stack size.
//! Recursion that consumes no structure at all is rejected earlier, when
//! constraints are collected.

/// Grow the stack when less than this remains (100KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call straight through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
