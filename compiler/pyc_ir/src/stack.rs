//! Stack growth for recursive walks over nested nodes.
//!
//! Parsing, visiting and rendering all recurse once per nesting level, so a
//! body like `((((...))))` with a few hundred levels can exhaust a thread's
//! stack. Every recursive entry point wraps its work in
//! [`ensure_sufficient_stack`], which moves onto a fresh segment when the
//! current one runs low.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT: usize = 1024 * 1024;

/// Run `f`, first switching to a new stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
