//! Stack growth for deeply nested source and deep recursion.
//!
//! Rho programs recurse through ordinary closure calls, and every call goes
//! through several evaluator frames. Wrapping the recursive entry points in
//! [`ensure_sufficient_stack`] moves the limit from the native stack size to
//! the configured call depth.

/// Grow when less than this remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first switching to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
