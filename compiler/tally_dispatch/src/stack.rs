//! Stack growth for deep walks.
//!
//! Every node visit recurses once, so a long left-leaning chain of operators
//! is as deep as it is large. On native targets the walk runs under
//! `stacker`, which switches to a fresh segment when the red zone is reached.

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    const RED_ZONE: usize = 128 * 1024;
    const SEGMENT: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

/// WASM cannot grow its stack; `WalkConfig` bounds the depth instead.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
