//! Stack growth for deep recursion.
//!
//! The resolver and the interpreter recurse once per nested AST node and once
//! per closure call. Wrapping those recursion points in
//! [`ensure_sufficient_stack`] moves deep evaluation onto freshly allocated
//! stack segments instead of overflowing the thread's fixed stack.
//!
//! Growth is unbounded: a closure that recurses forever eventually exhausts
//! memory and aborts the process. That is the intended outcome; runaway
//! recursion is never turned into a recoverable error.
//!
//! - **Red zone**: 128KB. If less than this remains, the stack grows.
//! - **Growth size**: 2MB per new segment.

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available.
    const RED_ZONE: usize = 128 * 1024;

    /// Stack space to allocate when growing.
    const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_call_depth() {
        fn depth(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        // Far past what an 8MB main-thread stack holds for this frame size.
        assert_eq!(depth(200_000), 200_000);
    }

    #[test]
    fn passes_errors_through() {
        let result: Result<u8, String> = ensure_sufficient_stack(|| Err("boom".to_string()));
        assert_eq!(result, Err("boom".to_string()));
    }
}
