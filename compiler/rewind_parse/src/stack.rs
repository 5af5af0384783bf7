//! Stack growth for deeply nested input.
//!
//! Every rule invocation runs through [`ensure_sufficient_stack`], so a
//! parenthesized expression nested a few thousand levels deep grows the
//! stack instead of overflowing it.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` allocates a new segment when the
//!   current one is nearly full.
//! - **wasm32**: the closure is called directly; the engine's own stack
//!   limit applies.
//!
//! # Configuration
//!
//! - **Red zone**: 128 KiB. Below this much remaining stack, grow.
//! - **Growth**: 2 MiB per new segment.
//!
//! Growth is unbounded here. `ParserConfig::max_depth` (1024 rules by
//! default) is what stops runaway nesting, with a `NestingTooDeep` error.

/// Grow when less than this much stack remains.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
#[cfg(not(target_arch = "wasm32"))]
const GROWTH: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if it is nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
