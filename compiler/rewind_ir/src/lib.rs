//! Rewind IR - token-level types for the rewind parser runtime.
//!
//! This crate contains the data the parser runtime consumes:
//! - Spans and line/column positions for source locations
//! - The `TokenKind` trait grammars implement for their token enums
//! - `Token` and `TokenList` for lexer output
//! - `TokenSet`, a 128-bit set of token kinds used for lookahead and recovery
//!
//! Nothing here knows about a particular grammar. A grammar crate defines a
//! `Copy` enum of token kinds, implements [`TokenKind`] for it, and hands the
//! runtime a [`TokenList`] terminated by the end-of-input token.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod line_index;
mod span;
mod token;

pub use line_index::LineIndex;
pub use span::{Position, Span, SpanError};
pub use token::{Channel, Token, TokenKind, TokenList, TokenSet, TokenSetIter};
