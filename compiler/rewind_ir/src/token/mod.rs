//! Tokens as the parser runtime sees them.
//!
//! The runtime is generic over the token kind. A grammar supplies a small
//! `Copy` enum and implements [`TokenKind`] for it; everything else here
//! (tokens, lists, sets) is shared.

mod list;
mod set;

pub use list::TokenList;
pub use set::{TokenSet, TokenSetIter};

use crate::{Position, Span};
use std::fmt;
use std::hash::Hash;

/// A grammar's token kind.
///
/// Kinds are dense: every kind maps to a distinct `index()` below 128 so
/// that a [`TokenSet`] can hold any combination of them in one `u128`.
pub trait TokenKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// End-of-input marker. Every [`TokenList`] ends with exactly one.
    const EOF: Self;

    /// Dense index of this kind, `< 128`.
    fn index(self) -> u8;

    /// Inverse of `index()`. `None` for indices no kind maps to.
    fn from_index(index: u8) -> Option<Self>;

    /// Human-readable name used in diagnostics (e.g. `` `;` `` or `identifier`).
    fn display_name(self) -> &'static str;
}

/// Which consumer a token is meant for.
///
/// Hidden tokens (comments) stay in the list for tooling but are never
/// returned by the parser's cursor.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Channel {
    #[default]
    Default,
    Hidden,
}

/// A lexed token: kind, byte span, line/column, and channel.
///
/// The lexeme is not stored inline; slice it from the owning
/// [`TokenList`] with [`TokenList::text`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token<K> {
    pub kind: K,
    pub span: Span,
    pub pos: Position,
    pub channel: Channel,
}

impl<K: TokenKind> Token<K> {
    #[inline]
    pub fn new(kind: K, span: Span, pos: Position) -> Self {
        Token {
            kind,
            span,
            pos,
            channel: Channel::Default,
        }
    }

    /// Same token on the hidden channel.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.channel = Channel::Hidden;
        self
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.channel == Channel::Hidden
    }

    /// True if `next` starts on the same line exactly where this token ends,
    /// with no whitespace or comment in between.
    #[inline]
    pub fn is_adjacent_to(&self, next: &Token<K>) -> bool {
        self.pos.line == next.pos.line && self.span.abuts(next.span)
    }
}

impl<K: fmt::Debug> fmt::Debug for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.pos)?;
        if self.channel == Channel::Hidden {
            write!(f, " (hidden)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
