//! Semantic predicates over upcoming tokens.
//!
//! A predicate looks at the next few tokens without consuming them and says
//! yes or no. Predicates are plain function pointers over token data, so
//! they can live in `static` decision tables and give the same answer
//! every time they are asked.

use crate::cursor::Cursor;
use rewind_ir::{Token, TokenKind};
use smallvec::SmallVec;
use std::fmt;

/// Tokens captured for one evaluation; predicates rarely look past four.
type Captured<'a, K> = SmallVec<[&'a Token<K>; 4]>;

/// A named, side-effect-free test over the next `arity` tokens.
#[derive(Clone, Copy)]
pub struct SemanticPredicate<K: 'static> {
    pub name: &'static str,
    pub arity: usize,
    test: fn(&[&Token<K>]) -> bool,
}

impl<K: TokenKind> SemanticPredicate<K> {
    pub const fn new(name: &'static str, arity: usize, test: fn(&[&Token<K>]) -> bool) -> Self {
        SemanticPredicate { name, arity, test }
    }

    /// Evaluate against the tokens at the cursor.
    ///
    /// False if fewer than `arity` real tokens remain; the EOF token is
    /// never handed to the test.
    pub fn evaluate(&self, cursor: &Cursor<'_, K>) -> bool {
        let mut captured: Captured<'_, K> = SmallVec::new();
        for offset in 0..self.arity {
            match cursor.peek(offset) {
                Ok(token) if token.kind != K::EOF => captured.push(token),
                _ => return false,
            }
        }
        (self.test)(&captured)
    }

    /// Apply the test to already-captured tokens.
    pub fn test(&self, tokens: &[&Token<K>]) -> bool {
        tokens.len() == self.arity && (self.test)(tokens)
    }
}

impl<K> fmt::Debug for SemanticPredicate<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}?/{}", self.name, self.arity)
    }
}

/// True if every token starts exactly where the previous one ends, on the
/// same line.
///
/// Use it as the test of an adjacency predicate:
///
/// ```text
/// static SHIFT_RIGHT: SemanticPredicate<JavaKind> =
///     SemanticPredicate::new("shift_right", 2, |t| {
///         adjacent(t) && kinds_are(t, &[JavaKind::Gt, JavaKind::Gt])
///     });
/// ```
pub fn adjacent<K: TokenKind>(tokens: &[&Token<K>]) -> bool {
    tokens
        .windows(2)
        .all(|pair| pair[0].is_adjacent_to(pair[1]))
}

/// True if the captured tokens have exactly the given kinds, in order.
pub fn kinds_are<K: TokenKind>(tokens: &[&Token<K>], kinds: &[K]) -> bool {
    tokens.len() == kinds.len() && tokens.iter().zip(kinds).all(|(t, &k)| t.kind == k)
}
