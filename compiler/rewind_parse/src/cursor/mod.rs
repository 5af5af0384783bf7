//! Token cursor for navigating the token stream.
//!
//! The cursor walks the default-channel tokens of a [`TokenList`]; hidden
//! tokens are invisible to it. Positions are indices into that on-channel
//! sequence, so position `n` is always the `n`th token the parser can see.
//!
//! Speculation uses [`Mark`]s. Marks live in a slot table with generation
//! counters, so they can be released in any order and a stale mark is
//! detected instead of silently rewinding somewhere wrong.

use crate::error::{CursorError, ParseError, ParseErrorKind};
use rewind_ir::{Span, Token, TokenKind, TokenList, TokenSet};
use tracing::trace;

/// Opaque checkpoint returned by [`Cursor::mark`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mark {
    slot: u32,
    generation: u32,
}

#[derive(Clone, Copy, Debug)]
struct MarkSlot {
    pos: usize,
    generation: u32,
    live: bool,
}

/// Cursor over the parser-visible tokens of a [`TokenList`].
pub struct Cursor<'a, K> {
    tokens: &'a TokenList<K>,
    /// Indices of default-channel tokens in `tokens`; the last is the EOF.
    on_channel: &'a [u32],
    pos: usize,
    marks: Vec<MarkSlot>,
    free_slots: Vec<u32>,
    live_marks: usize,
}

impl<'a, K: TokenKind> Cursor<'a, K> {
    /// Create a new cursor at the start of the token stream.
    pub fn new(tokens: &'a TokenList<K>) -> Self {
        Cursor {
            tokens,
            on_channel: tokens.on_channel(),
            pos: 0,
            marks: Vec::new(),
            free_slots: Vec::new(),
            live_marks: 0,
        }
    }

    /// The token list this cursor reads.
    #[inline]
    pub fn tokens(&self) -> &'a TokenList<K> {
        self.tokens
    }

    /// Number of parser-visible tokens, EOF included.
    #[inline]
    pub fn token_count(&self) -> usize {
        self.on_channel.len()
    }

    /// Current position among parser-visible tokens.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the cursor position directly.
    ///
    /// Used to jump to the end of a memoized rule. Positions past the EOF
    /// clamp to the EOF.
    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(
            pos < self.on_channel.len(),
            "cursor position {pos} out of bounds (max {})",
            self.on_channel.len() - 1
        );
        self.pos = pos.min(self.on_channel.len() - 1);
    }

    /// Index in the full token list of the token at the current position.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.on_channel[self.pos] as usize
    }

    /// The current token.
    ///
    /// Invariant: the position never passes the EOF token, which is always
    /// the last visible token.
    #[inline]
    pub fn current(&self) -> &'a Token<K> {
        &self.tokens[self.current_index()]
    }

    #[inline]
    pub fn current_kind(&self) -> K {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// The lexeme of the current token.
    #[inline]
    pub fn current_text(&self) -> &'a str {
        self.tokens.text(self.current())
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == K::EOF
    }

    #[inline]
    pub fn check(&self, kind: K) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn check_set(&self, set: TokenSet) -> bool {
        set.contains(self.current_kind())
    }

    /// The token `offset` visible positions ahead, without consuming.
    ///
    /// `peek(0)` is the current token. The EOF token itself can be peeked;
    /// anything past it is an `EndOfInput` error.
    pub fn peek(&self, offset: usize) -> Result<&'a Token<K>, ParseError> {
        match self.on_channel.get(self.pos + offset) {
            Some(&index) => Ok(&self.tokens[index as usize]),
            None => Err(self.end_of_input()),
        }
    }

    /// Kind of the token `offset` positions ahead; `K::EOF` past the end.
    #[inline]
    pub fn peek_kind(&self, offset: usize) -> K {
        self.peek(offset).map_or(K::EOF, |token| token.kind)
    }

    /// Consume the current token and return it.
    ///
    /// Grammar code checks the current token before consuming, so the
    /// cursor never needs to move past the EOF; if asked to, it stays put.
    #[inline]
    pub fn consume(&mut self) -> &'a Token<K> {
        let token = self.current();
        debug_assert!(
            token.kind != K::EOF,
            "consume past end of token stream at {}",
            self.pos
        );
        trace!(
            pos = self.pos,
            kind = token.kind.display_name(),
            line = token.pos.line,
            column = token.pos.column,
            "consume"
        );
        if token.kind != K::EOF {
            self.pos += 1;
        }
        token
    }

    // ─────────────────────────────────────────────────────────────────────
    // Marks
    // ─────────────────────────────────────────────────────────────────────

    /// Checkpoint the current position.
    pub fn mark(&mut self) -> Mark {
        self.live_marks += 1;
        if let Some(slot) = self.free_slots.pop() {
            let entry = &mut self.marks[slot as usize];
            entry.pos = self.pos;
            entry.generation = entry.generation.wrapping_add(1);
            entry.live = true;
            return Mark {
                slot,
                generation: entry.generation,
            };
        }
        let slot = u32::try_from(self.marks.len()).unwrap_or(u32::MAX);
        self.marks.push(MarkSlot {
            pos: self.pos,
            generation: 0,
            live: true,
        });
        Mark {
            slot,
            generation: 0,
        }
    }

    fn slot(&self, mark: Mark) -> Result<&MarkSlot, CursorError> {
        match self.marks.get(mark.slot as usize) {
            Some(entry) if entry.live && entry.generation == mark.generation => Ok(entry),
            _ => Err(CursorError::StaleMark { slot: mark.slot }),
        }
    }

    /// Restore the position captured by `mark`. The mark stays live.
    pub fn rewind(&mut self, mark: Mark) -> Result<(), CursorError> {
        let pos = self.slot(mark)?.pos;
        trace!(from = self.pos, to = pos, "rewind");
        self.pos = pos;
        Ok(())
    }

    /// Release `mark`. Marks may be released in any order.
    pub fn release(&mut self, mark: Mark) -> Result<(), CursorError> {
        self.slot(mark)?;
        self.marks[mark.slot as usize].live = false;
        self.free_slots.push(mark.slot);
        self.live_marks -= 1;
        Ok(())
    }

    /// Number of marks taken and not yet released.
    #[inline]
    pub fn outstanding_marks(&self) -> usize {
        self.live_marks
    }

    // ─────────────────────────────────────────────────────────────────────
    // Errors
    // ─────────────────────────────────────────────────────────────────────

    /// Describe the current token for a diagnostic.
    pub fn describe_current(&self) -> String {
        describe(self.tokens, self.current())
    }

    /// `UnexpectedToken` at the current token.
    #[cold]
    #[inline(never)]
    pub fn unexpected(&self, expected: TokenSet) -> ParseError {
        self.error_at(
            self.pos,
            ParseErrorKind::UnexpectedToken {
                expected: expected.names::<K>(),
                found: self.describe_current(),
            },
        )
    }

    /// An error located at the visible token `pos` (clamped to the EOF).
    pub fn error_at(&self, pos: usize, kind: ParseErrorKind) -> ParseError {
        let pos = pos.min(self.on_channel.len() - 1);
        let token = &self.tokens[self.on_channel[pos] as usize];
        ParseError::new(kind, pos, token.span, token.pos)
    }

    #[cold]
    fn end_of_input(&self) -> ParseError {
        self.error_at(self.on_channel.len() - 1, ParseErrorKind::EndOfInput)
    }
}

/// "`text`" for ordinary tokens, the kind name for EOF and empty lexemes.
pub(crate) fn describe<K: TokenKind>(tokens: &TokenList<K>, token: &Token<K>) -> String {
    let text = tokens.text(token);
    if token.kind == K::EOF || text.is_empty() {
        token.kind.display_name().to_string()
    } else {
        format!("`{text}`")
    }
}

#[cfg(test)]
mod tests;
