//! Owned, EOF-terminated token sequence.

use super::{Token, TokenKind};
use crate::{Position, Span};

/// The lexer's output: the source text plus every token lexed from it.
///
/// Invariants upheld by the only constructor, [`TokenList::from_tokens`]:
/// - the last token is `K::EOF`, on the default channel, and it is the only EOF;
/// - `on_channel` lists the indices of all default-channel tokens in order,
///   so the parser cursor can skip hidden tokens without scanning.
#[derive(Clone, Debug)]
pub struct TokenList<K> {
    source: Box<str>,
    tokens: Vec<Token<K>>,
    /// Parallel array of kind indices, one per token.
    tags: Vec<u8>,
    /// Indices into `tokens` of default-channel tokens.
    on_channel: Vec<u32>,
}

impl<K: TokenKind> TokenList<K> {
    /// Build a list from lexed tokens.
    ///
    /// Stray EOF tokens are dropped and a single EOF is appended at the end
    /// of the source.
    pub fn from_tokens(source: impl Into<Box<str>>, tokens: Vec<Token<K>>) -> Self {
        let source = source.into();
        let end = u32::try_from(source.len()).unwrap_or(u32::MAX);

        let mut list = TokenList {
            tokens: Vec::with_capacity(tokens.len() + 1),
            tags: Vec::with_capacity(tokens.len() + 1),
            on_channel: Vec::with_capacity(tokens.len() + 1),
            source,
        };
        let mut eof_pos = None;
        for token in tokens {
            if token.kind == K::EOF {
                eof_pos.get_or_insert(token.pos);
                continue;
            }
            list.push(token);
        }

        let eof_pos = eof_pos.unwrap_or_else(|| list.end_position());
        list.push(Token::new(K::EOF, Span::point(end), eof_pos));
        list
    }

    fn push(&mut self, token: Token<K>) {
        if !token.is_hidden() {
            self.on_channel
                .push(u32::try_from(self.tokens.len()).unwrap_or(u32::MAX));
        }
        self.tags.push(token.kind.index());
        self.tokens.push(token);
    }

    /// Position just past the last token, used for a synthesized EOF.
    fn end_position(&self) -> Position {
        let Some(last) = self.tokens.last() else {
            return Position::new(1, 1);
        };
        let width = self.text(last).chars().count();
        Position::new(
            last.pos.line,
            last.pos.column + u32::try_from(width).unwrap_or(0),
        )
    }

    /// The source text the tokens were lexed from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of tokens, hidden ones and the EOF included.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true: there is always an EOF token.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token<K>> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token<K>] {
        &self.tokens
    }

    /// Kind indices parallel to the tokens.
    #[inline]
    pub fn tags(&self) -> &[u8] {
        &self.tags
    }

    /// Indices of default-channel tokens, ending with the EOF's index.
    #[inline]
    pub fn on_channel(&self) -> &[u32] {
        &self.on_channel
    }

    /// Index of the EOF token.
    #[inline]
    pub fn eof_index(&self) -> usize {
        self.tokens.len() - 1
    }

    /// The lexeme of a token from this list.
    pub fn text(&self, token: &Token<K>) -> &str {
        self.source.get(token.span.to_range()).unwrap_or("")
    }

    /// Iterate over default-channel tokens (EOF included).
    pub fn iter_on_channel(&self) -> impl Iterator<Item = &Token<K>> + '_ {
        self.on_channel.iter().map(|&i| &self.tokens[i as usize])
    }

    /// Iterate over all tokens, hidden ones included.
    pub fn iter(&self) -> std::slice::Iter<'_, Token<K>> {
        self.tokens.iter()
    }
}

impl<K> std::ops::Index<usize> for TokenList<K> {
    type Output = Token<K>;

    #[inline]
    fn index(&self, index: usize) -> &Token<K> {
        &self.tokens[index]
    }
}
