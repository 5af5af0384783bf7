//! Java lexer built on logos.
//!
//! Whitespace is dropped, comments go to the hidden channel, and anything
//! logos cannot match becomes a [`JavaKind::Error`] token plus a
//! [`LexError`], so the parser still sees every byte of the input.

use crate::JavaKind;
use logos::Logos;
use rewind_ir::{LineIndex, Position, Span, SpanError, Token, TokenList};
use std::ops::Range;
use thiserror::Error;
use tracing::debug;

/// Raw token from logos, before conversion to [`JavaKind`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[regex(r"/\*([^*]|\*+[^*/])*")]
    UnterminatedComment,

    #[regex(r#""([^"\\\n]|\\[^\n])*""#)]
    StringLit,

    #[regex(r#""([^"\\\n]|\\[^\n])*"#)]
    UnterminatedString,

    #[regex(r"'([^'\\\n]|\\[^\n])+'")]
    CharLit,

    #[regex(r"[0-9][0-9_]*[lL]?")]
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*[lL]?")]
    #[regex(r"0[bB][01][01_]*[lL]?")]
    IntLit,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+[fFdD]?")]
    #[regex(r"[0-9][0-9_]*[fFdD]")]
    FloatLit,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    // Keywords
    #[token("abstract")]
    Abstract,
    #[token("assert")]
    Assert,
    #[token("boolean")]
    Boolean,
    #[token("break")]
    Break,
    #[token("byte")]
    Byte,
    #[token("case")]
    Case,
    #[token("catch")]
    Catch,
    #[token("char")]
    Char,
    #[token("class")]
    Class,
    #[token("continue")]
    Continue,
    #[token("default")]
    Default,
    #[token("do")]
    Do,
    #[token("double")]
    Double,
    #[token("else")]
    Else,
    #[token("enum")]
    Enum,
    #[token("extends")]
    Extends,
    #[token("false")]
    False,
    #[token("final")]
    Final,
    #[token("finally")]
    Finally,
    #[token("float")]
    Float,
    #[token("for")]
    For,
    #[token("if")]
    If,
    #[token("implements")]
    Implements,
    #[token("import")]
    Import,
    #[token("instanceof")]
    Instanceof,
    #[token("int")]
    Int,
    #[token("interface")]
    Interface,
    #[token("long")]
    Long,
    #[token("native")]
    Native,
    #[token("new")]
    New,
    #[token("null")]
    Null,
    #[token("package")]
    Package,
    #[token("private")]
    Private,
    #[token("protected")]
    Protected,
    #[token("public")]
    Public,
    #[token("return")]
    Return,
    #[token("short")]
    Short,
    #[token("static")]
    Static,
    #[token("strictfp")]
    Strictfp,
    #[token("super")]
    Super,
    #[token("switch")]
    Switch,
    #[token("synchronized")]
    Synchronized,
    #[token("this")]
    This,
    #[token("throw")]
    Throw,
    #[token("throws")]
    Throws,
    #[token("transient")]
    Transient,
    #[token("true")]
    True,
    #[token("try")]
    Try,
    #[token("void")]
    Void,
    #[token("volatile")]
    Volatile,
    #[token("while")]
    While,

    // Separators
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("@")]
    At,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,

    // Operators
    #[token("=")]
    Eq,
    #[token(">")]
    Gt,
    #[token("<")]
    Lt,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
}

impl RawToken {
    fn kind(self) -> JavaKind {
        match self {
            RawToken::LineComment | RawToken::BlockComment => JavaKind::Comment,
            RawToken::UnterminatedComment | RawToken::UnterminatedString => JavaKind::Error,
            RawToken::StringLit => JavaKind::StringLit,
            RawToken::CharLit => JavaKind::CharLit,
            RawToken::IntLit => JavaKind::IntLit,
            RawToken::FloatLit => JavaKind::FloatLit,
            RawToken::Ident => JavaKind::Ident,
            RawToken::Abstract => JavaKind::Abstract,
            RawToken::Assert => JavaKind::Assert,
            RawToken::Boolean => JavaKind::Boolean,
            RawToken::Break => JavaKind::Break,
            RawToken::Byte => JavaKind::Byte,
            RawToken::Case => JavaKind::Case,
            RawToken::Catch => JavaKind::Catch,
            RawToken::Char => JavaKind::Char,
            RawToken::Class => JavaKind::Class,
            RawToken::Continue => JavaKind::Continue,
            RawToken::Default => JavaKind::Default,
            RawToken::Do => JavaKind::Do,
            RawToken::Double => JavaKind::Double,
            RawToken::Else => JavaKind::Else,
            RawToken::Enum => JavaKind::Enum,
            RawToken::Extends => JavaKind::Extends,
            RawToken::False => JavaKind::False,
            RawToken::Final => JavaKind::Final,
            RawToken::Finally => JavaKind::Finally,
            RawToken::Float => JavaKind::Float,
            RawToken::For => JavaKind::For,
            RawToken::If => JavaKind::If,
            RawToken::Implements => JavaKind::Implements,
            RawToken::Import => JavaKind::Import,
            RawToken::Instanceof => JavaKind::Instanceof,
            RawToken::Int => JavaKind::Int,
            RawToken::Interface => JavaKind::Interface,
            RawToken::Long => JavaKind::Long,
            RawToken::Native => JavaKind::Native,
            RawToken::New => JavaKind::New,
            RawToken::Null => JavaKind::Null,
            RawToken::Package => JavaKind::Package,
            RawToken::Private => JavaKind::Private,
            RawToken::Protected => JavaKind::Protected,
            RawToken::Public => JavaKind::Public,
            RawToken::Return => JavaKind::Return,
            RawToken::Short => JavaKind::Short,
            RawToken::Static => JavaKind::Static,
            RawToken::Strictfp => JavaKind::Strictfp,
            RawToken::Super => JavaKind::Super,
            RawToken::Switch => JavaKind::Switch,
            RawToken::Synchronized => JavaKind::Synchronized,
            RawToken::This => JavaKind::This,
            RawToken::Throw => JavaKind::Throw,
            RawToken::Throws => JavaKind::Throws,
            RawToken::Transient => JavaKind::Transient,
            RawToken::True => JavaKind::True,
            RawToken::Try => JavaKind::Try,
            RawToken::Void => JavaKind::Void,
            RawToken::Volatile => JavaKind::Volatile,
            RawToken::While => JavaKind::While,
            RawToken::LParen => JavaKind::LParen,
            RawToken::RParen => JavaKind::RParen,
            RawToken::LBrace => JavaKind::LBrace,
            RawToken::RBrace => JavaKind::RBrace,
            RawToken::LBracket => JavaKind::LBracket,
            RawToken::RBracket => JavaKind::RBracket,
            RawToken::Semi => JavaKind::Semi,
            RawToken::Comma => JavaKind::Comma,
            RawToken::Dot => JavaKind::Dot,
            RawToken::At => JavaKind::At,
            RawToken::Question => JavaKind::Question,
            RawToken::Colon => JavaKind::Colon,
            RawToken::Eq => JavaKind::Eq,
            RawToken::Gt => JavaKind::Gt,
            RawToken::Lt => JavaKind::Lt,
            RawToken::Bang => JavaKind::Bang,
            RawToken::Tilde => JavaKind::Tilde,
            RawToken::Plus => JavaKind::Plus,
            RawToken::Minus => JavaKind::Minus,
            RawToken::Star => JavaKind::Star,
            RawToken::Slash => JavaKind::Slash,
            RawToken::Percent => JavaKind::Percent,
            RawToken::Amp => JavaKind::Amp,
            RawToken::Pipe => JavaKind::Pipe,
            RawToken::Caret => JavaKind::Caret,
            RawToken::EqEq => JavaKind::EqEq,
            RawToken::BangEq => JavaKind::BangEq,
            RawToken::AmpAmp => JavaKind::AmpAmp,
            RawToken::PipePipe => JavaKind::PipePipe,
            RawToken::PlusPlus => JavaKind::PlusPlus,
            RawToken::MinusMinus => JavaKind::MinusMinus,
            RawToken::PlusEq => JavaKind::PlusEq,
            RawToken::MinusEq => JavaKind::MinusEq,
            RawToken::StarEq => JavaKind::StarEq,
            RawToken::SlashEq => JavaKind::SlashEq,
            RawToken::PercentEq => JavaKind::PercentEq,
            RawToken::AmpEq => JavaKind::AmpEq,
            RawToken::PipeEq => JavaKind::PipeEq,
            RawToken::CaretEq => JavaKind::CaretEq,
        }
    }
}
/// A lexical error. The offending text is still in the token list, as a
/// [`JavaKind::Error`] token.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexError {
    #[error("invalid character `{text}` at {pos}")]
    InvalidCharacter {
        text: String,
        span: Span,
        pos: Position,
    },

    #[error("unterminated {what} starting at {pos}")]
    Unterminated {
        what: &'static str,
        span: Span,
        pos: Position,
    },

    /// Lexing stops at the first offset a span cannot hold.
    #[error("source does not fit 32-bit offsets after {pos}: {source}")]
    TooLarge { source: SpanError, pos: Position },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::InvalidCharacter { span, .. } | LexError::Unterminated { span, .. } => *span,
            LexError::TooLarge { .. } => Span::point(u32::MAX),
        }
    }

    /// Stable error code, mirroring [`ParseErrorKind::code`](rewind_parse::ParseErrorKind::code).
    pub fn code(&self) -> &'static str {
        match self {
            LexError::InvalidCharacter { .. } => "E0001",
            LexError::Unterminated { .. } => "E0002",
            LexError::TooLarge { .. } => "E0003",
        }
    }
}

/// Span of a logos match. `last` is where the previous token starts, the
/// best position to report when the match lies past the 4 GiB limit.
fn token_span(range: Range<usize>, last: Position) -> Result<Span, LexError> {
    Span::try_from_range(range).map_err(|source| LexError::TooLarge { source, pos: last })
}

/// Lex `source` into an EOF-terminated token list.
///
/// Never fails: invalid input becomes error tokens, reported alongside.
/// A source longer than 4 GiB is lexed up to the limit and the rest is
/// dropped with a [`LexError::TooLarge`].
pub fn lex(source: &str) -> (TokenList<JavaKind>, Vec<LexError>) {
    let index = LineIndex::new(source);
    let mut tokens: Vec<Token<JavaKind>> = Vec::new();
    let mut errors = Vec::new();
    let mut logos = RawToken::lexer(source);

    while let Some(result) = logos.next() {
        let last = tokens.last().map_or(Position::new(1, 1), |t| t.pos);
        let span = match token_span(logos.span(), last) {
            Ok(span) => span,
            Err(err) => {
                errors.push(err);
                break;
            }
        };
        let pos = index.position(source, span.start);

        let kind = match result {
            Ok(raw) => {
                let what = match raw {
                    RawToken::UnterminatedComment => Some("block comment"),
                    RawToken::UnterminatedString => Some("string literal"),
                    _ => None,
                };
                if let Some(what) = what {
                    errors.push(LexError::Unterminated { what, span, pos });
                }
                raw.kind()
            }
            Err(()) => {
                errors.push(LexError::InvalidCharacter {
                    text: logos.slice().to_string(),
                    span,
                    pos,
                });
                JavaKind::Error
            }
        };

        let token = Token::new(kind, span, pos);
        tokens.push(if kind == JavaKind::Comment {
            token.hidden()
        } else {
            token
        });
    }

    debug!(
        tokens = tokens.len(),
        errors = errors.len(),
        "lexed {} bytes",
        source.len()
    );
    (TokenList::from_tokens(source, tokens), errors)
}
