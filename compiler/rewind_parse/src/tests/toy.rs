//! A tiny token vocabulary and lexer for exercising the runtime.
//!
//! Single letters `a`..`d` lex as their own kinds, other alphanumeric runs
//! are identifiers or numbers, every punctuation character is one token,
//! and `// ...` comments go to the hidden channel.

use rewind_ir::{LineIndex, Span, Token, TokenKind, TokenList};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Toy {
    Eof,
    A,
    B,
    C,
    D,
    Ident,
    Num,
    Gt,
    Lt,
    Eq,
    LParen,
    RParen,
    Semi,
    Comma,
    Plus,
    Comment,
    Unknown,
}

const ALL: [Toy; 17] = [
    Toy::Eof,
    Toy::A,
    Toy::B,
    Toy::C,
    Toy::D,
    Toy::Ident,
    Toy::Num,
    Toy::Gt,
    Toy::Lt,
    Toy::Eq,
    Toy::LParen,
    Toy::RParen,
    Toy::Semi,
    Toy::Comma,
    Toy::Plus,
    Toy::Comment,
    Toy::Unknown,
];

impl TokenKind for Toy {
    const EOF: Self = Toy::Eof;

    fn index(self) -> u8 {
        self as u8
    }

    fn from_index(index: u8) -> Option<Self> {
        ALL.get(index as usize).copied()
    }

    fn display_name(self) -> &'static str {
        match self {
            Toy::Eof => "end of input",
            Toy::A => "a",
            Toy::B => "b",
            Toy::C => "c",
            Toy::D => "d",
            Toy::Ident => "identifier",
            Toy::Num => "number",
            Toy::Gt => ">",
            Toy::Lt => "<",
            Toy::Eq => "=",
            Toy::LParen => "(",
            Toy::RParen => ")",
            Toy::Semi => ";",
            Toy::Comma => ",",
            Toy::Plus => "+",
            Toy::Comment => "comment",
            Toy::Unknown => "unknown",
        }
    }
}

pub fn lex(source: &str) -> TokenList<Toy> {
    let index = LineIndex::new(source);
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let start = i;
        let kind = if c.is_ascii_whitespace() {
            i += 1;
            continue;
        } else if c == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            Toy::Comment
        } else if c.is_ascii_alphanumeric() {
            while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
                i += 1;
            }
            match &source[start..i] {
                "a" => Toy::A,
                "b" => Toy::B,
                "c" => Toy::C,
                "d" => Toy::D,
                word if word.bytes().all(|b| b.is_ascii_digit()) => Toy::Num,
                _ => Toy::Ident,
            }
        } else {
            i += 1;
            match c {
                b'>' => Toy::Gt,
                b'<' => Toy::Lt,
                b'=' => Toy::Eq,
                b'(' => Toy::LParen,
                b')' => Toy::RParen,
                b';' => Toy::Semi,
                b',' => Toy::Comma,
                b'+' => Toy::Plus,
                _ => Toy::Unknown,
            }
        };
        let span = Span::new(start as u32, i as u32);
        let token = Token::new(kind, span, index.position(source, span.start));
        tokens.push(if kind == Toy::Comment {
            token.hidden()
        } else {
            token
        });
    }
    TokenList::from_tokens(source, tokens)
}
