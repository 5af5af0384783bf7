//! Java token kinds.
//!
//! Multi-character comparison and shift operators (`>>`, `>>>`, `>=`,
//! `>>=`, `<<`, `<=`, `<<=`, ...) are not kinds: the lexer emits one `<`,
//! `>` or `=` per character and the grammar reassembles them with adjacency
//! predicates. That keeps `List<List<String>>` lexable without feedback
//! from the parser.

use rewind_ir::{TokenKind, TokenSet};

/// Define the kind enum, its dense index table and display names.
macro_rules! define_kinds {
    ($($name:ident => $display:literal,)*) => {
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
        #[repr(u8)]
        pub enum JavaKind {
            $($name,)*
        }

        const ALL: &[JavaKind] = &[$(JavaKind::$name,)*];

        impl TokenKind for JavaKind {
            const EOF: Self = JavaKind::Eof;

            #[inline]
            fn index(self) -> u8 {
                self as u8
            }

            fn from_index(index: u8) -> Option<Self> {
                ALL.get(index as usize).copied()
            }

            fn display_name(self) -> &'static str {
                match self {
                    $(JavaKind::$name => $display,)*
                }
            }
        }
    };
}

define_kinds! {
    Eof => "end of input",
    Error => "invalid token",
    Comment => "comment",
    Ident => "identifier",
    IntLit => "integer literal",
    FloatLit => "floating-point literal",
    CharLit => "character literal",
    StringLit => "string literal",

    // Keywords
    Abstract => "abstract",
    Assert => "assert",
    Boolean => "boolean",
    Break => "break",
    Byte => "byte",
    Case => "case",
    Catch => "catch",
    Char => "char",
    Class => "class",
    Continue => "continue",
    Default => "default",
    Do => "do",
    Double => "double",
    Else => "else",
    Enum => "enum",
    Extends => "extends",
    False => "false",
    Final => "final",
    Finally => "finally",
    Float => "float",
    For => "for",
    If => "if",
    Implements => "implements",
    Import => "import",
    Instanceof => "instanceof",
    Int => "int",
    Interface => "interface",
    Long => "long",
    Native => "native",
    New => "new",
    Null => "null",
    Package => "package",
    Private => "private",
    Protected => "protected",
    Public => "public",
    Return => "return",
    Short => "short",
    Static => "static",
    Strictfp => "strictfp",
    Super => "super",
    Switch => "switch",
    Synchronized => "synchronized",
    This => "this",
    Throw => "throw",
    Throws => "throws",
    Transient => "transient",
    True => "true",
    Try => "try",
    Void => "void",
    Volatile => "volatile",
    While => "while",

    // Separators
    LParen => "(",
    RParen => ")",
    LBrace => "{",
    RBrace => "}",
    LBracket => "[",
    RBracket => "]",
    Semi => ";",
    Comma => ",",
    Dot => ".",
    At => "@",
    Question => "?",
    Colon => ":",

    // Operators
    Eq => "=",
    Gt => ">",
    Lt => "<",
    Bang => "!",
    Tilde => "~",
    Plus => "+",
    Minus => "-",
    Star => "*",
    Slash => "/",
    Percent => "%",
    Amp => "&",
    Pipe => "|",
    Caret => "^",
    EqEq => "==",
    BangEq => "!=",
    AmpAmp => "&&",
    PipePipe => "||",
    PlusPlus => "++",
    MinusMinus => "--",
    PlusEq => "+=",
    MinusEq => "-=",
    StarEq => "*=",
    SlashEq => "/=",
    PercentEq => "%=",
    AmpEq => "&=",
    PipeEq => "|=",
    CaretEq => "^=",
}

rewind_ir::static_assert_size!(JavaKind, 1);

/// Const [`TokenSet`] of the listed [`JavaKind`]s.
///
/// ```ignore
/// const LITERALS: TokenSet = kinds![IntLit, FloatLit, StringLit];
/// ```
#[macro_export]
macro_rules! kinds {
    ($($kind:ident),* $(,)?) => {
        ::rewind_ir::TokenSet::from_indices(&[$($crate::JavaKind::$kind as u8),*])
    };
}

pub const PRIMITIVE_TYPES: TokenSet = kinds![Boolean, Byte, Char, Short, Int, Long, Float, Double];

pub const LITERALS: TokenSet =
    kinds![IntLit, FloatLit, CharLit, StringLit, True, False, Null];

pub const MODIFIERS: TokenSet = kinds![
    Public, Protected, Private, Static, Abstract, Final, Native, Strictfp, Synchronized,
    Transient, Volatile,
];

/// Tokens that open a type declaration, modifiers and annotations included.
pub const TYPE_DECL_START: TokenSet = MODIFIERS.union(kinds![Class, Interface, Enum, At]);

pub const PREFIX_OPERATORS: TokenSet =
    kinds![Plus, Minus, PlusPlus, MinusMinus, Bang, Tilde];

/// Assignment operators that are single tokens. `<<=`, `>>=` and `>>>=`
/// are recognized by predicate.
pub const SIMPLE_ASSIGN_OPERATORS: TokenSet = kinds![
    Eq, PlusEq, MinusEq, StarEq, SlashEq, PercentEq, AmpEq, PipeEq, CaretEq,
];
