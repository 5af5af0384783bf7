//! The Java-subset grammar.
//!
//! One procedure per nonterminal, written against [`Parser`]. Choice points
//! that one token cannot settle go through the static [`Decision`] tables
//! below; operators spelled with several `<`/`>`/`=` tokens are recognized
//! by the predicates in [`predicates`].
//!
//! ```text
//! compilation_unit : package_decl? import_decl* type_decl* EOF
//! type_decl        : modifiers (class_decl | interface_decl | enum_decl
//!                   | annotation_type_decl) | ';'
//! member           : modifiers (class_decl | interface_decl | enum_decl
//!                   | annotation_type_decl | block | constructor_decl
//!                   | method_decl | field_decl) | ';'
//! block_stmt       : local_class | local_var_decl | statement
//! statement        : block | if | while | do | for | return | break
//!                   | continue | throw | try | switch | synchronized
//!                   | assert | labeled | expr_stmt | ';'
//! expr             : conditional (assign_op expr)?
//! ...              : one level per binary precedence
//! unary            : prefix_op unary | cast | postfix
//! postfix          : primary selector* ('++' | '--')*
//! ```

mod expressions;
mod items;
pub mod predicates;
mod statements;
mod types;

pub use items::compilation_unit;

use crate::kind::{LITERALS, PREFIX_OPERATORS, PRIMITIVE_TYPES};
use crate::kinds;
use crate::JavaKind;
use rewind_ir::TokenSet;
use rewind_parse::{Alternative, Decision, Parser, Rule};
use std::sync::LazyLock;

/// A parser over Java tokens.
pub type JavaParser<'a, S> = Parser<'a, JavaKind, S>;

// ─────────────────────────────────────────────────────────────────────────
// Rules
// ─────────────────────────────────────────────────────────────────────────

/// Where recovery inside a braced body stops.
const BODY_FOLLOW: TokenSet = kinds![RBrace, Eof];

pub static COMPILATION_UNIT: Rule = Rule::new(0, "compilation_unit");
pub static PACKAGE_DECL: Rule = Rule::new(1, "package_decl");
pub static IMPORT_DECL: Rule = Rule::new(2, "import_decl")
    .follow(kinds![Import, Eof].union(crate::kind::TYPE_DECL_START))
    .terminated_by(kinds![Semi]);
pub static TYPE_DECL: Rule = Rule::new(3, "type_decl")
    .follow(kinds![Eof].union(crate::kind::TYPE_DECL_START))
    .terminated_by(kinds![Semi, RBrace]);
pub static ANNOTATION: Rule = Rule::new(4, "annotation");
pub static CLASS_DECL: Rule = Rule::new(5, "class_decl");
pub static INTERFACE_DECL: Rule = Rule::new(6, "interface_decl");
pub static ENUM_DECL: Rule = Rule::new(7, "enum_decl");
pub static ENUM_CONSTANT: Rule = Rule::new(8, "enum_constant");
pub static TYPE_PARAMS: Rule = Rule::new(9, "type_params");
pub static TYPE_PARAM: Rule = Rule::new(10, "type_param");
pub static CLASS_BODY: Rule = Rule::new(11, "class_body");
pub static MEMBER: Rule = Rule::new(12, "member")
    .follow(BODY_FOLLOW)
    .terminated_by(kinds![Semi]);
pub static FIELD_DECL: Rule = Rule::new(13, "field_decl");
pub static METHOD_DECL: Rule = Rule::new(14, "method_decl");
pub static CONSTRUCTOR_DECL: Rule = Rule::new(15, "constructor_decl");
pub static INITIALIZER: Rule = Rule::new(16, "initializer");
pub static FORMAL_PARAMS: Rule = Rule::new(17, "formal_params");
pub static FORMAL_PARAM: Rule = Rule::new(18, "formal_param");
pub static VAR_DECLARATOR: Rule = Rule::new(19, "var_declarator");
pub static ARRAY_INIT: Rule = Rule::new(20, "array_init");
pub static QUALIFIED_NAME: Rule = Rule::new(21, "qualified_name");
pub static ANNOTATION_TYPE_DECL: Rule = Rule::new(22, "annotation_type_decl");
pub static ANNOTATION_MEMBER: Rule = Rule::new(23, "annotation_member")
    .follow(BODY_FOLLOW)
    .terminated_by(kinds![Semi]);
pub static ANNOTATION_ELEMENT: Rule = Rule::new(24, "annotation_element");

pub static TYPE: Rule = Rule::new(30, "type");
pub static CLASS_TYPE: Rule = Rule::new(31, "class_type");
pub static TYPE_ARGS: Rule = Rule::new(32, "type_args");
pub static TYPE_ARG: Rule = Rule::new(33, "type_arg");
// The type after `new`, where `<>` is allowed. Separate ids keep the memo
// from mixing up the two forms; the names match so trees read the same.
pub static CREATED_CLASS_TYPE: Rule = Rule::new(34, "class_type");
pub static DIAMOND_TYPE_ARGS: Rule = Rule::new(35, "type_args");

pub static BLOCK: Rule = Rule::new(40, "block");
pub static BLOCK_STMT: Rule = Rule::new(41, "block_stmt")
    .follow(BODY_FOLLOW)
    .terminated_by(kinds![Semi]);
pub static LOCAL_VAR_DECL: Rule = Rule::new(42, "local_var_decl");
pub static STATEMENT: Rule = Rule::new(43, "statement");
pub static IF_STMT: Rule = Rule::new(44, "if_stmt");
pub static WHILE_STMT: Rule = Rule::new(45, "while_stmt");
pub static DO_STMT: Rule = Rule::new(46, "do_stmt");
pub static FOR_STMT: Rule = Rule::new(47, "for_stmt");
pub static FOR_EACH: Rule = Rule::new(48, "for_each");
pub static FOR_CLASSIC: Rule = Rule::new(49, "for_classic");
pub static RETURN_STMT: Rule = Rule::new(50, "return_stmt");
pub static BREAK_STMT: Rule = Rule::new(51, "break_stmt");
pub static CONTINUE_STMT: Rule = Rule::new(52, "continue_stmt");
pub static THROW_STMT: Rule = Rule::new(53, "throw_stmt");
pub static TRY_STMT: Rule = Rule::new(54, "try_stmt");
pub static CATCH_CLAUSE: Rule = Rule::new(55, "catch_clause");
pub static SWITCH_STMT: Rule = Rule::new(56, "switch_stmt");
pub static SWITCH_LABEL: Rule = Rule::new(57, "switch_label");
pub static LABELED_STMT: Rule = Rule::new(58, "labeled_stmt");
pub static EXPR_STMT: Rule = Rule::new(59, "expr_stmt");
pub static EMPTY_STMT: Rule = Rule::new(60, "empty_stmt");
pub static SYNCHRONIZED_STMT: Rule = Rule::new(61, "synchronized_stmt");
pub static ASSERT_STMT: Rule = Rule::new(62, "assert_stmt");

pub static EXPR: Rule = Rule::new(70, "expr");
pub static CONDITIONAL: Rule = Rule::new(71, "conditional");
pub static LOGICAL_OR: Rule = Rule::new(72, "logical_or");
pub static LOGICAL_AND: Rule = Rule::new(73, "logical_and");
pub static BIT_OR: Rule = Rule::new(74, "bit_or");
pub static BIT_XOR: Rule = Rule::new(75, "bit_xor");
pub static BIT_AND: Rule = Rule::new(76, "bit_and");
pub static EQUALITY: Rule = Rule::new(77, "equality");
pub static RELATIONAL: Rule = Rule::new(78, "relational");
pub static SHIFT: Rule = Rule::new(79, "shift");
pub static ADDITIVE: Rule = Rule::new(80, "additive");
pub static MULTIPLICATIVE: Rule = Rule::new(81, "multiplicative");
pub static UNARY: Rule = Rule::new(82, "unary");
pub static CAST: Rule = Rule::new(83, "cast");
pub static POSTFIX: Rule = Rule::new(84, "postfix");
pub static PRIMARY: Rule = Rule::new(85, "primary");
pub static PAREN_EXPR: Rule = Rule::new(86, "paren_expr");
pub static CREATOR: Rule = Rule::new(87, "creator");
pub static ARGUMENTS: Rule = Rule::new(88, "arguments");

// ─────────────────────────────────────────────────────────────────────────
// Token sets
// ─────────────────────────────────────────────────────────────────────────

/// Kinds that can begin a type.
pub const TYPE_START: TokenSet = PRIMITIVE_TYPES.union(kinds![Ident]);

/// Kinds that can begin a primary expression.
pub const PRIMARY_START: TokenSet = LITERALS.union(kinds![Ident, LParen, This, Super, New]);

/// Kinds that can begin an expression.
pub const EXPR_START: TokenSet = PRIMARY_START.union(PREFIX_OPERATORS);

/// Kinds that can begin a statement (local declarations excluded).
pub const STATEMENT_START: TokenSet = EXPR_START.union(kinds![
    LBrace, Semi, If, While, Do, For, Return, Break, Continue, Throw, Try, Switch, Synchronized,
    Assert,
]);

/// What may follow the type of a local variable declaration's first token.
const AFTER_TYPE_NAME: TokenSet = kinds![Ident, Lt, Dot, LBracket];

// ─────────────────────────────────────────────────────────────────────────
// Decisions
// ─────────────────────────────────────────────────────────────────────────

fn set(kinds: &[JavaKind]) -> TokenSet {
    TokenSet::of(kinds)
}

/// What a class member is, after its modifiers.
///
/// A method and a field both start with a type of unbounded length, so the
/// method alternative is confirmed by trial.
pub static MEMBER_DECISION: LazyLock<Decision<JavaKind>> = LazyLock::new(|| {
    Decision::builder("member", 2)
        .alt(Alternative::new("class").lookahead(&[set(&[JavaKind::Class])]))
        .alt(Alternative::new("interface").lookahead(&[set(&[JavaKind::Interface])]))
        .alt(Alternative::new("enum").lookahead(&[set(&[JavaKind::Enum])]))
        .alt(annotation_type())
        .alt(Alternative::new("initializer").lookahead(&[set(&[JavaKind::LBrace])]))
        .alt(
            Alternative::new("constructor")
                .lookahead(&[set(&[JavaKind::Ident]), set(&[JavaKind::LParen])]),
        )
        .alt(
            Alternative::new("method")
                .lookahead(&[set(&[JavaKind::Lt])])
                .lookahead(&[set(&[JavaKind::Void])])
                .lookahead(&[TYPE_START])
                .speculative(),
        )
        .alt(Alternative::new("field").lookahead(&[TYPE_START]))
        .build()
});

/// `@interface`, as opposed to an annotation on the next declaration.
fn annotation_type() -> Alternative<JavaKind> {
    Alternative::new("annotation_type")
        .lookahead(&[set(&[JavaKind::At]), set(&[JavaKind::Interface])])
}

/// What an annotation type member is, after its modifiers: a nested type,
/// an element (`int value() default 0;`) or a constant.
pub static ANNOTATION_MEMBER_DECISION: LazyLock<Decision<JavaKind>> = LazyLock::new(|| {
    Decision::builder("annotation_member", 2)
        .alt(
            Alternative::new("type")
                .lookahead(&[kinds![Class, Interface, Enum]])
                .lookahead(&[set(&[JavaKind::At]), set(&[JavaKind::Interface])]),
        )
        .alt(Alternative::new("element").lookahead(&[TYPE_START]).speculative())
        .alt(Alternative::new("constant").lookahead(&[TYPE_START]))
        .build()
});

/// Local declaration or statement.
pub static BLOCK_STMT_DECISION: LazyLock<Decision<JavaKind>> = LazyLock::new(|| {
    Decision::builder("block_stmt", 2)
        .alt(Alternative::new("local_class").lookahead(&[set(&[JavaKind::Class])]))
        .alt(local_declaration())
        .alt(typed_local_declaration())
        .alt(Alternative::new("statement").lookahead(&[STATEMENT_START]))
        .build()
});

/// Declarations whose first token settles it: `final ...` or a primitive type.
fn local_declaration() -> Alternative<JavaKind> {
    Alternative::new("local_var")
        .lookahead(&[kinds![Final, At]])
        .lookahead(&[PRIMITIVE_TYPES])
}

/// `Name Name`, `Name<...`, `a.b.C x`, `T[] x`: a declaration only if the
/// whole declaration parses.
fn typed_local_declaration() -> Alternative<JavaKind> {
    Alternative::new("typed_local_var")
        .lookahead(&[set(&[JavaKind::Ident]), AFTER_TYPE_NAME])
        .speculative()
}

pub static STATEMENT_DECISION: LazyLock<Decision<JavaKind>> = LazyLock::new(|| {
    let keyword = |name: &'static str, kind: JavaKind| -> Alternative<JavaKind> {
        Alternative::new(name).lookahead(&[set(&[kind])])
    };
    Decision::builder("statement", 2)
        .alt(keyword("block", JavaKind::LBrace))
        .alt(keyword("empty", JavaKind::Semi))
        .alt(keyword("if", JavaKind::If))
        .alt(keyword("while", JavaKind::While))
        .alt(keyword("do", JavaKind::Do))
        .alt(keyword("for", JavaKind::For))
        .alt(keyword("return", JavaKind::Return))
        .alt(keyword("break", JavaKind::Break))
        .alt(keyword("continue", JavaKind::Continue))
        .alt(keyword("throw", JavaKind::Throw))
        .alt(keyword("try", JavaKind::Try))
        .alt(keyword("switch", JavaKind::Switch))
        .alt(keyword("synchronized", JavaKind::Synchronized))
        .alt(keyword("assert", JavaKind::Assert))
        .alt(
            Alternative::new("labeled")
                .lookahead(&[set(&[JavaKind::Ident]), set(&[JavaKind::Colon])]),
        )
        .alt(Alternative::new("expression").lookahead(&[EXPR_START]))
        .build()
});

/// `for (T x : xs)` against `for (init; cond; update)`.
pub static FOR_CONTROL_DECISION: LazyLock<Decision<JavaKind>> = LazyLock::new(|| {
    Decision::builder("for_control", 1)
        .alt(
            Alternative::new("for_each")
                .lookahead(&[TYPE_START.union(kinds![Final, At])])
                .speculative(),
        )
        .alt(Alternative::new("classic"))
        .build()
});

/// Initializer of a classic `for`: declaration or expression list.
pub static FOR_INIT_DECISION: LazyLock<Decision<JavaKind>> = LazyLock::new(|| {
    Decision::builder("for_init", 2)
        .alt(local_declaration())
        .alt(typed_local_declaration())
        .alt(Alternative::new("expressions").lookahead(&[EXPR_START]))
        .build()
});

/// Prefix operator, cast or postfix expression.
///
/// `(Name)` followed by an operand is a cast, `(Name) + x` and `(a + b)` are
/// parenthesized expressions; only a trial can tell.
pub static UNARY_DECISION: LazyLock<Decision<JavaKind>> = LazyLock::new(|| {
    let lparen = set(&[JavaKind::LParen]);
    Decision::builder("unary", 2)
        .alt(Alternative::new("prefix").lookahead(&[PREFIX_OPERATORS]))
        .alt(Alternative::new("primitive_cast").lookahead(&[lparen, PRIMITIVE_TYPES]))
        .alt(
            Alternative::new("cast")
                .lookahead(&[lparen, set(&[JavaKind::Ident])])
                .speculative(),
        )
        .alt(Alternative::new("postfix").lookahead(&[PRIMARY_START]))
        .build()
});

pub static PRIMARY_DECISION: LazyLock<Decision<JavaKind>> = LazyLock::new(|| {
    Decision::builder("primary", 1)
        .alt(Alternative::new("paren").lookahead(&[set(&[JavaKind::LParen])]))
        .alt(Alternative::new("literal").lookahead(&[LITERALS]))
        .alt(Alternative::new("this").lookahead(&[set(&[JavaKind::This])]))
        .alt(Alternative::new("super").lookahead(&[set(&[JavaKind::Super])]))
        .alt(Alternative::new("new").lookahead(&[set(&[JavaKind::New])]))
        .alt(Alternative::new("name").lookahead(&[set(&[JavaKind::Ident])]))
        .build()
});

/// Every decision of the grammar, for tooling.
pub fn decisions() -> [&'static Decision<JavaKind>; 8] {
    [
        &*MEMBER_DECISION,
        &*ANNOTATION_MEMBER_DECISION,
        &*BLOCK_STMT_DECISION,
        &*STATEMENT_DECISION,
        &*FOR_CONTROL_DECISION,
        &*FOR_INIT_DECISION,
        &*UNARY_DECISION,
        &*PRIMARY_DECISION,
    ]
}
