//! A Java-subset front end on the rewind parser runtime.
//!
//! The subset covers packages, imports, classes, interfaces, enums and
//! annotation types (`@interface`) with generics, every modifier keyword,
//! fields, methods and constructors, the usual statements including
//! `synchronized` and `assert`, and the full expression precedence ladder
//! with casts and object creation.
//!
//! Not included: lambdas and method references, switch expressions,
//! records, try-with-resources, varargs parameters and generic method
//! calls (`a.<T>m()`).
//!
//! ```
//! use rewind_java::parse;
//! use rewind_parse::ParserConfig;
//!
//! let file = parse("class A { List<List<String>> xs; }", ParserConfig::default()).unwrap();
//! assert!(file.is_clean());
//! assert_eq!(file.tree.find_all("type_args").len(), 2);
//! ```

mod kind;
mod lexer;
mod parallel;

pub mod grammar;

pub use kind::{
    JavaKind, LITERALS, MODIFIERS, PREFIX_OPERATORS, PRIMITIVE_TYPES, SIMPLE_ASSIGN_OPERATORS,
    TYPE_DECL_START,
};
pub use lexer::{lex, LexError};
pub use parallel::parse_all;

use grammar::{compilation_unit, COMPILATION_UNIT};
use rewind_ir::TokenList;
use rewind_parse::{
    NoopSink, ParseError, ParseObserver, ParseOutput, ParseStats, Parser, ParserConfig,
    SyntaxTree, TreeBuilder, TreeSink,
};
use tracing::debug;

/// A lexed and parsed source file.
#[derive(Debug)]
pub struct ParsedFile {
    pub tokens: TokenList<JavaKind>,
    pub lex_errors: Vec<LexError>,
    pub tree: SyntaxTree,
    /// Parse errors recovered from; always empty in strict mode.
    pub diagnostics: Vec<ParseError>,
    pub stats: ParseStats,
}

impl ParsedFile {
    /// No lexical or syntax errors.
    pub fn is_clean(&self) -> bool {
        self.lex_errors.is_empty() && self.diagnostics.is_empty()
    }

    /// The tree as a compact s-expression.
    pub fn sexpr(&self) -> String {
        self.tree.to_compact_sexpr(&self.tokens)
    }
}

/// Lex and parse `source` as a compilation unit.
///
/// In strict mode the first syntax error is returned. In recovery mode the
/// parse always produces a tree and the errors are in `diagnostics`. Lexical
/// errors never fail the parse by themselves: the offending text becomes an
/// `invalid token` the grammar then rejects.
pub fn parse(source: &str, config: ParserConfig) -> Result<ParsedFile, ParseError> {
    let (tokens, lex_errors) = lex(source);
    let output = parse_tokens(&tokens, config, TreeBuilder::new(), None)?;
    debug!(
        tokens = tokens.len(),
        steps = output.stats.steps,
        trials = output.stats.trials,
        diagnostics = output.diagnostics.len(),
        "parsed compilation unit"
    );
    Ok(ParsedFile {
        tree: output.value,
        diagnostics: output.diagnostics,
        stats: output.stats,
        tokens,
        lex_errors,
    })
}

/// Check `tokens` against the grammar without building a tree.
pub fn recognize(
    tokens: &TokenList<JavaKind>,
    config: ParserConfig,
) -> Result<ParseOutput<()>, ParseError> {
    parse_tokens(tokens, config, NoopSink, None)
}

/// Parse `tokens` as a compilation unit into `sink`, reporting parse events
/// to `observer` if one is given.
pub fn parse_tokens<'a, S: TreeSink>(
    tokens: &'a TokenList<JavaKind>,
    config: ParserConfig,
    sink: S,
    observer: Option<&'a mut dyn ParseObserver>,
) -> Result<ParseOutput<S::Output>, ParseError> {
    let mut parser = Parser::with_sink(tokens, config, sink);
    if let Some(observer) = observer {
        parser = parser.with_observer(observer);
    }
    parser.parse(&COMPILATION_UNIT, compilation_unit)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_parse_strict_and_recovering() {
        let source = "class A { int x = ; int y; }";
        let err = parse(source, ParserConfig::default()).unwrap_err();
        assert_eq!(err.rule, Some("unary"));

        let file = parse(source, ParserConfig::default().with_recovery(true)).unwrap();
        assert_eq!(file.diagnostics.len(), 1);
        assert_eq!(file.tree.find_all("member").len(), 2);
        assert_eq!(file.tree.error_count(), 1);
        assert!(!file.is_clean());
    }

    #[test]
    fn test_lex_errors_are_kept() {
        let file = parse("class A { } #", ParserConfig::default().with_recovery(true)).unwrap();
        assert_eq!(file.lex_errors.len(), 1);
        assert_eq!(file.diagnostics.len(), 1);
    }

    #[test]
    fn test_recognize_matches_parse() {
        let source = "class A { void f() { for (int i = 0; i < n; i++) g(i); } }";
        let (tokens, _) = lex(source);
        let recognized = recognize(&tokens, ParserConfig::default()).unwrap();
        let parsed = parse(source, ParserConfig::default()).unwrap();
        assert_eq!(recognized.stats, parsed.stats);
    }
}
