//! Shared fixtures and end-to-end runtime tests.
//!
//! - `toy`: a tiny token vocabulary and lexer
//! - `grammar`: a grammar over it with generic/shift, cast/paren and
//!   common-prefix ambiguities
//! - `scenarios`: end-to-end behavior of decisions, predicates and recovery
//! - `properties`: proptest checks of rewind, memoization and tree invariants

#![allow(clippy::unwrap_used, clippy::expect_used)]

pub(crate) mod toy;


use crate::{ParseError, ParseOutput, Parser, ParserConfig, SyntaxTree, TreeBuilder};
use toy::Toy;

/// Parse `source` as a `program` and render the compact tree.
pub(crate) fn parse_program(
    source: &str,
    config: ParserConfig,
) -> Result<(ParseOutput<SyntaxTree>, rewind_ir::TokenList<Toy>), ParseError> {
    let tokens = toy::lex(source);
    let output = Parser::with_sink(&tokens, config, TreeBuilder::new())
        .parse(&grammar::PROGRAM, grammar::program)?;
    Ok((output, tokens))
}

/// Compact s-expression of a strict parse of `source`.
pub(crate) fn sexpr(source: &str) -> String {
    let (output, tokens) = parse_program(source, ParserConfig::default()).unwrap();
    output.value.to_compact_sexpr(&tokens)
}
