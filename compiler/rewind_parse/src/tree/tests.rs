#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::tests::toy::lex;
use pretty_assertions::assert_eq;

static SUM: Rule = Rule::new(1, "sum");
static TERM: Rule = Rule::new(2, "term");

/// Events for `a + b` as `(sum (term a) + (term b))`.
fn build_sum() -> SyntaxTree {
    let mut builder = TreeBuilder::new();
    builder.start_node(&SUM);
    builder.start_node(&TERM);
    builder.token(0);
    builder.finish_node();
    builder.token(1);
    builder.start_node(&TERM);
    builder.token(2);
    builder.finish_node();
    builder.finish_node();
    builder.finish()
}

#[test]
fn test_builder_nesting() {
    let tree = build_sum();
    let root = tree.root().unwrap();

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.kind(root).name(), "sum");
    assert_eq!(tree.children(root).len(), 3);
    assert_eq!(tree.children(root)[1], Child::Token(1));
    assert_eq!(tree.tokens_in_order(), vec![0, 1, 2]);
}

#[test]
fn test_sexpr() {
    let tokens = lex("a + b");
    let tree = build_sum();
    assert_eq!(tree.to_sexpr(&tokens), "(sum (term a) + (term b))");
}

#[test]
fn test_subtree_sexpr() {
    let tokens = lex("a + b");
    let tree = build_sum();
    let terms = tree.find_all("term");
    assert_eq!(tree.subtree_sexpr(terms[1], &tokens), "(term b)");
    let root = tree.root().unwrap();
    assert_eq!(tree.subtree_sexpr(root, &tokens), "(sum (term a) + (term b))");
}

#[test]
fn test_compact_sexpr_collapses_single_child_nodes() {
    let tokens = lex("a");
    let mut builder = TreeBuilder::new();
    builder.start_node(&SUM);
    builder.start_node(&TERM);
    builder.token(0);
    builder.finish_node();
    builder.finish_node();
    let tree = builder.finish();

    assert_eq!(tree.to_sexpr(&tokens), "(sum (term a))");
    assert_eq!(tree.to_compact_sexpr(&tokens), "(term a)");
}

#[test]
fn test_error_nodes() {
    let tokens = lex("a ; b");
    let mut builder = TreeBuilder::new();
    builder.start_node(&SUM);
    builder.token(0);
    builder.start_error();
    builder.token(1);
    builder.finish_node();
    builder.finish_node();
    builder.start_error();
    builder.token(2);
    builder.finish_node();
    let tree = builder.finish();

    assert_eq!(tree.error_count(), 2);
    assert_eq!(tree.top_level().len(), 2);
    assert_eq!(tree.to_sexpr(&tokens), "(sum a (<error> ;)) (<error> b)");
    assert_eq!(tree.tokens_in_order(), vec![0, 1, 2]);
}

#[test]
fn test_find_all_is_preorder() {
    let tree = build_sum();
    let terms = tree.find_all("term");
    assert_eq!(terms.len(), 2);
    assert!(terms[0] < terms[1]);
    assert_eq!(tree.tokens_of(terms[1]), vec![2]);
    assert_eq!(tree.find_first("sum"), tree.root());
    assert!(tree.find_first("missing").is_none());
}

#[test]
fn test_span() {
    let tokens = lex("a + b");
    let tree = build_sum();
    let root = tree.root().unwrap();
    assert_eq!(tree.span(root, &tokens), Some(Span::new(0, 5)));

    let mut builder = TreeBuilder::new();
    builder.start_node(&SUM);
    builder.finish_node();
    let empty = builder.finish();
    assert_eq!(empty.span(empty.root().unwrap(), &tokens), None);
}

#[test]
fn test_noop_sink() {
    let mut sink = NoopSink;
    sink.start_node(&SUM);
    sink.token(0);
    sink.finish_node();
    sink.finish();
}
