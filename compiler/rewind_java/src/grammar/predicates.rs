//! Operators assembled from adjacent `<`, `>` and `=` tokens.
//!
//! Each predicate also looks one token past the operator so that a shorter
//! operator never matches the prefix of a longer one: `>>` is not a shift
//! when it is the start of `>>=` or `>>>`.

use crate::JavaKind;
use rewind_ir::Token;
use rewind_parse::{adjacent, kinds_are, SemanticPredicate};

type Captured<'a, 'b> = &'a [&'b Token<JavaKind>];

/// True if `next` touches `prev` and is one of `kinds`.
fn glued(prev: &Token<JavaKind>, next: &Token<JavaKind>, kinds: &[JavaKind]) -> bool {
    prev.is_adjacent_to(next) && kinds.contains(&next.kind)
}

/// The first `kinds.len()` captured tokens spell one operator, and the token
/// after them does not extend it with any of `extenders`.
fn operator(tokens: Captured<'_, '_>, kinds: &[JavaKind], extenders: &[JavaKind]) -> bool {
    let (op, rest) = tokens.split_at(kinds.len().min(tokens.len()));
    if !(adjacent(op) && kinds_are(op, kinds)) {
        return false;
    }
    match (op.last(), rest.first()) {
        (Some(last), Some(next)) => !glued(last, next, extenders),
        _ => true,
    }
}

const EQ: JavaKind = JavaKind::Eq;
const GT: JavaKind = JavaKind::Gt;
const LT: JavaKind = JavaKind::Lt;

pub static LESS: SemanticPredicate<JavaKind> =
    SemanticPredicate::new("less", 2, |t| operator(t, &[LT], &[LT, EQ]));

pub static GREATER: SemanticPredicate<JavaKind> =
    SemanticPredicate::new("greater", 2, |t| operator(t, &[GT], &[GT, EQ]));

pub static LESS_EQUAL: SemanticPredicate<JavaKind> =
    SemanticPredicate::new("less_equal", 2, |t| operator(t, &[LT, EQ], &[]));

pub static GREATER_EQUAL: SemanticPredicate<JavaKind> =
    SemanticPredicate::new("greater_equal", 2, |t| operator(t, &[GT, EQ], &[]));

pub static SHIFT_LEFT: SemanticPredicate<JavaKind> =
    SemanticPredicate::new("shift_left", 3, |t| operator(t, &[LT, LT], &[EQ]));

pub static SHIFT_RIGHT: SemanticPredicate<JavaKind> =
    SemanticPredicate::new("shift_right", 3, |t| operator(t, &[GT, GT], &[GT, EQ]));

pub static UNSIGNED_SHIFT_RIGHT: SemanticPredicate<JavaKind> =
    SemanticPredicate::new("unsigned_shift_right", 4, |t| {
        operator(t, &[GT, GT, GT], &[EQ])
    });

pub static SHIFT_LEFT_ASSIGN: SemanticPredicate<JavaKind> =
    SemanticPredicate::new("shift_left_assign", 3, |t| operator(t, &[LT, LT, EQ], &[]));

pub static SHIFT_RIGHT_ASSIGN: SemanticPredicate<JavaKind> =
    SemanticPredicate::new("shift_right_assign", 3, |t| operator(t, &[GT, GT, EQ], &[]));

pub static UNSIGNED_SHIFT_RIGHT_ASSIGN: SemanticPredicate<JavaKind> =
    SemanticPredicate::new("unsigned_shift_right_assign", 4, |t| {
        operator(t, &[GT, GT, GT, EQ], &[])
    });

/// Relational operators and their width in tokens, longest first.
pub(crate) static RELATIONAL_OPERATORS: [(&SemanticPredicate<JavaKind>, usize); 4] = [
    (&LESS_EQUAL, 2),
    (&GREATER_EQUAL, 2),
    (&LESS, 1),
    (&GREATER, 1),
];

pub(crate) static SHIFT_OPERATORS: [(&SemanticPredicate<JavaKind>, usize); 3] = [
    (&UNSIGNED_SHIFT_RIGHT, 3),
    (&SHIFT_RIGHT, 2),
    (&SHIFT_LEFT, 2),
];

pub(crate) static COMPOUND_ASSIGN_OPERATORS: [(&SemanticPredicate<JavaKind>, usize); 3] = [
    (&UNSIGNED_SHIFT_RIGHT_ASSIGN, 4),
    (&SHIFT_RIGHT_ASSIGN, 3),
    (&SHIFT_LEFT_ASSIGN, 3),
];

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::lex;
    use rewind_parse::Cursor;

    /// Evaluate `predicate` at the first token of `source`.
    fn holds(predicate: &SemanticPredicate<JavaKind>, source: &str) -> bool {
        let (tokens, _) = lex(source);
        predicate.evaluate(&Cursor::new(&tokens))
    }

    #[test]
    fn test_shift_right() {
        assert!(holds(&SHIFT_RIGHT, ">> x"));
        assert!(!holds(&SHIFT_RIGHT, "> > x"));
        assert!(!holds(&SHIFT_RIGHT, ">>= x"));
        assert!(!holds(&SHIFT_RIGHT, ">>> x"));
        assert!(!holds(&SHIFT_RIGHT, ">/* */> x"));
    }

    #[test]
    fn test_unsigned_shift_right() {
        assert!(holds(&UNSIGNED_SHIFT_RIGHT, ">>> x"));
        assert!(!holds(&UNSIGNED_SHIFT_RIGHT, ">> > x"));
        assert!(!holds(&UNSIGNED_SHIFT_RIGHT, ">>>= x"));
        assert!(holds(&UNSIGNED_SHIFT_RIGHT_ASSIGN, ">>>= x"));
    }

    #[test]
    fn test_comparisons() {
        assert!(holds(&GREATER, "> x"));
        assert!(!holds(&GREATER, ">= x"));
        assert!(!holds(&GREATER, ">> x"));
        assert!(holds(&GREATER, "> = x"));
        assert!(holds(&GREATER_EQUAL, ">= x"));
        assert!(!holds(&GREATER_EQUAL, "> = x"));
        assert!(holds(&LESS, "< x"));
        assert!(!holds(&LESS, "<= x"));
        assert!(holds(&LESS_EQUAL, "<= x"));
    }

    #[test]
    fn test_shift_left_and_assignments() {
        assert!(holds(&SHIFT_LEFT, "<< 2"));
        assert!(!holds(&SHIFT_LEFT, "<<= 2"));
        assert!(holds(&SHIFT_LEFT_ASSIGN, "<<= 2"));
        assert!(holds(&SHIFT_RIGHT_ASSIGN, ">>= 2"));
        assert!(!holds(&SHIFT_RIGHT_ASSIGN, ">> = 2"));
    }

    #[test]
    fn test_needs_an_operand_after_the_operator() {
        // The lookahead token past the operator must exist.
        assert!(!holds(&SHIFT_RIGHT, ">>"));
        assert!(!holds(&GREATER, ">"));
    }
}
