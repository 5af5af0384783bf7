#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::tests::toy::{lex, Toy};

#[test]
fn test_cursor_navigation() {
    let tokens = lex("a b c");
    let mut cursor = Cursor::new(&tokens);

    assert!(cursor.check(Toy::A));
    assert!(!cursor.is_at_end());
    assert_eq!(cursor.consume().kind, Toy::A);
    assert_eq!(cursor.consume().kind, Toy::B);
    assert_eq!(cursor.current_text(), "c");
    cursor.consume();
    assert!(cursor.is_at_end());
    assert_eq!(cursor.position(), 3);
}

#[test]
fn test_hidden_tokens_are_skipped() {
    let tokens = lex("a // note\nb");
    let mut cursor = Cursor::new(&tokens);

    assert_eq!(cursor.token_count(), 3);
    cursor.consume();
    assert!(cursor.check(Toy::B));
    // Index 1 in the full list is the comment.
    assert_eq!(cursor.current_index(), 2);
}

#[test]
fn test_peek() {
    let tokens = lex("a b");
    let cursor = Cursor::new(&tokens);

    assert_eq!(cursor.peek(0).unwrap().kind, Toy::A);
    assert_eq!(cursor.peek(1).unwrap().kind, Toy::B);
    assert_eq!(cursor.peek(2).unwrap().kind, Toy::Eof);
    assert_eq!(cursor.peek_kind(7), Toy::Eof);

    let err = cursor.peek(3).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::EndOfInput);
    assert_eq!(err.position, 2);
}

#[test]
fn test_empty_input_starts_at_eof() {
    let tokens = lex("");
    let cursor = Cursor::new(&tokens);
    assert!(cursor.is_at_end());
    assert_eq!(cursor.position(), 0);
}

#[test]
fn test_check_set() {
    let tokens = lex("c");
    let cursor = Cursor::new(&tokens);
    assert!(cursor.check_set(TokenSet::of(&[Toy::B, Toy::C])));
    assert!(!cursor.check_set(TokenSet::of(&[Toy::A, Toy::B])));
}

#[test]
fn test_mark_rewind() {
    let tokens = lex("a b c d");
    let mut cursor = Cursor::new(&tokens);

    cursor.consume();
    let mark = cursor.mark();
    cursor.consume();
    cursor.consume();
    assert!(cursor.check(Toy::D));

    cursor.rewind(mark).unwrap();
    assert!(cursor.check(Toy::B));

    // A mark stays usable until released.
    cursor.consume();
    cursor.rewind(mark).unwrap();
    assert_eq!(cursor.position(), 1);

    cursor.release(mark).unwrap();
    assert_eq!(cursor.outstanding_marks(), 0);
}

#[test]
fn test_marks_release_out_of_order() {
    let tokens = lex("a b c d");
    let mut cursor = Cursor::new(&tokens);

    let first = cursor.mark();
    cursor.consume();
    let second = cursor.mark();
    cursor.consume();
    let third = cursor.mark();
    assert_eq!(cursor.outstanding_marks(), 3);

    cursor.release(second).unwrap();
    cursor.rewind(first).unwrap();
    assert_eq!(cursor.position(), 0);
    cursor.rewind(third).unwrap();
    assert_eq!(cursor.position(), 2);
    cursor.release(first).unwrap();
    cursor.release(third).unwrap();
    assert_eq!(cursor.outstanding_marks(), 0);
}

#[test]
fn test_stale_mark_is_rejected() {
    let tokens = lex("a b");
    let mut cursor = Cursor::new(&tokens);

    let old = cursor.mark();
    cursor.release(old).unwrap();
    assert_eq!(
        cursor.rewind(old),
        Err(CursorError::StaleMark { slot: 0 })
    );
    assert!(cursor.release(old).is_err());

    // The slot is reused; the old handle must not alias the new mark.
    cursor.consume();
    let new = cursor.mark();
    assert_ne!(old, new);
    assert!(cursor.rewind(old).is_err());
    cursor.rewind(new).unwrap();
    assert_eq!(cursor.position(), 1);
}

#[test]
fn test_unexpected_error() {
    let tokens = lex("a\n  )");
    let mut cursor = Cursor::new(&tokens);
    cursor.consume();

    let err = cursor.unexpected(TokenSet::of(&[Toy::Semi, Toy::Comma]));
    assert_eq!(err.to_string(), "expected `;` or `,`, found `)` at line 2, column 3");
    assert_eq!(err.position, 1);
}

#[test]
fn test_describe_eof() {
    let tokens = lex("a");
    let mut cursor = Cursor::new(&tokens);
    cursor.consume();
    assert_eq!(cursor.describe_current(), "end of input");
}
