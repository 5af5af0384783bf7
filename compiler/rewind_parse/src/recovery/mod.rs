//! Resynchronization after a parse error.
//!
//! A recovering rule skips tokens until one that can legally follow it (its
//! follow set) or one that terminates it. The skipped tokens are reported
//! to the caller so they can go into an error node.

use crate::cursor::Cursor;
use rewind_ir::{TokenKind, TokenSet};

/// Advance the cursor until reaching a token in `recovery` or EOF.
///
/// `on_skip` receives the token-list index of every skipped token.
/// Returns `true` if a recovery token was found, `false` if EOF was reached.
pub fn synchronize<K: TokenKind>(
    cursor: &mut Cursor<'_, K>,
    recovery: TokenSet,
    mut on_skip: impl FnMut(usize),
) -> bool {
    while !cursor.is_at_end() {
        if cursor.check_set(recovery) {
            return true;
        }
        on_skip(cursor.current_index());
        cursor.consume();
    }
    false
}
