use super::*;
use pretty_assertions::assert_eq;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
enum Kind {
    Eof,
    Ident,
    Gt,
    Comment,
}

impl TokenKind for Kind {
    const EOF: Self = Kind::Eof;

    fn index(self) -> u8 {
        self as u8
    }

    fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Kind::Eof),
            1 => Some(Kind::Ident),
            2 => Some(Kind::Gt),
            3 => Some(Kind::Comment),
            _ => None,
        }
    }

    fn display_name(self) -> &'static str {
        match self {
            Kind::Eof => "end of input",
            Kind::Ident => "identifier",
            Kind::Gt => ">",
            Kind::Comment => "comment",
        }
    }
}

fn tok(kind: Kind, start: u32, end: u32, line: u32, column: u32) -> Token<Kind> {
    Token::new(kind, Span::new(start, end), Position::new(line, column))
}

#[test]
fn test_token_list_appends_eof() {
    let list = TokenList::from_tokens("a", vec![tok(Kind::Ident, 0, 1, 1, 1)]);
    assert_eq!(list.len(), 2);
    assert_eq!(list[list.eof_index()].kind, Kind::Eof);
    assert_eq!(list[1].span, Span::point(1));
    assert_eq!(list[1].pos, Position::new(1, 2));
}

#[test]
fn test_token_list_drops_stray_eof() {
    let list = TokenList::from_tokens(
        "a b",
        vec![
            tok(Kind::Ident, 0, 1, 1, 1),
            tok(Kind::Eof, 1, 1, 1, 2),
            tok(Kind::Ident, 2, 3, 1, 3),
        ],
    );
    let kinds: Vec<_> = list.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![Kind::Ident, Kind::Ident, Kind::Eof]);
}

#[test]
fn test_token_list_empty_source() {
    let list: TokenList<Kind> = TokenList::from_tokens("", Vec::new());
    assert_eq!(list.len(), 1);
    assert_eq!(list.on_channel(), &[0]);
    assert_eq!(list[0].pos, Position::new(1, 1));
}

#[test]
fn test_hidden_tokens_skipped_on_channel() {
    let list = TokenList::from_tokens(
        "a /*c*/ b",
        vec![
            tok(Kind::Ident, 0, 1, 1, 1),
            tok(Kind::Comment, 2, 7, 1, 3).hidden(),
            tok(Kind::Ident, 8, 9, 1, 9),
        ],
    );
    assert_eq!(list.on_channel(), &[0, 2, 3]);
    assert_eq!(list.tags(), &[1, 3, 1, 0]);
    let visible: Vec<_> = list.iter_on_channel().map(|t| list.text(t)).collect();
    assert_eq!(visible, vec!["a", "b", ""]);
}

#[test]
fn test_adjacency() {
    let first = tok(Kind::Gt, 0, 1, 1, 1);
    let touching = tok(Kind::Gt, 1, 2, 1, 2);
    let spaced = tok(Kind::Gt, 2, 3, 1, 3);
    assert!(first.is_adjacent_to(&touching));
    assert!(!first.is_adjacent_to(&spaced));
}

#[test]
fn test_token_set_membership() {
    let set = TokenSet::of(&[Kind::Ident, Kind::Gt]);
    assert_eq!(set.count(), 2);
    assert!(set.contains(Kind::Ident));
    assert!(!set.contains(Kind::Eof));
    assert!(TokenSet::EMPTY.is_empty());
    assert!(TokenSet::ANY.contains(Kind::Comment));
}

#[test]
fn test_token_set_const_builders() {
    const SET: TokenSet = TokenSet::from_indices(&[Kind::Gt as u8, Kind::Eof as u8]);
    assert_eq!(SET, TokenSet::new().with(Kind::Gt).with(Kind::Eof));
    assert_eq!(TokenSet::new().with_index(200), TokenSet::EMPTY);
}

#[test]
fn test_token_set_algebra() {
    let a = TokenSet::of(&[Kind::Ident, Kind::Gt]);
    let b = TokenSet::of(&[Kind::Gt, Kind::Eof]);
    assert_eq!(a.union(b).count(), 3);
    assert_eq!(a.intersection(b), TokenSet::single(Kind::Gt));
    assert_eq!(a.difference(b), TokenSet::single(Kind::Ident));
    assert!(a.intersects(b));
    assert!(!a.difference(b).intersects(b));
}

#[test]
fn test_token_set_format_expected() {
    assert_eq!(TokenSet::EMPTY.format_expected::<Kind>(), "nothing");
    assert_eq!(TokenSet::single(Kind::Gt).format_expected::<Kind>(), "`>`");
    assert_eq!(
        TokenSet::of(&[Kind::Ident, Kind::Gt]).format_expected::<Kind>(),
        "`identifier` or `>`"
    );
    assert_eq!(
        TokenSet::of(&[Kind::Eof, Kind::Ident, Kind::Gt]).format_expected::<Kind>(),
        "`end of input`, `identifier`, or `>`"
    );
}

#[test]
fn test_token_set_iter_is_exact() {
    let set = TokenSet::of(&[Kind::Comment, Kind::Eof]);
    let iter = set.iter_indices();
    assert_eq!(iter.len(), 2);
    assert_eq!(iter.collect::<Vec<_>>(), vec![0, 3]);
}
