//! Bitset of token kinds.
//!
//! Used for lookahead sets in decision tables, for the expected-token list
//! of diagnostics, and for recovery (FOLLOW) sets.
//!
//! # Performance
//!
//! - Membership: one shift and AND.
//! - Union, intersection, difference: one bitwise op on a `u128`.
//! - Iteration: `trailing_zeros` per member, in index order.
//!
//! Sets are `Copy` and the index-based constructors are `const`, so
//! grammars build their FOLLOW and lookahead sets at compile time.
//!
//! # Platform Support
//!
//! Kind indices must be below 128. Larger indices are ignored by
//! [`TokenSet::from_indices`] and never reported as members.

use super::TokenKind;

/// A set of token kinds using bitset representation for O(1) membership testing.
///
/// Each bit in the `u128` corresponds to a [`TokenKind::index`]. The set is
/// not tied to a kind type, so grammars can declare sets as `const`s from
/// `#[repr(u8)]` discriminants:
///
/// ```ignore
/// const STMT_FOLLOW: TokenSet = TokenSet::from_indices(&[
///     JavaKind::Semi as u8,
///     JavaKind::RBrace as u8,
/// ]);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    /// The empty set.
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Every index `0..128`. Used as the "any token" lookahead.
    pub const ANY: TokenSet = TokenSet(u128::MAX);

    #[inline]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Build a set from raw kind indices. Indices `>= 128` are ignored.
    pub const fn from_indices(indices: &[u8]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < indices.len() {
            if indices[i] < 128 {
                bits |= 1u128 << indices[i];
            }
            i += 1;
        }
        Self(bits)
    }

    /// Build a set from kinds.
    pub fn of<K: TokenKind>(kinds: &[K]) -> Self {
        kinds.iter().fold(Self::new(), |set, &kind| set.with(kind))
    }

    /// A set containing one kind.
    #[inline]
    pub fn single<K: TokenKind>(kind: K) -> Self {
        Self::new().with(kind)
    }

    /// Add a raw index (builder pattern for const contexts).
    #[inline]
    #[must_use]
    pub const fn with_index(self, index: u8) -> Self {
        if index < 128 {
            Self(self.0 | (1u128 << index))
        } else {
            self
        }
    }

    #[inline]
    #[must_use]
    pub fn with<K: TokenKind>(self, kind: K) -> Self {
        self.with_index(kind.index())
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    #[inline]
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    pub const fn contains_index(&self, index: u8) -> bool {
        index < 128 && (self.0 & (1u128 << index)) != 0
    }

    #[inline]
    pub fn contains<K: TokenKind>(&self, kind: K) -> bool {
        self.contains_index(kind.index())
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if the two sets share at least one kind.
    #[inline]
    pub const fn intersects(&self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn bits(&self) -> u128 {
        self.0
    }

    #[inline]
    pub fn insert<K: TokenKind>(&mut self, kind: K) {
        *self = self.with(kind);
    }

    #[inline]
    pub fn union_with(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Iterate over the kind indices in ascending order.
    pub fn iter_indices(&self) -> TokenSetIter {
        TokenSetIter { bits: self.0 }
    }

    /// Iterate over the kinds of type `K` in this set, skipping indices
    /// that do not map to a kind.
    pub fn kinds<K: TokenKind>(&self) -> impl Iterator<Item = K> {
        self.iter_indices().filter_map(K::from_index)
    }

    /// Display names of the kinds in this set, in index order.
    pub fn names<K: TokenKind>(&self) -> Vec<&'static str> {
        self.kinds::<K>().map(TokenKind::display_name).collect()
    }

    /// Format a list of names for diagnostics.
    ///
    /// Returns "`a`, `b`, or `c`" for several names, "`a`" for one,
    /// and "nothing" for none.
    pub fn format_names(names: &[&str]) -> String {
        match names {
            [] => "nothing".to_string(),
            [single] => format!("`{single}`"),
            [first, second] => format!("`{first}` or `{second}`"),
            [rest @ .., last] => {
                let rest_str = rest
                    .iter()
                    .map(|n| format!("`{n}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{rest_str}, or `{last}`")
            }
        }
    }

    /// Human-readable list of the kinds in this set.
    pub fn format_expected<K: TokenKind>(&self) -> String {
        Self::format_names(&self.names::<K>())
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter_indices()).finish()
    }
}

/// Iterator over kind indices in a `TokenSet`.
pub struct TokenSetIter {
    bits: u128,
}

impl Iterator for TokenSetIter {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "u128::trailing_zeros() max is 127"
        )]
        let idx = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.bits.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for TokenSetIter {}
