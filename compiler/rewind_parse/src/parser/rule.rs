//! Static rule descriptors.

use rewind_ir::TokenSet;

/// Dense identifier of a grammar rule, used as the memo key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(u16);

impl RuleId {
    #[inline]
    pub const fn new(raw: u16) -> Self {
        RuleId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

/// A nonterminal: its id, its name for diagnostics and trees, and the
/// tokens recovery synchronizes on.
///
/// Declare one `static` per rule:
///
/// ```text
/// static STATEMENT: Rule = Rule::new(12, "statement")
///     .follow(STATEMENT_FOLLOW)
///     .terminated_by(TokenSet::from_indices(&[SEMI]));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub id: RuleId,
    pub name: &'static str,
    /// Tokens that can follow the rule. Recovery stops before them.
    pub follow: TokenSet,
    /// Tokens that end the rule. Recovery stops after them.
    pub terminators: TokenSet,
}

impl Rule {
    pub const fn new(id: u16, name: &'static str) -> Self {
        Rule {
            id: RuleId(id),
            name,
            follow: TokenSet::EMPTY,
            terminators: TokenSet::EMPTY,
        }
    }

    #[must_use]
    pub const fn follow(mut self, follow: TokenSet) -> Self {
        self.follow = follow;
        self
    }

    #[must_use]
    pub const fn terminated_by(mut self, terminators: TokenSet) -> Self {
        self.terminators = terminators;
        self
    }

    /// Where recovery may stop.
    #[inline]
    pub const fn sync_set(&self) -> TokenSet {
        self.follow.union(self.terminators)
    }
}
