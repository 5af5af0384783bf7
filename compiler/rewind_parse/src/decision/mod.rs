//! Lookahead decisions.
//!
//! A decision is a choice point in the grammar: which alternative of a rule
//! to take given the upcoming tokens. Each alternative lists the token
//! sequences (up to `k` long) that can begin it. The builder turns those
//! paths into a small DFA by subset construction; at parse time
//! [`Decision::predict`] walks the DFA over `peek(0)`, `peek(1)`, ... until
//! one alternative is left, `k` tokens have been seen, or nothing matches.
//!
//! The DFA never consumes tokens. When more than one alternative survives
//! `k` tokens of lookahead the decision is ambiguous and the parser settles
//! it with predicates and speculative trials (see `Parser::decide`).
//!
//! Decisions are immutable after building and are normally kept in
//! `LazyLock` statics shared by every parse.

use crate::cursor::Cursor;
use crate::predicate::SemanticPredicate;
use rewind_ir::{TokenKind, TokenSet};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use tracing::{debug, warn};

/// Index of a DFA state.
type StateId = u32;

/// Index of a lookahead path in `Decision::paths`.
type PathId = u32;

// ─────────────────────────────────────────────────────────────────────────
// Alternatives
// ─────────────────────────────────────────────────────────────────────────

/// One alternative of a decision.
pub struct Alternative<K: 'static> {
    pub name: &'static str,
    paths: Vec<Vec<TokenSet>>,
    predicate: Option<SemanticPredicate<K>>,
    speculative: bool,
}

impl<K: TokenKind> Alternative<K> {
    pub fn new(name: &'static str) -> Self {
        Alternative {
            name,
            paths: Vec::new(),
            predicate: None,
            speculative: false,
        }
    }

    /// Add a lookahead path: `path[i]` is the set of kinds allowed at
    /// `peek(i)`.
    ///
    /// An alternative without paths matches any input; use it for the
    /// catch-all branch of a rule.
    #[must_use]
    pub fn lookahead(mut self, path: &[TokenSet]) -> Self {
        self.paths.push(path.to_vec());
        self
    }

    /// Guard the alternative with a semantic predicate.
    #[must_use]
    pub fn predicate(mut self, predicate: SemanticPredicate<K>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Confirm the alternative with a speculative trial before committing,
    /// even when the DFA predicts it alone.
    #[must_use]
    pub fn speculative(mut self) -> Self {
        self.speculative = true;
        self
    }

    #[inline]
    pub fn semantic_predicate(&self) -> Option<&SemanticPredicate<K>> {
        self.predicate.as_ref()
    }

    #[inline]
    pub fn is_speculative(&self) -> bool {
        self.speculative
    }
}

impl<K> fmt::Debug for Alternative<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alternative")
            .field("name", &self.name)
            .field("paths", &self.paths)
            .field("predicate", &self.predicate)
            .field("speculative", &self.speculative)
            .finish()
    }
}

/// Alternatives still in play, ascending.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AltSet(SmallVec<[usize; 4]>);

impl AltSet {
    pub fn from_sorted(alts: impl IntoIterator<Item = usize>) -> Self {
        let mut set: SmallVec<[usize; 4]> = alts.into_iter().collect();
        set.sort_unstable();
        set.dedup();
        AltSet(set)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn contains(&self, alt: usize) -> bool {
        self.0.contains(&alt)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Result of running a decision's DFA.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prediction {
    /// Exactly one alternative fits the lookahead.
    Unique(usize),
    /// Several alternatives fit `k` tokens of lookahead.
    Ambiguous(AltSet),
    /// Nothing fits. `expected` holds the kinds that would have continued
    /// the lookahead at `peek(depth)`.
    NoViable { expected: TokenSet, depth: usize },
}

// ─────────────────────────────────────────────────────────────────────────
// DFA
// ─────────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
enum Accept {
    /// Keep reading lookahead.
    Continue,
    Unique(usize),
    Ambiguous(AltSet),
}

#[derive(Clone, Debug)]
struct DfaState {
    accept: Accept,
    /// Disjoint kind sets and their successor states.
    edges: Vec<(TokenSet, StateId)>,
    /// Kinds some surviving path accepts here; reported on a dead end.
    expected: TokenSet,
}

/// A lookahead path tagged with its alternative.
#[derive(Clone, Debug)]
struct Path {
    alt: usize,
    sets: Vec<TokenSet>,
}

/// A compiled decision.
pub struct Decision<K: 'static> {
    name: &'static str,
    k: usize,
    alternatives: Vec<Alternative<K>>,
    paths: Vec<Path>,
    states: Vec<DfaState>,
}

impl<K: TokenKind> Decision<K> {
    /// Start building a decision named `name` with at most `k` tokens of
    /// lookahead.
    pub fn builder(name: &'static str, k: usize) -> DecisionBuilder<K> {
        DecisionBuilder {
            name,
            k,
            alternatives: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Effective lookahead depth (at least 1).
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn alternatives(&self) -> &[Alternative<K>] {
        &self.alternatives
    }

    #[inline]
    pub fn alternative(&self, alt: usize) -> Option<&Alternative<K>> {
        self.alternatives.get(alt)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Run the DFA over the tokens at the cursor without consuming any.
    pub fn predict(&self, cursor: &Cursor<'_, K>) -> Prediction {
        let mut state = 0usize;
        let mut depth = 0usize;
        loop {
            let current = &self.states[state];
            match &current.accept {
                Accept::Unique(alt) => return Prediction::Unique(*alt),
                Accept::Ambiguous(alts) => return Prediction::Ambiguous(alts.clone()),
                Accept::Continue => {}
            }
            let kind = cursor.peek_kind(depth);
            let next = current
                .edges
                .iter()
                .find(|(set, _)| set.contains(kind))
                .map(|&(_, target)| target);
            match next {
                Some(target) => {
                    state = target as usize;
                    depth += 1;
                }
                None => {
                    return Prediction::NoViable {
                        expected: current.expected,
                        depth,
                    }
                }
            }
        }
    }

    /// The kinds that can start some alternative.
    pub fn first_set(&self) -> TokenSet {
        let start = &self.states[0];
        match start.accept {
            Accept::Continue => start.expected,
            // Catch-all alternatives make the first token irrelevant.
            _ => self
                .paths
                .iter()
                .filter_map(|path| path.sets.first().copied())
                .fold(TokenSet::EMPTY, TokenSet::union),
        }
    }
}

impl<K> fmt::Debug for Decision<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("name", &self.name)
            .field("k", &self.k)
            .field("alternatives", &self.alternatives.len())
            .field("states", &self.states.len())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Decision`].
pub struct DecisionBuilder<K: 'static> {
    name: &'static str,
    k: usize,
    alternatives: Vec<Alternative<K>>,
}

impl<K: TokenKind> DecisionBuilder<K> {
    /// Add the next alternative. Declaration order is priority order.
    #[must_use]
    pub fn alt(mut self, alternative: Alternative<K>) -> Self {
        self.alternatives.push(alternative);
        self
    }

    /// Compile the lookahead DFA.
    pub fn build(self) -> Decision<K> {
        let k = self.k.max(1);
        let mut paths = Vec::new();
        for (alt, alternative) in self.alternatives.iter().enumerate() {
            if alternative.paths.is_empty() {
                paths.push(Path {
                    alt,
                    sets: Vec::new(),
                });
            }
            for sets in &alternative.paths {
                if sets.len() > k {
                    warn!(
                        decision = self.name,
                        alternative = alternative.name,
                        len = sets.len(),
                        k,
                        "lookahead path longer than k; truncating"
                    );
                }
                paths.push(Path {
                    alt,
                    sets: sets.iter().take(k).copied().collect(),
                });
            }
        }

        let states = SubsetBuilder::new(&paths, k).run();
        debug!(
            decision = self.name,
            k,
            alternatives = self.alternatives.len(),
            states = states.len(),
            "built decision"
        );
        Decision {
            name: self.name,
            k,
            alternatives: self.alternatives,
            paths,
            states,
        }
    }
}

/// Subset construction over lookahead paths.
///
/// A DFA state is a set of paths that agree with the tokens read so far,
/// at a given depth. A path shorter than the depth is complete: it has
/// nothing left to check and matches any further token.
struct SubsetBuilder<'p> {
    paths: &'p [Path],
    k: usize,
    states: Vec<DfaState>,
    index: FxHashMap<(usize, Vec<PathId>), StateId>,
    work: Vec<(StateId, usize, Vec<PathId>)>,
}

impl<'p> SubsetBuilder<'p> {
    fn new(paths: &'p [Path], k: usize) -> Self {
        SubsetBuilder {
            paths,
            k,
            states: Vec::new(),
            index: FxHashMap::default(),
            work: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<DfaState> {
        let all = (0..self.paths.len())
            .map(|p| u32::try_from(p).unwrap_or(u32::MAX))
            .collect();
        self.intern(0, all);
        while let Some((id, depth, items)) = self.work.pop() {
            self.expand(id, depth, &items);
        }
        self.states
    }

    fn intern(&mut self, depth: usize, items: Vec<PathId>) -> StateId {
        if let Some(&id) = self.index.get(&(depth, items.clone())) {
            return id;
        }
        let id = StateId::try_from(self.states.len()).unwrap_or(StateId::MAX);
        let accept = self.accept(depth, &items);
        self.states.push(DfaState {
            accept: accept.clone(),
            edges: Vec::new(),
            expected: TokenSet::EMPTY,
        });
        self.index.insert((depth, items.clone()), id);
        if matches!(accept, Accept::Continue) {
            self.work.push((id, depth, items));
        }
        id
    }

    fn accept(&self, depth: usize, items: &[PathId]) -> Accept {
        let alts = AltSet::from_sorted(items.iter().map(|&p| self.paths[p as usize].alt));
        if alts.len() == 1 {
            return Accept::Unique(alts.as_slice()[0]);
        }
        let all_complete = items
            .iter()
            .all(|&p| self.paths[p as usize].sets.len() <= depth);
        if !alts.is_empty() && (depth >= self.k || all_complete) {
            return Accept::Ambiguous(alts);
        }
        Accept::Continue
    }

    fn expand(&mut self, id: StateId, depth: usize, items: &[PathId]) {
        let mut expected = TokenSet::EMPTY;
        for &p in items {
            if let Some(set) = self.paths[p as usize].sets.get(depth) {
                expected.union_with(*set);
            }
        }

        // Group kind indices by the successor item set they lead to.
        let mut groups: Vec<(Vec<PathId>, TokenSet)> = Vec::new();
        let mut group_of: FxHashMap<Vec<PathId>, usize> = FxHashMap::default();
        for index in expected.iter_indices() {
            let next: Vec<PathId> = items
                .iter()
                .copied()
                .filter(|&p| {
                    self.paths[p as usize]
                        .sets
                        .get(depth)
                        .map_or(true, |set| set.contains_index(index))
                })
                .collect();
            match group_of.get(&next) {
                Some(&g) => groups[g].1 = groups[g].1.with_index(index),
                None => {
                    group_of.insert(next.clone(), groups.len());
                    groups.push((next, TokenSet::EMPTY.with_index(index)));
                }
            }
        }

        // Kinds no incomplete path names only keep the complete paths alive.
        let complete: Vec<PathId> = items
            .iter()
            .copied()
            .filter(|&p| self.paths[p as usize].sets.len() <= depth)
            .collect();
        if !complete.is_empty() {
            groups.push((complete, TokenSet::ANY.difference(expected)));
        }

        let mut edges = Vec::with_capacity(groups.len());
        for (next, set) in groups {
            let target = self.intern(depth + 1, next);
            edges.push((set, target));
        }
        let state = &mut self.states[id as usize];
        state.edges = edges;
        state.expected = expected;
    }
}
