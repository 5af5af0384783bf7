//! Rule dispatch.
//!
//! [`Parser`] is the object grammar procedures are written against. It owns
//! the cursor and memo table for one parse and knows whether it is
//! committed or inside a speculative trial:
//!
//! - **committed**: consumed tokens and rule boundaries go to the tree
//!   sink, errors are returned (or recovered from in recovery mode);
//! - **speculating**: nothing reaches the sink, any recognition error is
//!   the cheap `TrialFailure`, and rule outcomes are memoized.
//!
//! Grammar procedures return `PResult<()>`; the tree sink carries the
//! structure. That keeps memoized rules cheap to replay: a memo hit only
//! has to move the cursor.

mod rule;

pub use rule::{Rule, RuleId};

use crate::config::ParserConfig;
use crate::cursor::Cursor;
use crate::decision::{Decision, Prediction};
use crate::error::{CursorError, PResult, ParseError, ParseErrorKind};
use crate::memo::{MemoLookup, MemoStats, MemoTable};
use crate::observer::ParseObserver;
use crate::predicate::SemanticPredicate;
use crate::recovery::synchronize;
use crate::stack::ensure_sufficient_stack;
use crate::tree::{NoopSink, TreeSink};
use rewind_ir::{Token, TokenKind, TokenList, TokenSet};
use smallvec::SmallVec;
use tracing::{debug, warn};

/// Counters from one parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Rule invocations, memo hits included.
    pub steps: u64,
    /// Speculative trials run.
    pub trials: u64,
    /// Deepest rule nesting reached.
    pub max_depth: usize,
    pub memo: MemoStats,
}

/// Result of a successful (or recovered) parse.
#[derive(Debug)]
pub struct ParseOutput<T> {
    /// Whatever the tree sink built.
    pub value: T,
    /// Errors recovered from, in source order of discovery.
    pub diagnostics: Vec<ParseError>,
    pub stats: ParseStats,
}

impl<T> ParseOutput<T> {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A backtracking recursive-descent parser over one token list.
pub struct Parser<'a, K, S = NoopSink> {
    cursor: Cursor<'a, K>,
    memo: MemoTable,
    config: ParserConfig,
    sink: S,
    observer: Option<&'a mut dyn ParseObserver>,
    /// Nesting of active trials; zero when committed.
    speculating: u32,
    depth: usize,
    steps: u64,
    diagnostics: Vec<ParseError>,
    stats: ParseStats,
}

impl<'a, K: TokenKind> Parser<'a, K, NoopSink> {
    /// A recognize-only parser.
    pub fn new(tokens: &'a TokenList<K>, config: ParserConfig) -> Self {
        Parser::with_sink(tokens, config, NoopSink)
    }
}

impl<'a, K: TokenKind, S: TreeSink> Parser<'a, K, S> {
    pub fn with_sink(tokens: &'a TokenList<K>, config: ParserConfig, sink: S) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            memo: MemoTable::new(config.memoize),
            config,
            sink,
            observer: None,
            speculating: 0,
            depth: 0,
            steps: 0,
            diagnostics: Vec::new(),
            stats: ParseStats::default(),
        }
    }

    /// Report every parse event to `observer`.
    #[must_use]
    pub fn with_observer(mut self, observer: &'a mut dyn ParseObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    #[inline]
    fn observe(&mut self, f: impl FnOnce(&mut (dyn ParseObserver + 'a))) {
        if let Some(observer) = self.observer.as_mut() {
            f(&mut **observer);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Token access
    // ─────────────────────────────────────────────────────────────────────

    #[inline]
    pub fn cursor(&self) -> &Cursor<'a, K> {
        &self.cursor
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    #[inline]
    pub fn is_speculating(&self) -> bool {
        self.speculating > 0
    }

    #[inline]
    pub fn current(&self) -> &'a Token<K> {
        self.cursor.current()
    }

    #[inline]
    pub fn current_kind(&self) -> K {
        self.cursor.current_kind()
    }

    #[inline]
    pub fn current_text(&self) -> &'a str {
        self.cursor.current_text()
    }

    #[inline]
    pub fn peek_kind(&self, offset: usize) -> K {
        self.cursor.peek_kind(offset)
    }

    #[inline]
    pub fn check(&self, kind: K) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    pub fn check_set(&self, set: TokenSet) -> bool {
        self.cursor.check_set(set)
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Evaluate a semantic predicate at the current position.
    #[inline]
    pub fn check_predicate(&self, predicate: &SemanticPredicate<K>) -> bool {
        predicate.evaluate(&self.cursor)
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) -> &'a Token<K> {
        let index = self.cursor.current_index();
        let token = self.cursor.consume();
        if self.speculating == 0 {
            self.sink.token(index);
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: K) -> bool {
        if self.check(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: K) -> PResult<&'a Token<K>> {
        if self.check(kind) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(TokenSet::single(kind)))
        }
    }

    pub fn expect_set(&mut self, set: TokenSet) -> PResult<&'a Token<K>> {
        if self.check_set(set) {
            Ok(self.bump())
        } else {
            Err(self.unexpected(set))
        }
    }

    /// Error for a current token not in `expected`.
    ///
    /// While speculating this is the cheap `TrialFailure`: no message is
    /// built for an error nobody will see.
    #[cold]
    pub fn unexpected(&self, expected: TokenSet) -> ParseError {
        if self.speculating > 0 {
            ParseError::trial(self.cursor.position())
        } else {
            self.cursor.unexpected(expected)
        }
    }

    fn abort(&self, kind: ParseErrorKind) -> ParseError {
        self.cursor.error_at(self.cursor.position(), kind)
    }

    fn cursor_error(&self, err: CursorError) -> ParseError {
        self.abort(ParseErrorKind::Cursor(err))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Rules
    // ─────────────────────────────────────────────────────────────────────

    /// Run `body` as an invocation of `rule`.
    ///
    /// Errors leave the cursor wherever the body stopped; callers that
    /// need the input back use [`speculate`](Self::speculate).
    pub fn rule(
        &mut self,
        rule: &'static Rule,
        body: impl FnOnce(&mut Self) -> PResult<()>,
    ) -> PResult<()> {
        self.invoke(rule, body, false)
    }

    /// Like [`rule`](Self::rule), but in recovery mode a committed failure
    /// becomes a diagnostic: the parser skips to the rule's follow set (or
    /// past one of its terminators), wraps the skipped tokens in an error
    /// node, and the rule returns `Ok`.
    ///
    /// At least one token is consumed when the rule made no progress, so a
    /// caller looping over a recoverable rule always terminates.
    pub fn rule_or_recover(
        &mut self,
        rule: &'static Rule,
        body: impl FnOnce(&mut Self) -> PResult<()>,
    ) -> PResult<()> {
        self.invoke(rule, body, true)
    }

    fn invoke(
        &mut self,
        rule: &'static Rule,
        body: impl FnOnce(&mut Self) -> PResult<()>,
        recoverable: bool,
    ) -> PResult<()> {
        let start = self.cursor.position();
        self.enter(rule).map_err(|e| e.in_rule(rule.name))?;

        let speculating = self.speculating > 0;
        self.observe(|o| o.rule_enter(rule.name, start, speculating));

        if speculating {
            match self.memo.lookup(rule.id, start) {
                MemoLookup::Succeeded { end } => {
                    self.cursor.set_position(end);
                    self.observe(|o| o.rule_exit(rule.name, end, true));
                    return Ok(());
                }
                MemoLookup::Failed => {
                    self.observe(|o| o.rule_exit(rule.name, start, false));
                    return Err(ParseError::trial(start));
                }
                MemoLookup::NotRecorded => {}
            }
        } else {
            self.sink.start_node(rule);
        }

        self.depth += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);
        let mut result = ensure_sufficient_stack(|| body(self)).map_err(|e| e.in_rule(rule.name));
        self.depth -= 1;

        if speculating {
            self.memoize(rule, start, &result);
        } else if let Err(err) = &result {
            if recoverable && self.config.recover && !err.is_abort() {
                let err = err.clone();
                self.recover(rule, start, err);
                result = Ok(());
            }
        }

        if !speculating {
            self.sink.finish_node();
        }
        let end = self.cursor.position();
        let success = result.is_ok();
        self.observe(|o| o.rule_exit(rule.name, end, success));
        result
    }

    /// Limits polled at every rule entry.
    fn enter(&mut self, rule: &Rule) -> PResult<()> {
        if self.config.is_cancelled() {
            debug!(rule = rule.name, "parse cancelled");
            return Err(self.abort(ParseErrorKind::Cancelled));
        }
        self.steps += 1;
        if let Some(limit) = self.config.max_steps {
            if self.steps > limit {
                return Err(self.abort(ParseErrorKind::StepBudgetExhausted { limit }));
            }
        }
        if self.depth >= self.config.max_depth {
            return Err(self.abort(ParseErrorKind::NestingTooDeep {
                limit: self.config.max_depth,
            }));
        }
        Ok(())
    }

    fn memoize(&mut self, rule: &Rule, start: usize, result: &PResult<()>) {
        let outcome = match result {
            Ok(()) => MemoLookup::Succeeded {
                end: self.cursor.position(),
            },
            Err(err) if err.is_abort() => return,
            Err(_) => MemoLookup::Failed,
        };
        if let Err(err) = self.memo.record(rule.id, start, outcome) {
            warn!(rule = rule.name, "{err}");
        }
    }

    fn recover(&mut self, rule: &Rule, start: usize, err: ParseError) {
        debug!(
            rule = rule.name,
            pos = self.cursor.position(),
            "recovering: {err}"
        );
        self.observe(|o| o.error(&err));
        self.diagnostics.push(err);

        self.sink.start_error();
        let sink = &mut self.sink;
        synchronize(&mut self.cursor, rule.sync_set(), |index| sink.token(index));
        if !self.cursor.is_at_end()
            && (self.cursor.check_set(rule.terminators) || self.cursor.position() == start)
        {
            self.bump();
        }
        self.sink.finish_node();
    }

    // ─────────────────────────────────────────────────────────────────────
    // Speculation and decisions
    // ─────────────────────────────────────────────────────────────────────

    /// Run `f` as a speculative trial and report whether it matched.
    ///
    /// The cursor is always restored. Recognition errors inside the trial
    /// become `false`; abort errors propagate.
    pub fn speculate(&mut self, f: impl FnOnce(&mut Self) -> PResult<()>) -> PResult<bool> {
        let start = self.cursor.position();
        let mark = self.cursor.mark();
        self.speculating += 1;
        self.stats.trials += 1;
        self.observe(|o| o.trial_start(start));

        let result = f(self);

        self.speculating -= 1;
        self.cursor.rewind(mark).map_err(|e| self.cursor_error(e))?;
        self.cursor.release(mark).map_err(|e| self.cursor_error(e))?;

        let success = match result {
            Ok(()) => true,
            Err(err) if err.is_abort() => {
                self.observe(|o| o.trial_end(start, false));
                return Err(err);
            }
            Err(_) => false,
        };
        self.observe(|o| o.trial_end(start, success));
        Ok(success)
    }

    /// Pick an alternative of `decision` at the current position.
    ///
    /// The DFA narrows the candidates; alternatives whose semantic
    /// predicate is false drop out. If several remain, `trial(parser, alt)`
    /// is run speculatively for each in declaration order and the first
    /// that matches wins. The last remaining candidate is taken without a
    /// trial unless it is marked speculative, in which case it must pass
    /// its trial too.
    ///
    /// `trial` must succeed exactly when its alternative is the right
    /// choice. It may parse the whole alternative or only the prefix that
    /// sets it apart; a shorter trial keeps errors further in reported
    /// where they occur.
    pub fn decide(
        &mut self,
        decision: &Decision<K>,
        mut trial: impl FnMut(&mut Self, usize) -> PResult<()>,
    ) -> PResult<usize> {
        let position = self.cursor.position();
        let candidates: SmallVec<[usize; 4]> = match decision.predict(&self.cursor) {
            Prediction::Unique(alt) => smallvec::smallvec![alt],
            Prediction::Ambiguous(alts) => alts.iter().collect(),
            Prediction::NoViable { expected, depth } => {
                return Err(self.no_viable(decision, expected, position + depth));
            }
        };

        let viable: SmallVec<[usize; 4]> = candidates
            .into_iter()
            .filter(|&alt| {
                decision
                    .alternative(alt)
                    .and_then(|a| a.semantic_predicate())
                    .map_or(true, |p| p.evaluate(&self.cursor))
            })
            .collect();

        let last = viable.len().saturating_sub(1);
        for (i, &alt) in viable.iter().enumerate() {
            let speculative = decision
                .alternative(alt)
                .is_some_and(|a| a.is_speculative());
            if i == last && !speculative {
                return Ok(self.choose(decision, position, alt));
            }
            if self.speculate(|p| trial(p, alt))? {
                return Ok(self.choose(decision, position, alt));
            }
        }
        Err(self.no_viable(decision, decision.first_set(), position))
    }

    fn choose(&mut self, decision: &Decision<K>, position: usize, alt: usize) -> usize {
        debug!(decision = decision.name(), pos = position, alt, "decided");
        self.observe(|o| o.decision(decision.name(), position, alt));
        alt
    }

    #[cold]
    fn no_viable(&self, decision: &Decision<K>, expected: TokenSet, at: usize) -> ParseError {
        if self.speculating > 0 {
            return ParseError::trial(self.cursor.position());
        }
        let found = self
            .cursor
            .peek(at - self.cursor.position())
            .map_or_else(|_| K::EOF.display_name().to_string(), |t| {
                crate::cursor::describe(self.cursor.tokens(), t)
            });
        self.cursor.error_at(
            at,
            ParseErrorKind::NoViableAlternative {
                decision: decision.name(),
                expected: expected.names::<K>(),
                found,
            },
        )
    }

    // ─────────────────────────────────────────────────────────────────────
    // Entry points
    // ─────────────────────────────────────────────────────────────────────

    /// Parse the whole input as `root` and finish.
    ///
    /// In recovery mode a recognition error escaping the root rule is
    /// recorded as a diagnostic instead of failing the parse.
    pub fn parse(
        mut self,
        root: &'static Rule,
        body: impl FnOnce(&mut Self) -> PResult<()>,
    ) -> Result<ParseOutput<S::Output>, ParseError> {
        if let Err(err) = self.rule(root, body) {
            self.observe(|o| o.error(&err));
            if !self.config.recover || err.is_abort() {
                return Err(err);
            }
            self.diagnostics.push(err);
        }
        self.finish()
    }

    /// Require end of input and hand back what the sink built.
    ///
    /// Trailing tokens are an error; in recovery mode they become a
    /// diagnostic and an error node instead.
    pub fn finish(mut self) -> Result<ParseOutput<S::Output>, ParseError> {
        if !self.cursor.is_at_end() {
            let err = self.cursor.unexpected(TokenSet::single(K::EOF));
            self.observe(|o| o.error(&err));
            if !self.config.recover {
                return Err(err);
            }
            self.diagnostics.push(err);
            self.sink.start_error();
            while !self.cursor.is_at_end() {
                self.bump();
            }
            self.sink.finish_node();
        }
        debug_assert_eq!(self.cursor.outstanding_marks(), 0);

        self.stats.steps = self.steps;
        self.stats.memo = self.memo.stats();
        Ok(ParseOutput {
            value: self.sink.finish(),
            diagnostics: self.diagnostics,
            stats: self.stats,
        })
    }
}

#[cfg(test)]
mod tests;
